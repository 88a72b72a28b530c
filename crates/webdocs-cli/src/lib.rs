//! webdocs CLI - organize and search a personal collection of web documents.
//!
//! Thin binary glue around `webdocs-core`: loads the persisted collection,
//! dispatches one subcommand against an [`Organizer`](webdocs_core::Organizer),
//! and persists it back when the command mutated anything.

use anyhow::{Context, Result};
use cli::Cli;
use clap::Parser;
use std::path::Path;
use tracing::warn;
use webdocs_core::{Organizer, OrganizerConfig};

mod cli;
mod commands;
mod fetch;
mod logging;

/// Run the CLI to completion against the process's real arguments and
/// environment.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, logging cannot be
/// initialized, or the dispatched command fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = OrganizerConfig::load().context("loading configuration")?;
    logging::initialize(&cli, &config.log_level)?;

    let storage_path = cli.storage.clone().unwrap_or(config.storage_path.clone());
    let organizer = Organizer::with_threshold(config.similarity_threshold);
    load_if_present(&organizer, &storage_path);

    if matches!(cli.command, cli::Commands::Config) {
        print_config(&config, &storage_path);
        return Ok(());
    }

    let mutated = commands::run(cli.command, &organizer, &storage_path).await?;

    if mutated {
        if let Err(e) = persist(&organizer, &storage_path) {
            warn!(error = %e, "failed to persist collection");
            return Err(e);
        }
    }

    Ok(())
}

fn load_if_present(organizer: &Organizer, path: &Path) {
    match std::fs::read_to_string(path) {
        Ok(json) => webdocs_core::load_into_or_empty(organizer, &json),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
        Err(e) => warn!(error = %e, path = %path.display(), "failed to read storage file"),
    }
}

fn persist(organizer: &Organizer, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = webdocs_core::to_json(organizer)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn print_config(config: &OrganizerConfig, storage_path: &Path) {
    println!("similarity_threshold = {}", config.similarity_threshold);
    println!("storage_path = {}", storage_path.display());
    println!("log_level = {}", config.log_level);
}
