//! Logging initialization based on CLI flags and the resolved log level.

use crate::cli::Cli;
use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize the global tracing subscriber.
///
/// `configured_level` is the organizer configuration's `log_level`; CLI flags
/// (`--verbose`, `--quiet`) take precedence over it.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn initialize(cli: &Cli, configured_level: &str) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        configured_level.parse().unwrap_or(Level::INFO)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
