//! Command handlers. Each takes the already-loaded [`Organizer`] and prints
//! its result; persistence back to `storage_path` is the caller's
//! responsibility once a handler reports a mutation.

use crate::cli::Commands;
use crate::fetch::{extract_text, extract_title, FetchResult, HttpFetcher};
use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use webdocs_core::{DocumentId, Organizer, RawDocument};

/// Dispatch `command` against `organizer`. Returns whether the organizer was
/// mutated, so the caller knows whether to persist it back to `storage_path`.
pub async fn run(command: Commands, organizer: &Organizer, storage_path: &Path) -> Result<bool> {
    match command {
        Commands::Ingest {
            url,
            title,
            text,
            file,
            source,
            tags,
        } => {
            let body = match (text, file) {
                (Some(t), None) => t,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                _ => anyhow::bail!("provide exactly one of --text or --file"),
            };
            let mut raw = RawDocument::new(url, title, body);
            if let Some(source) = source {
                raw.source = source;
            }
            raw.tags = tags;
            let id = organizer.ingest(raw)?;
            println!("ingested {id}");
            Ok(true)
        },
        Commands::Fetch { url, source, tags } => {
            let fetcher = HttpFetcher::new()?;
            let html = match fetcher.fetch(&url, None, None).await? {
                FetchResult::Fetched { html, .. } => html,
                FetchResult::NotModified => anyhow::bail!("unexpected 304 on first fetch"),
            };
            let title = extract_title(&html).unwrap_or_else(|| url.clone());
            let text = extract_text(&html);
            let mut raw = RawDocument::new(url, title, text);
            if let Some(source) = source {
                raw.source = source;
            }
            raw.tags = tags;
            let id = organizer.ingest(raw)?;
            println!("fetched and ingested {id}");
            Ok(true)
        },
        Commands::Search { query, limit } => {
            let results = organizer.search(&query);
            if results.is_empty() {
                println!("no matches");
            }
            for result in results.into_iter().take(limit) {
                println!("{} (score {})", result.document_id, result.score);
                for reason in &result.reasons {
                    println!("  - {reason}");
                }
            }
            Ok(false)
        },
        Commands::Show { id } => {
            let id = parse_id(&id)?;
            match organizer.get(id) {
                Some(doc) => println!("{}", serde_json::to_string_pretty(&doc)?),
                None => println!("no document with id {id}"),
            }
            Ok(false)
        },
        Commands::Related { id } => {
            let id = parse_id(&id)?;
            let related = organizer.get_related(id);
            if related.is_empty() {
                println!("no related documents");
            }
            for view in related {
                println!("{} - {}", view.url, view.title);
            }
            Ok(false)
        },
        Commands::List => {
            for doc in organizer.all_documents() {
                println!("{} {} - {}", doc.id, doc.metadata.url, doc.metadata.title);
            }
            Ok(false)
        },
        Commands::Delete { id } => {
            let id = parse_id(&id)?;
            let removed = organizer.delete(id);
            if removed {
                println!("deleted {id}");
            } else {
                println!("no document with id {id}");
            }
            Ok(removed)
        },
        Commands::Export { path } => {
            let target = path.unwrap_or_else(|| storage_path.to_path_buf());
            let json = webdocs_core::to_json(organizer)?;
            std::fs::write(&target, json)
                .with_context(|| format!("writing {}", target.display()))?;
            println!("exported to {}", target.display());
            Ok(false)
        },
        Commands::Import { path } => {
            let source = path.unwrap_or_else(|| storage_path.to_path_buf());
            let json = std::fs::read_to_string(&source)
                .with_context(|| format!("reading {}", source.display()))?;
            webdocs_core::load_into_or_empty(organizer, &json);
            println!(
                "imported {} documents from {}",
                organizer.document_count(),
                source.display()
            );
            Ok(true)
        },
        Commands::Config => Ok(false),
    }
}

fn parse_id(s: &str) -> Result<DocumentId> {
    DocumentId::from_str(s).with_context(|| format!("'{s}' is not a valid document id"))
}
