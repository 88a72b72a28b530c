//! Command-line argument parsing.
//!
//! ```bash
//! webdocs ingest https://example.com/post "My Post" --text "hello world"
//! webdocs search "hello"
//! webdocs related <id>
//! webdocs fetch https://example.com/post
//! webdocs export backup.json
//! ```

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "webdocs", version, about = "Organize and search a personal web document collection")]
pub struct Cli {
    /// Increase log verbosity to debug.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all but error-level logs.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Path to the persisted collection file. Overrides the configured storage path.
    #[arg(long, global = true)]
    pub storage: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a document (or a new version of an existing url) to the collection.
    Ingest {
        /// Canonical address of the document.
        url: String,
        /// Human-readable title.
        title: String,
        /// Body text. Mutually exclusive with `--file`.
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// Read body text from a file instead of passing it inline.
        #[arg(long)]
        file: Option<std::path::PathBuf>,
        /// Origin label; defaults to "unknown".
        #[arg(long)]
        source: Option<String>,
        /// Comma-separated tags.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Fetch a URL over HTTP, extract its text, and ingest it.
    Fetch {
        url: String,
        #[arg(long)]
        source: Option<String>,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Rank documents against a query and print explainable match reasons.
    Search {
        query: String,
        /// Maximum number of results to print.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Print a document by id.
    Show { id: String },
    /// Print documents related to `id` via the relatedness graph.
    Related { id: String },
    /// List every document currently held, newest id last.
    List,
    /// Remove a document and its index/graph entries.
    Delete { id: String },
    /// Write the whole collection to a JSON file.
    Export {
        /// Destination path; defaults to the configured storage path.
        path: Option<std::path::PathBuf>,
    },
    /// Replace the in-memory collection with one loaded from a JSON file.
    Import {
        /// Source path; defaults to the configured storage path.
        path: Option<std::path::PathBuf>,
    },
    /// Print the resolved configuration.
    Config,
}
