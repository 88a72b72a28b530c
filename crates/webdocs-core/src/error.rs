//! Error types and handling for webdocs-core operations.
//!
//! This module provides a single error type covering the failure categories the
//! document organization and retrieval core can produce. Ordinary data conditions
//! (missing document, empty query, no matches) are represented with `Option`/`bool`
//! return types at the call site, never as an `Error` variant — only programming
//! errors and boundary failures with an external collaborator raise one of these.

use thiserror::Error;

/// The main error type for webdocs-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed (serialization load/save, config file access).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A required argument was missing or invalid. The only hard rejection
    /// `ingest` performs; never raised for ordinary missing-data conditions.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested id or url does not exist.
    ///
    /// Surfaced only where a caller explicitly asked for a hard lookup (e.g. the
    /// CLI's `show` command); the library API itself reports absence via `Option`.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration file was malformed or contained an invalid value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An external collaborator (web search API, fetch adapter) was unreachable
    /// or not configured. Operations that hit this absorb it and return an empty
    /// result rather than propagating; this variant exists for the cases where a
    /// caller asked to be told (e.g. `WebSearchClient` implementations return it
    /// internally before the `Organizer` absorbs it).
    #[error("External collaborator unavailable: {0}")]
    ExternalUnavailable(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Convenience alias used throughout webdocs-core.
pub type Result<T> = std::result::Result<T, Error>;
