//! # webdocs-core
//!
//! Core functionality for organizing and retrieving a personal collection of
//! web documents: versioned storage, an inverted index, a relatedness graph
//! derived from term overlap, and an explainable search engine.
//!
//! ## Architecture
//!
//! The crate is organized around several cooperating components, all owned
//! by a single [`Organizer`] facade:
//!
//! - **Store**: id-stable, version-preserving document storage
//! - **Index**: a term-to-document inverted index
//! - **Graph**: an undirected relatedness graph derived from Jaccard
//!   similarity of document terms, narrowed via the index for efficiency
//! - **Search**: event-counted, explainable ranking over the store and index
//! - **Serialization**: a portable JSON form for the whole collection
//! - **Configuration**: similarity threshold, storage path, and log level
//!
//! ## Quick Start
//!
//! ```rust
//! use webdocs_core::{Organizer, RawDocument};
//!
//! let organizer = Organizer::new();
//! let id = organizer
//!     .ingest(RawDocument::new("https://example.com", "Example", "hello world"))
//!     .expect("content is not null");
//!
//! let results = organizer.search("hello");
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].document_id, id);
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`]. Absence (a missing
//! document, no related neighbors) is modeled with `Option`/`bool`, not
//! `Err` — see the error module docs.

/// Configuration: similarity threshold, storage path, log level.
pub mod config;
/// Error types and the crate's `Result` alias.
pub mod error;
/// The inverted index mapping terms to document ids.
pub mod index;
/// The relatedness graph derived from term-set Jaccard similarity.
pub mod graph;
/// The `Organizer` facade coordinating store, index, and graph.
pub mod organizer;
/// The portable JSON form of a document collection.
pub mod serialization;
/// Search scoring, match reasons, and the web-search passthrough.
pub mod search;
/// Document storage keyed by stable id, with per-url version history.
pub mod store;
/// Tokenization, stop-word removal, and Jaccard similarity.
pub mod text;
/// Core data types: documents, metadata, versions, ids.
pub mod types;

pub use config::OrganizerConfig;
pub use error::{Error, Result};
pub use graph::{RelatednessGraph, DEFAULT_SIMILARITY_THRESHOLD};
pub use index::InvertedIndex;
pub use organizer::Organizer;
pub use search::{SearchResult, UnconfiguredWebSearchClient, WebSearchClient, WebSearchResult};
pub use serialization::{from_json, load_into, load_into_or_empty, to_json, to_portable, PersistedCollection};
pub use store::DocumentCollection;
pub use text::{extract_terms, jaccard, remove_stop_words, tokenize};
pub use types::{Document, DocumentId, DocumentMetadata, DocumentVersion, DocumentView, RawDocument};
