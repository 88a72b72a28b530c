//! Core data structures: documents, their metadata, and version history.
//!
//! Mirrors the data model used throughout the rest of webdocs-core. `content`
//! and `custom_attributes` are modeled as `serde_json::Value` rather than a
//! hand-rolled tagged union — the inspection points the core actually needs
//! (`text`, `headings`) are narrow and enumerated here; everything else rides
//! through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A 128-bit identifier assigned to a [`Document`] on creation, stable for its
/// lifetime. Serializes as a lower-case hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u128);

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u128::from_str_radix(s, 16).map(DocumentId)
    }
}

impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Immutable identity plus mutable descriptive fields for a [`Document`].
///
/// Frozen at first ingest: re-ingesting an already-known URL appends a new
/// [`DocumentVersion`] but never updates `title`, `url`, or `tags` here (see
/// the design notes' open-question decision on this).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Origin label, e.g. the backend that fetched this document.
    #[serde(default = "default_source")]
    pub source: String,
    /// Canonical address; may be empty for synthesized documents.
    #[serde(default)]
    pub url: String,
    /// Human-readable label; may be empty.
    #[serde(default)]
    pub title: String,
    /// ISO-8601 creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Ordered, duplicate-free tags (insertion order preserved for display).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque caller-supplied attributes, preserved verbatim on serialization.
    #[serde(default)]
    pub custom_attributes: HashMap<String, serde_json::Value>,
}

fn default_source() -> String {
    "unknown".to_string()
}

impl DocumentMetadata {
    /// Build metadata for a freshly created document, deduplicating `tags` while
    /// preserving first-seen order.
    #[must_use]
    pub fn new(source: String, url: String, title: String, tags: Vec<String>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let tags = tags
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self {
            source,
            url,
            title,
            timestamp: Utc::now(),
            tags,
            custom_attributes: HashMap::new(),
        }
    }
}

/// A single immutable snapshot of a document's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// Opaque content mapping. Well-known keys: `text` (string) and `headings`
    /// (sequence of mappings each with a `text` key). Everything else is
    /// preserved untouched.
    pub content: serde_json::Value,
    /// 1-based, monotonic, unique within the owning document.
    pub version_number: u32,
    /// ISO-8601 timestamp of when this version was appended.
    pub timestamp: DateTime<Utc>,
}

impl DocumentVersion {
    /// The `text` key of `content`, if present and a string.
    #[must_use]
    pub fn text(&self) -> &str {
        self.content.get("text").and_then(|v| v.as_str()).unwrap_or("")
    }

    /// The `text` key of each entry in `headings`, if present.
    #[must_use]
    pub fn heading_texts(&self) -> Vec<&str> {
        self.content
            .get("headings")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|h| h.get("text").and_then(|t| t.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Identity plus an append-only history of content versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier assigned on creation.
    pub id: DocumentId,
    /// Latest descriptive metadata (prior metadata is not retained).
    pub metadata: DocumentMetadata,
    /// Append-only, 1-indexed version history. Never empty once constructed.
    pub versions: Vec<DocumentVersion>,
}

impl Document {
    /// The most recently appended version. Panics only if called on a
    /// `Document` that violates the "never empty" invariant, which the store
    /// never constructs.
    #[must_use]
    pub fn latest_version(&self) -> &DocumentVersion {
        self.versions
            .last()
            .expect("Document invariant: versions is never empty")
    }
}

/// A compact, read-only view of a document returned from relatedness queries.
///
/// Callers receive an owned copy; mutating it cannot corrupt the organizer's
/// indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentView {
    /// Canonical address of the document.
    pub url: String,
    /// Human-readable label.
    pub title: String,
    /// Latest version's content mapping.
    pub content: serde_json::Value,
}

impl From<&Document> for DocumentView {
    fn from(doc: &Document) -> Self {
        Self {
            url: doc.metadata.url.clone(),
            title: doc.metadata.title.clone(),
            content: doc.latest_version().content.clone(),
        }
    }
}

/// Ingest input contract: what an external collaborator (a fetcher, a replay
/// of a persisted store) hands to [`crate::Organizer::ingest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    /// Canonical address; possibly empty.
    #[serde(default)]
    pub url: String,
    /// Human-readable label; possibly empty.
    #[serde(default)]
    pub title: String,
    /// Origin label; defaults to `"unknown"` if omitted.
    #[serde(default = "default_source")]
    pub source: String,
    /// Ordered, duplicate-free tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Content mapping. Recognized keys: `text`, `headings`.
    pub content: serde_json::Value,
}

impl RawDocument {
    /// Build a raw document from just a URL, title, and body text — the
    /// common case for a demonstration ingest.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            source: default_source(),
            tags: Vec::new(),
            content: serde_json::json!({ "text": text.into() }),
        }
    }
}
