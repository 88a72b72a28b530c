//! The document store: stable ids, per-URL version history, lookup by id/url/title.

use crate::types::{Document, DocumentId, DocumentMetadata, DocumentVersion};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Holds documents, assigns stable ids, appends new versions, and resolves
/// lookups by id, url, or title.
///
/// `add` is amortized O(1): a `url -> id` side index avoids the URL scan the
/// original specification allows but does not require.
#[derive(Debug, Default)]
pub struct DocumentCollection {
    documents: HashMap<DocumentId, Document>,
    by_url: HashMap<String, DocumentId>,
}

impl DocumentCollection {
    /// An empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new document, or append a version to an existing one if
    /// `metadata.url` is non-empty and already known. Returns the (possibly
    /// pre-existing) document's id.
    ///
    /// Metadata on an existing document is never overwritten by a re-ingest;
    /// only the version history grows.
    pub fn add(&mut self, metadata: DocumentMetadata, content: serde_json::Value) -> DocumentId {
        if !metadata.url.is_empty() {
            if let Some(&id) = self.by_url.get(&metadata.url) {
                let doc = self
                    .documents
                    .get_mut(&id)
                    .expect("by_url index points at a live document");
                let next_version = doc.versions.len() as u32 + 1;
                doc.versions.push(DocumentVersion {
                    content,
                    version_number: next_version,
                    timestamp: Utc::now(),
                });
                return id;
            }
        }

        let id = new_document_id();
        let doc = Document {
            id,
            versions: vec![DocumentVersion {
                content,
                version_number: 1,
                timestamp: Utc::now(),
            }],
            metadata: metadata.clone(),
        };
        self.documents.insert(id, doc);
        if !metadata.url.is_empty() {
            self.by_url.insert(metadata.url, id);
        }
        id
    }

    /// Insert a fully-formed document, preserving its id. Used when replaying
    /// a deserialized collection; overwrites any document with the same id.
    pub fn insert_existing(&mut self, doc: Document) {
        if !doc.metadata.url.is_empty() {
            self.by_url.insert(doc.metadata.url.clone(), doc.id);
        }
        self.documents.insert(doc.id, doc);
    }

    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    /// Exact-match lookup by url.
    #[must_use]
    pub fn find_by_url(&self, url: &str) -> Option<&Document> {
        self.by_url.get(url).and_then(|id| self.documents.get(id))
    }

    /// Case-insensitive title search: substring match when `partial`, exact
    /// equality otherwise. Result order is unspecified but stable within a run.
    #[must_use]
    pub fn find_by_title(&self, needle: &str, partial: bool) -> Vec<&Document> {
        let needle_lower = needle.to_lowercase();
        let mut hits: Vec<&Document> = self
            .documents
            .values()
            .filter(|doc| {
                let title_lower = doc.metadata.title.to_lowercase();
                if partial {
                    title_lower.contains(&needle_lower)
                } else {
                    title_lower == needle_lower
                }
            })
            .collect();
        hits.sort_by_key(|doc| doc.id);
        hits
    }

    /// Remove a document by id. Returns whether anything was removed.
    pub fn delete(&mut self, id: DocumentId) -> bool {
        match self.documents.remove(&id) {
            Some(doc) => {
                if !doc.metadata.url.is_empty() {
                    self.by_url.remove(&doc.metadata.url);
                }
                true
            },
            None => false,
        }
    }

    /// Iterate over all documents currently held.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Number of documents currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Mint a fresh 128-bit document id.
///
/// Hashes a monotonic process-local counter plus the current timestamp with
/// `SHA-256` and truncates to 16 bytes — the same hash-derived-identifier idiom
/// the teacher uses for source checksums, applied here to produce a collision
/// -resistant id without pulling in a dedicated randomness dependency. Ids are
/// identity, not a content address, so the hash input is deliberately not the
/// document's content.
fn new_document_id() -> DocumentId {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut hasher = Sha256::new();
    hasher.update(seq.to_be_bytes());
    hasher.update(Utc::now().timestamp_nanos_opt().unwrap_or_default().to_be_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    DocumentId(u128::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(url: &str, title: &str) -> DocumentMetadata {
        DocumentMetadata::new("test".into(), url.into(), title.into(), vec![])
    }

    #[test]
    fn add_creates_new_document_for_fresh_url() {
        let mut store = DocumentCollection::new();
        let id = store.add(meta("u1", "Title"), serde_json::json!({"text": "hi"}));
        let doc = store.get(id).expect("present");
        assert_eq!(doc.versions.len(), 1);
        assert_eq!(doc.versions[0].version_number, 1);
    }

    #[test]
    fn add_versions_existing_url_without_overwriting_metadata() {
        let mut store = DocumentCollection::new();
        let id1 = store.add(meta("u", "First Title"), serde_json::json!({"text": "hello"}));
        let id2 = store.add(
            meta("u", "Second Title"),
            serde_json::json!({"text": "hello world"}),
        );
        assert_eq!(id1, id2);
        let doc = store.get(id1).expect("present");
        assert_eq!(doc.versions.len(), 2);
        assert_eq!(doc.versions[0].version_number, 1);
        assert_eq!(doc.versions[1].version_number, 2);
        // metadata frozen at first ingest
        assert_eq!(doc.metadata.title, "First Title");
    }

    #[test]
    fn add_with_empty_url_never_dedups() {
        let mut store = DocumentCollection::new();
        let id1 = store.add(meta("", "A"), serde_json::json!({"text": "x"}));
        let id2 = store.add(meta("", "A"), serde_json::json!({"text": "x"}));
        assert_ne!(id1, id2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn find_by_url_exact_match() {
        let mut store = DocumentCollection::new();
        let id = store.add(meta("https://x/y", "T"), serde_json::json!({"text": "a"}));
        assert_eq!(store.find_by_url("https://x/y").map(|d| d.id), Some(id));
        assert!(store.find_by_url("https://x/z").is_none());
    }

    #[test]
    fn find_by_title_partial_is_case_insensitive() {
        let mut store = DocumentCollection::new();
        store.add(meta("u1", "Python Tutorial"), serde_json::json!({"text": ""}));
        store.add(meta("u2", "Advanced Python"), serde_json::json!({"text": ""}));
        store.add(meta("u3", "Rust Guide"), serde_json::json!({"text": ""}));

        let hits = store.find_by_title("python", true);
        assert_eq!(hits.len(), 2);

        let exact = store.find_by_title("python tutorial", false);
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].metadata.title, "Python Tutorial");
    }

    #[test]
    fn delete_removes_document_and_url_index() {
        let mut store = DocumentCollection::new();
        let id = store.add(meta("u", "T"), serde_json::json!({"text": "x"}));
        assert!(store.delete(id));
        assert!(store.get(id).is_none());
        assert!(store.find_by_url("u").is_none());
        assert!(!store.delete(id));
    }

    #[test]
    fn document_ids_are_unique_across_many_inserts() {
        let mut store = DocumentCollection::new();
        let mut ids = std::collections::HashSet::new();
        for i in 0..200 {
            let id = store.add(meta(&format!("u{i}"), "T"), serde_json::json!({"text": "x"}));
            assert!(ids.insert(id), "duplicate id minted");
        }
    }
}
