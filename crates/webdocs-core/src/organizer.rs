//! The single ingestion entry point: coordinates the store, index, and graph
//! transactionally, and the single point of egress for search and relatedness.

use crate::error::{Error, Result};
use crate::graph::{RelatednessGraph, DEFAULT_SIMILARITY_THRESHOLD};
use crate::index::InvertedIndex;
use crate::search::{self, SearchResult, WebSearchClient, WebSearchResult};
use crate::store::DocumentCollection;
use crate::text::extract_terms;
use crate::types::{Document, DocumentId, DocumentMetadata, DocumentView, RawDocument};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Coordinates the document store, inverted index, and relatedness graph
/// behind a single coarse lock so `ingest` and `delete` appear atomic with
/// respect to any concurrent read.
///
/// A single `RwLock` guarding all three substructures as one unit was chosen
/// over a documented multi-lock acquisition order: it makes the ingest
/// transaction trivially atomic and the substructures are small enough in the
/// corpus sizes this system targets that coarse locking does not become a
/// bottleneck.
pub struct Organizer {
    state: RwLock<OrganizerState>,
    similarity_threshold: f64,
    web_search_client: Box<dyn WebSearchClient>,
}

struct OrganizerState {
    store: DocumentCollection,
    index: InvertedIndex,
    graph: RelatednessGraph,
}

impl Organizer {
    /// A new organizer with the default similarity threshold (0.2) and no
    /// external web-search client configured.
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SIMILARITY_THRESHOLD)
    }

    /// A new organizer using `similarity_threshold` for its relatedness graph.
    #[must_use]
    pub fn with_threshold(similarity_threshold: f64) -> Self {
        Self {
            state: RwLock::new(OrganizerState {
                store: DocumentCollection::new(),
                index: InvertedIndex::new(),
                graph: RelatednessGraph::new(similarity_threshold),
            }),
            similarity_threshold,
            web_search_client: Box::new(crate::search::UnconfiguredWebSearchClient),
        }
    }

    /// Attach a concrete external web-search client (used by `web_search`).
    #[must_use]
    pub fn with_web_search_client(mut self, client: Box<dyn WebSearchClient>) -> Self {
        self.web_search_client = client;
        self
    }

    /// The configured Jaccard similarity threshold.
    #[must_use]
    pub const fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    /// The single write entry point: create or version a document, then
    /// update the inverted index and relatedness graph to match. All three
    /// substructures are mutated under one write-lock critical section, so a
    /// concurrent reader never observes a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `raw.content` is `Value::Null`.
    #[instrument(skip(self, raw), fields(url = %raw.url))]
    pub fn ingest(&self, raw: RawDocument) -> Result<DocumentId> {
        if raw.content.is_null() {
            return Err(Error::InvalidArgument(
                "document content must not be null".into(),
            ));
        }

        let metadata =
            DocumentMetadata::new(raw.source, raw.url.clone(), raw.title.clone(), raw.tags);

        let mut state = self.state.write().expect("organizer lock poisoned");
        let id = state.store.add(metadata, raw.content);

        recompute_indices_for(&mut state, id);

        let version_number = state
            .store
            .get(id)
            .map(|d| d.versions.len())
            .unwrap_or_default();
        info!(document_id = %id, version_number, "ingest complete");
        Ok(id)
    }

    /// Replay a document that already has an id (used when rebuilding the
    /// indices for a deserialized collection): inserts the document as-is and
    /// updates the index/graph from its latest version's terms.
    pub fn ingest_existing(&self, doc: Document) {
        let mut state = self.state.write().expect("organizer lock poisoned");
        let id = doc.id;
        state.store.insert_existing(doc);
        recompute_indices_for(&mut state, id);
    }

    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: DocumentId) -> Option<Document> {
        let state = self.state.read().expect("organizer lock poisoned");
        state.store.get(id).cloned()
    }

    /// Exact-match lookup by url.
    #[must_use]
    pub fn find_by_url(&self, url: &str) -> Option<Document> {
        let state = self.state.read().expect("organizer lock poisoned");
        state.store.find_by_url(url).cloned()
    }

    /// Case-insensitive title search.
    #[must_use]
    pub fn find_by_title(&self, needle: &str, partial: bool) -> Vec<Document> {
        let state = self.state.read().expect("organizer lock poisoned");
        state
            .store
            .find_by_title(needle, partial)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Documents related to `doc_id`, materialized as compact read-only views.
    #[must_use]
    pub fn get_related(&self, doc_id: DocumentId) -> Vec<DocumentView> {
        let state = self.state.read().expect("organizer lock poisoned");
        state
            .graph
            .neighbors(doc_id)
            .into_iter()
            .filter_map(|id| state.store.get(id).map(DocumentView::from))
            .collect()
    }

    /// Rank every document currently held against `query`.
    #[instrument(skip(self))]
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let state = self.state.read().expect("organizer lock poisoned");
        let results = search::search(query, state.store.iter(), &state.index);
        debug!(query, result_count = results.len(), "search complete");
        results
    }

    /// Remove a document from the store, inverted index, and relatedness
    /// graph atomically. Returns whether anything was removed.
    #[instrument(skip(self))]
    pub fn delete(&self, doc_id: DocumentId) -> bool {
        let mut state = self.state.write().expect("organizer lock poisoned");
        let removed = state.store.delete(doc_id);
        if removed {
            state.index.remove(doc_id);
            state.graph.remove(doc_id);
            info!(document_id = %doc_id, "document deleted");
        }
        removed
    }

    /// Total number of documents currently held.
    #[must_use]
    pub fn document_count(&self) -> usize {
        let state = self.state.read().expect("organizer lock poisoned");
        state.store.len()
    }

    /// Iterate over a snapshot of every document currently held, newest id last.
    #[must_use]
    pub fn all_documents(&self) -> Vec<Document> {
        let state = self.state.read().expect("organizer lock poisoned");
        let mut docs: Vec<Document> = state.store.iter().cloned().collect();
        docs.sort_by_key(|d| d.id);
        docs
    }

    /// Thin passthrough to an external web-search API. Never fails: a
    /// misconfigured or unreachable backend, or a caller-imposed timeout,
    /// yields an empty sequence and a logged warning.
    pub async fn web_search(&self, query: &str, max_results: usize, timeout: Duration) -> Vec<WebSearchResult> {
        match tokio::time::timeout(timeout, self.web_search_client.search(query, max_results)).await
        {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                warn!(error = %e, "web_search external client failed");
                Vec::new()
            },
            Err(_) => {
                warn!("web_search timed out");
                Vec::new()
            },
        }
    }
}

impl Default for Organizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract terms from `id`'s current latest version, then recompute its
/// inverted-index postings and relatedness edges against the whole corpus.
/// Must be called with the write lock already held.
fn recompute_indices_for(state: &mut OrganizerState, id: DocumentId) {
    let Some(doc) = state.store.get(id) else {
        return;
    };
    let latest = doc.latest_version();
    let mut text_for_terms = latest.text().to_string();
    for heading in latest.heading_texts() {
        text_for_terms.push(' ');
        text_for_terms.push_str(heading);
    }
    let terms: HashSet<String> = extract_terms(&text_for_terms).into_iter().collect();

    state.index.remove(id);
    state.index.add(id, &terms);

    let all_terms: HashMap<DocumentId, HashSet<String>> = state
        .store
        .iter()
        .map(|d| {
            let mut text = d.latest_version().text().to_string();
            for h in d.latest_version().heading_texts() {
                text.push(' ');
                text.push_str(h);
            }
            (d.id, extract_terms(&text).into_iter().collect())
        })
        .collect();

    state
        .graph
        .recompute_for(id, &terms, &all_terms, &state.index);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_rejects_null_content() {
        let org = Organizer::new();
        let raw = RawDocument {
            url: "u".into(),
            title: "t".into(),
            source: "s".into(),
            tags: vec![],
            content: serde_json::Value::Null,
        };
        assert!(matches!(org.ingest(raw), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn scenario_get_after_ingest_matches_content() {
        let org = Organizer::new();
        let raw = RawDocument::new("u", "t", "hello world");
        let id = org.ingest(raw).expect("ingest");
        let doc = org.get(id).expect("present");
        assert_eq!(doc.latest_version().text(), "hello world");
    }

    #[test]
    fn scenario_reingest_appends_version_and_freezes_metadata() {
        let org = Organizer::new();
        let id1 = org.ingest(RawDocument::new("u", "t", "hello")).unwrap();
        let id2 = org
            .ingest(RawDocument::new("u", "different title", "hello world"))
            .unwrap();
        assert_eq!(id1, id2);

        let doc = org.get(id1).unwrap();
        assert_eq!(doc.versions.len(), 2);
        assert_eq!(doc.versions[0].version_number, 1);
        assert_eq!(doc.versions[0].text(), "hello");
        assert_eq!(doc.versions[1].version_number, 2);
        assert_eq!(doc.versions[1].text(), "hello world");
        assert_eq!(doc.metadata.title, "t");

        assert_eq!(org.search("world").len(), 1);
        assert_eq!(org.search("hello").len(), 1);
    }

    #[test]
    fn scenario_stop_word_only_document_has_no_terms_or_neighbors() {
        let org = Organizer::new();
        let id = org.ingest(RawDocument::new("u", "", "the and of")).unwrap();
        assert!(org.get_related(id).is_empty());
        assert!(org.search("the").is_empty());
        assert!(org.get(id).is_some());
    }

    #[test]
    fn scenario_delete_purges_everything() {
        let org = Organizer::new();
        let id = org.ingest(RawDocument::new("u", "t", "python programming")).unwrap();
        assert!(org.delete(id));
        assert!(org.get(id).is_none());
        assert!(org.search("python").is_empty());
        assert!(org.get_related(id).is_empty());
        assert!(!org.delete(id));
    }

    #[test]
    fn scenario_disjoint_documents_have_no_relation() {
        let org = Organizer::new();
        let id1 = org.ingest(RawDocument::new("u1", "A", "alpha beta")).unwrap();
        let _id2 = org.ingest(RawDocument::new("u2", "B", "gamma delta")).unwrap();
        assert!(org.get_related(id1).is_empty());
    }

    #[test]
    fn scenario_python_programming_end_to_end() {
        let org = Organizer::new();
        let d1 = org
            .ingest(RawDocument::new("u1", "Python Tutorial", "Learn python programming basics"))
            .unwrap();
        let d2 = org
            .ingest(RawDocument::new("u2", "Advanced Python", "Python programming patterns"))
            .unwrap();

        let results = org.search("python programming");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score >= 4));

        let neighbors = org.get_related(d1);
        assert!(neighbors.iter().any(|v| v.url == "u2"));
        let _ = d2;
    }

    #[tokio::test]
    async fn web_search_with_no_client_returns_empty() {
        let org = Organizer::new();
        let results = org.web_search("rust", 5, Duration::from_secs(1)).await;
        assert!(results.is_empty());
    }

    struct AlwaysFailsClient;

    #[async_trait::async_trait]
    impl WebSearchClient for AlwaysFailsClient {
        async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<WebSearchResult>> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Err(Error::ExternalUnavailable("boom".into()))
        }
    }

    #[tokio::test]
    async fn web_search_absorbs_client_failure() {
        let org = Organizer::new().with_web_search_client(Box::new(AlwaysFailsClient));
        let results = org.web_search("rust", 5, Duration::from_secs(1)).await;
        assert!(results.is_empty());
    }

    struct SlowClient;

    #[async_trait::async_trait]
    impl WebSearchClient for SlowClient {
        async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<WebSearchResult>> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn web_search_times_out_and_returns_empty() {
        let org = Organizer::new().with_web_search_client(Box::new(SlowClient));
        let results = org.web_search("rust", 5, Duration::from_millis(10)).await;
        assert!(results.is_empty());
    }
}
