//! Ranks documents against a query and produces explainable match reasons.

use crate::index::InvertedIndex;
use crate::text::extract_terms;
use crate::types::{Document, DocumentId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Query terms that award a score bonus independent of document content.
///
/// Preserved for fidelity with the reference implementation this behavior was
/// distilled from; see the design notes' open-question decision on this.
const PRIVILEGED_TAGS: &[&str] = &["python", "programming", "tutorial", "guide"];

/// One ranked search result: the matched document, its score, and the
/// human-readable reasons it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The matched document's id.
    pub document_id: DocumentId,
    /// Count of match events (see module docs for the scoring rule).
    pub score: u32,
    /// One entry per match event, in the order the events were detected.
    pub reasons: Vec<String>,
}

/// Score every document in `corpus` against `query` and return the matches in
/// descending score order (ties broken by ascending document id).
///
/// Never fails. An empty query (or one containing only stop words) yields an
/// empty result, as does a corpus with no matches.
#[must_use]
pub fn search<'a>(
    query: &str,
    corpus: impl IntoIterator<Item = &'a Document>,
    index: &InvertedIndex,
) -> Vec<SearchResult> {
    let query_terms = extract_terms(query);
    if query_terms.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for doc in corpus {
        let mut score = 0u32;
        let mut reasons = Vec::new();

        let title_terms = extract_terms(&doc.metadata.title);
        let body_terms = extract_terms(doc.latest_version().text());

        for term in &query_terms {
            if title_terms.contains(term) {
                score += 1;
                reasons.push(format!("Title contains: {term}"));
            }
            if body_terms.contains(term) {
                score += 1;
                reasons.push(format!("Text contains: {term}"));
            }
            if index.lookup(term).contains(&doc.id) {
                score += 1;
                reasons.push(format!("Document contains: {term}"));
            }
            if PRIVILEGED_TAGS.contains(&term.as_str()) {
                score += 1;
                reasons.push(format!("Tag match: {term}"));
            }
        }

        if score > 0 {
            results.push(SearchResult {
                document_id: doc.id,
                score,
                reasons,
            });
        }
    }

    results.sort_by(|a, b| b.score.cmp(&a.score).then(a.document_id.cmp(&b.document_id)));
    results
}

/// One opaque result from an external web-search passthrough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResult {
    /// Result title as reported by the external API.
    pub title: String,
    /// Result URL as reported by the external API.
    pub url: String,
    /// Short snippet as reported by the external API, if any.
    #[serde(default)]
    pub snippet: Option<String>,
}

/// The external web-search collaborator's interface. Injected so the
/// `Organizer` never depends on a concrete HTTP client and tests can
/// substitute a fake.
#[async_trait]
pub trait WebSearchClient: Send + Sync {
    /// Run `query` against the external API and return up to `max_results`
    /// opaque results. Implementations should return `Err` on failure; the
    /// caller (`Organizer::web_search`) absorbs it into an empty result.
    async fn search(&self, query: &str, max_results: usize) -> crate::Result<Vec<WebSearchResult>>;
}

/// A `WebSearchClient` that is never configured — `web_search` always returns
/// empty through it without attempting any I/O. The default when no client is
/// wired up.
#[derive(Debug, Default)]
pub struct UnconfiguredWebSearchClient;

#[async_trait]
impl WebSearchClient for UnconfiguredWebSearchClient {
    async fn search(&self, _query: &str, _max_results: usize) -> crate::Result<Vec<WebSearchResult>> {
        warn!("web_search called with no external search client configured");
        Err(crate::Error::ExternalUnavailable(
            "no web search client configured".into(),
        ))
    }
}
