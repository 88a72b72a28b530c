//! The relatedness graph: an undirected association between documents whose
//! term sets are similar enough.

use crate::index::InvertedIndex;
use crate::text::jaccard;
use crate::types::DocumentId;
use std::collections::{HashMap, HashSet};

/// Default Jaccard threshold at or above which two documents are considered
/// related.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.2;

/// An undirected graph on document ids, stored as an adjacency map with both
/// endpoints written for each edge so `neighbors` is O(1).
#[derive(Debug)]
pub struct RelatednessGraph {
    edges: HashMap<DocumentId, HashSet<DocumentId>>,
    threshold: f64,
}

impl RelatednessGraph {
    /// A new, empty graph using `threshold` as its Jaccard cutoff.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            edges: HashMap::new(),
            threshold,
        }
    }

    /// The ids related to `doc_id`.
    #[must_use]
    pub fn neighbors(&self, doc_id: DocumentId) -> HashSet<DocumentId> {
        self.edges.get(&doc_id).cloned().unwrap_or_default()
    }

    /// Drop all edges incident to `doc_id`.
    pub fn remove(&mut self, doc_id: DocumentId) {
        if let Some(neighbors) = self.edges.remove(&doc_id) {
            for other in neighbors {
                if let Some(set) = self.edges.get_mut(&other) {
                    set.remove(&doc_id);
                }
            }
        }
    }

    /// Recompute every edge incident to `doc_id` against the rest of the
    /// corpus, adding edges that newly satisfy the Jaccard threshold and
    /// dropping ones that no longer do.
    ///
    /// `index` narrows the comparison to documents sharing at least one term
    /// with `current_terms` — this produces an identical edge set to a full
    /// O(N) scan because two term sets with empty intersection have Jaccard
    /// similarity 0, which never meets a positive threshold.
    pub fn recompute_for(
        &mut self,
        doc_id: DocumentId,
        current_terms: &HashSet<String>,
        all_documents_terms: &HashMap<DocumentId, HashSet<String>>,
        index: &InvertedIndex,
    ) {
        self.remove(doc_id);
        if current_terms.is_empty() {
            return;
        }

        let candidates = index.candidates_sharing_any_term(current_terms);
        for other_id in candidates {
            if other_id == doc_id {
                continue;
            }
            let Some(other_terms) = all_documents_terms.get(&other_id) else {
                continue;
            };
            if jaccard(current_terms, other_terms) >= self.threshold {
                self.edges.entry(doc_id).or_default().insert(other_id);
                self.edges.entry(other_id).or_default().insert(doc_id);
            }
        }
    }
}
