//! The inverted index: term -> set of document ids.

use crate::types::DocumentId;
use std::collections::{HashMap, HashSet};

/// Maps normalized terms to the set of document ids whose latest version
/// contains them. `add` is idempotent; `remove` drops a term entry once its
/// set is empty so `lookup` on a stale term returns an empty set rather than
/// a dangling one.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    terms: HashMap<String, HashSet<DocumentId>>,
}

impl InvertedIndex {
    /// An empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `doc_id` into every term's posting set. Re-adding an existing
    /// (term, id) pair is a no-op.
    pub fn add(&mut self, doc_id: DocumentId, terms: &HashSet<String>) {
        for term in terms {
            self.terms.entry(term.clone()).or_default().insert(doc_id);
        }
    }

    /// Remove `doc_id` from every term's posting set, dropping any term entry
    /// whose set becomes empty as a result.
    pub fn remove(&mut self, doc_id: DocumentId) {
        self.terms.retain(|_, ids| {
            ids.remove(&doc_id);
            !ids.is_empty()
        });
    }

    /// The set of document ids containing `term` (already normalized).
    #[must_use]
    pub fn lookup(&self, term: &str) -> HashSet<DocumentId> {
        self.terms.get(term).cloned().unwrap_or_default()
    }

    /// Document ids that share at least one term with `terms` — the candidate
    /// set the relatedness graph narrows its comparisons to.
    #[must_use]
    pub fn candidates_sharing_any_term(&self, terms: &HashSet<String>) -> HashSet<DocumentId> {
        let mut out = HashSet::new();
        for term in terms {
            if let Some(ids) = self.terms.get(term) {
                out.extend(ids.iter().copied());
            }
        }
        out
    }

    /// Number of distinct terms currently indexed.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> DocumentId {
        DocumentId(n)
    }

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn add_then_lookup_round_trips() {
        let mut idx = InvertedIndex::new();
        idx.add(id(1), &set(&["python", "programming"]));
        assert_eq!(idx.lookup("python"), [id(1)].into_iter().collect());
        assert_eq!(idx.lookup("missing"), HashSet::new());
    }

    #[test]
    fn add_is_idempotent() {
        let mut idx = InvertedIndex::new();
        idx.add(id(1), &set(&["python"]));
        idx.add(id(1), &set(&["python"]));
        assert_eq!(idx.lookup("python").len(), 1);
    }

    #[test]
    fn remove_drops_empty_term_entries() {
        let mut idx = InvertedIndex::new();
        idx.add(id(1), &set(&["python"]));
        idx.add(id(2), &set(&["python"]));
        idx.remove(id(1));
        assert_eq!(idx.lookup("python"), [id(2)].into_iter().collect());
        idx.remove(id(2));
        assert_eq!(idx.lookup("python"), HashSet::new());
        assert_eq!(idx.term_count(), 0);
    }

    #[test]
    fn candidates_sharing_any_term_unions_postings() {
        let mut idx = InvertedIndex::new();
        idx.add(id(1), &set(&["alpha"]));
        idx.add(id(2), &set(&["beta"]));
        idx.add(id(3), &set(&["alpha", "gamma"]));
        let candidates = idx.candidates_sharing_any_term(&set(&["alpha", "beta"]));
        assert_eq!(candidates, [id(1), id(2), id(3)].into_iter().collect());
    }
}
