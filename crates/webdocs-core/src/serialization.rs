//! Converts the entire document collection to and from the portable,
//! self-describing JSON form documented in the external interfaces section.
//!
//! The inverted index and relatedness graph are never serialized; they are
//! rebuilt on load by replaying each document's latest-version terms through
//! the organizer's ingest path with id-preservation (see [`load_into`]).

use crate::error::Result;
use crate::organizer::Organizer;
use crate::types::Document;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// The top-level persisted form: one key, `documents`, mapping id strings to
/// full document records.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedCollection {
    /// Every document, keyed by its hex-string id.
    pub documents: BTreeMap<String, Document>,
}

/// Serialize every document an [`Organizer`] currently holds into the
/// portable form.
#[must_use]
pub fn to_portable(organizer: &Organizer) -> PersistedCollection {
    let documents = organizer
        .all_documents()
        .into_iter()
        .map(|doc| (doc.id.to_string(), doc))
        .collect();
    PersistedCollection { documents }
}

/// Serialize an [`Organizer`]'s documents to a JSON string.
///
/// # Errors
///
/// Returns [`crate::Error::Serialization`] if JSON encoding fails.
pub fn to_json(organizer: &Organizer) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_portable(organizer))?)
}

/// Parse the portable JSON form. Does not populate an organizer; callers
/// should follow up with [`load_into`].
///
/// On a format error, the caller's documented fallback is to start a fresh,
/// empty collection rather than propagate — see [`load_into_or_empty`].
///
/// # Errors
///
/// Returns [`crate::Error::Serialization`] if `json` is not valid JSON or
/// does not match the persisted schema.
pub fn from_json(json: &str) -> Result<PersistedCollection> {
    Ok(serde_json::from_str(json)?)
}

/// Replay every document in `collection` into `organizer`, preserving ids and
/// rebuilding the inverted index and relatedness graph from each document's
/// latest-version terms as a side effect of the replay.
pub fn load_into(organizer: &Organizer, collection: PersistedCollection) {
    let count = collection.documents.len();
    for (_, doc) in collection.documents {
        organizer.ingest_existing(doc);
    }
    info!(document_count = count, "rebuilt indices from persisted collection");
}

/// Parse and replay `json` into `organizer`. On a serialization failure,
/// leaves `organizer` untouched (equivalent to starting from a fresh, empty
/// collection) and logs a warning, matching the documented load-failure
/// behavior rather than propagating.
pub fn load_into_or_empty(organizer: &Organizer, json: &str) {
    match from_json(json) {
        Ok(collection) => load_into(organizer, collection),
        Err(e) => warn!(error = %e, "failed to deserialize persisted collection; continuing empty"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawDocument;

    #[test]
    fn round_trip_preserves_documents() {
        let org = Organizer::new();
        org.ingest(RawDocument::new("u1", "A", "alpha beta")).unwrap();
        org.ingest(RawDocument::new("u2", "B", "gamma delta")).unwrap();

        let json = to_json(&org).expect("serialize");
        let parsed = from_json(&json).expect("deserialize");
        assert_eq!(parsed.documents.len(), 2);

        let reserialized = serde_json::to_string_pretty(&to_portable(&org)).expect("reserialize");
        let reparsed: PersistedCollection = serde_json::from_str(&reserialized).expect("reparse");
        assert_eq!(reparsed.documents.len(), parsed.documents.len());
    }

    #[test]
    fn load_into_rebuilds_search_and_preserves_ids() {
        let org = Organizer::new();
        let id = org.ingest(RawDocument::new("u1", "A", "alpha beta")).unwrap();
        let portable = to_portable(&org);

        let fresh = Organizer::new();
        load_into(&fresh, portable);

        assert_eq!(fresh.get(id).map(|d| d.id), Some(id));
        let results = fresh.search("alpha");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document_id, id);
    }

    #[test]
    fn malformed_json_leaves_organizer_empty_rather_than_failing() {
        let org = Organizer::new();
        load_into_or_empty(&org, "not json at all");
        assert_eq!(org.document_count(), 0);
    }

    #[test]
    fn field_names_match_documented_schema() {
        let org = Organizer::new();
        org.ingest(RawDocument::new("u", "Title", "text body")).unwrap();
        let json = to_json(&org).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let doc = value["documents"].as_object().unwrap().values().next().unwrap();
        assert!(doc.get("id").is_some());
        assert!(doc.get("metadata").is_some());
        assert!(doc.get("versions").is_some());
        let metadata = &doc["metadata"];
        for key in ["source", "url", "title", "timestamp", "tags", "custom_attributes"] {
            assert!(metadata.get(key).is_some(), "missing metadata.{key}");
        }
        let version = &doc["versions"][0];
        for key in ["content", "version_number", "timestamp"] {
            assert!(version.get(key).is_some(), "missing versions[0].{key}");
        }
    }
}
