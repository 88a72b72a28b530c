//! Tokenization, stop-word filtering, and term-set similarity.
//!
//! Every operation here is pure and total: no input can make `tokenize`,
//! `remove_stop_words`, `extract_terms`, or `jaccard` fail.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("static regex is valid"));

/// Fixed English stop-word set: articles, auxiliaries, prepositions, conjunctions.
///
/// Deliberately not configurable (see the design notes on internationalization);
/// varying this between instances would break the inverted index invariant that
/// term membership is a pure function of content.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "is", "am", "are", "was", "were",
    "be", "been", "being", "have", "has", "had", "do", "does", "did", "will", "would", "shall",
    "should", "may", "might", "must", "can", "could", "in", "on", "at", "by", "for", "with",
    "about", "to", "from", "of", "as", "this", "that", "these", "those", "it", "its",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Split `text` on non-word-character boundaries and lower-case each piece.
///
/// "Word character" follows Unicode semantics (letters, digits, underscore) via
/// the `regex` crate's default Unicode mode. Duplicates are preserved and order
/// matches first occurrence in `text`. Empty input yields an empty vector.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Filter a fixed English stop-word set out of `tokens`.
#[must_use]
pub fn remove_stop_words(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| !STOP_WORD_SET.contains(t.as_str()))
        .collect()
}

/// Tokenize then remove stop words in one pass.
#[must_use]
pub fn extract_terms(text: &str) -> Vec<String> {
    remove_stop_words(tokenize(text))
}

/// Jaccard similarity `|A ∩ B| / |A ∪ B|` for two term sets.
///
/// Returns `0.0` when either set is empty, including when both are empty.
#[must_use]
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    #[allow(clippy::cast_precision_loss)]
    {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_and_lowercases() {
        assert_eq!(
            tokenize("Learn Python, Programming!"),
            vec!["learn", "python", "programming"]
        );
    }

    #[test]
    fn tokenize_empty_is_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn tokenize_keeps_numbers_and_underscores() {
        assert_eq!(tokenize("python3 my_var"), vec!["python3", "my_var"]);
    }

    #[test]
    fn remove_stop_words_filters_fixed_set() {
        let tokens = tokenize("the quick fox is in the box");
        let terms = remove_stop_words(tokens);
        assert_eq!(terms, vec!["quick", "fox", "box"]);
    }

    #[test]
    fn extract_terms_on_stop_word_only_text_is_empty() {
        assert!(extract_terms("the and of").is_empty());
    }

    #[test]
    fn jaccard_empty_sets_is_zero() {
        let a: HashSet<String> = HashSet::new();
        let b: HashSet<String> = HashSet::new();
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn jaccard_one_empty_is_zero() {
        let a: HashSet<String> = ["x".to_string()].into_iter().collect();
        let b: HashSet<String> = HashSet::new();
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn jaccard_partial_overlap() {
        let a: HashSet<String> = ["python", "programming", "basics"]
            .into_iter()
            .map(String::from)
            .collect();
        let b: HashSet<String> = ["python", "programming", "patterns"]
            .into_iter()
            .map(String::from)
            .collect();
        // intersection = {python, programming} = 2, union = 4
        assert!((jaccard(&a, &b) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_identical_sets_is_one() {
        let a: HashSet<String> = ["x", "y"].into_iter().map(String::from).collect();
        assert!((jaccard(&a, &a) - 1.0).abs() < f64::EPSILON);
    }

    proptest::proptest! {
        #[test]
        fn jaccard_always_in_unit_range(
            a in proptest::collection::hash_set("[a-z]{1,5}", 0..10),
            b in proptest::collection::hash_set("[a-z]{1,5}", 0..10),
        ) {
            let sim = jaccard(&a, &b);
            proptest::prop_assert!((0.0..=1.0).contains(&sim));
        }

        #[test]
        fn tokenize_is_idempotent_on_its_own_output(text in "[a-zA-Z0-9 ]{0,40}") {
            let once = tokenize(&text);
            let joined = once.join(" ");
            let twice = tokenize(&joined);
            proptest::prop_assert_eq!(once, twice);
        }
    }
}
