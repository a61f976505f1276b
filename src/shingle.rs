//! Word n-gram shingling and exact Jaccard similarity.
//!
//! Shingles are space-joined runs of `n` consecutive words from the
//! normalized text. Only membership matters, so they are collected into
//! a set and repeated runs collapse.

use std::collections::HashSet;

/// Extract the set of word n-grams from normalized text.
///
/// Words are split on whitespace only; no stemming or stop-word removal.
/// A document with fewer than `n` words yields the empty set, which is
/// not an error.
pub fn word_ngrams(text: &str, n: usize) -> HashSet<String> {
    if n == 0 {
        return HashSet::new();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < n {
        return HashSet::new();
    }

    words.windows(n).map(|w| w.join(" ")).collect()
}

/// Exact Jaccard similarity |A∩B| / |A∪B| between two shingle sets.
///
/// Two empty sets are defined as identical (1.0) rather than undefined:
/// both have no content. Symmetric by construction.
pub fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}
