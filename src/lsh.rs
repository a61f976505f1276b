//! LSH banding: bucket construction and candidate pair extraction.
//!
//! The standard banding trick: each signature is sliced into
//! `num_bands` contiguous bands of `rows_per_band` components, and
//! documents agreeing on a full band land in the same bucket. Similar
//! documents are far more likely to agree on at least one band, giving
//! sub-quadratic candidate generation in expectation. Banding only
//! produces candidates; pairs that never collide on any band are missed,
//! a false-negative rate inherent to the (num_hashes, num_bands)
//! choice, which verification cannot recover.

use std::collections::{HashMap, HashSet};

/// Bucket key: band index plus that band's slice of the signature.
pub type BucketKey = (usize, Vec<u128>);

/// Group documents by band value.
///
/// Returns a map from bucket key to the indices of all documents whose
/// signature carries that band value. Signatures must all be the same
/// length and `num_bands` must divide it; callers validate this before
/// any document is processed.
pub fn band_buckets<S: AsRef<[u128]>>(
    signatures: &[S],
    num_bands: usize,
) -> HashMap<BucketKey, Vec<usize>> {
    let mut buckets: HashMap<BucketKey, Vec<usize>> = HashMap::new();
    let Some(first) = signatures.first() else {
        return buckets;
    };
    let rows_per_band = first.as_ref().len() / num_bands;

    for (doc_idx, sig) in signatures.iter().enumerate() {
        let sig = sig.as_ref();
        for band in 0..num_bands {
            let start = band * rows_per_band;
            let slice = sig[start..start + rows_per_band].to_vec();
            buckets.entry((band, slice)).or_default().push(doc_idx);
        }
    }

    buckets
}

/// Derive all unordered candidate pairs from the bucket map.
///
/// Every bucket holding two or more documents contributes each of its
/// pairs; a pair co-occurring in several bands is stored once
/// (canonicalized with the smaller index first).
pub fn candidate_pairs(buckets: &HashMap<BucketKey, Vec<usize>>) -> HashSet<(usize, usize)> {
    let mut pairs = HashSet::new();

    for docs in buckets.values() {
        if docs.len() < 2 {
            continue;
        }
        for (i, &a) in docs.iter().enumerate() {
            for &b in &docs[i + 1..] {
                let pair = if a < b { (a, b) } else { (b, a) };
                pairs.insert(pair);
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let signatures: Vec<Vec<u128>> = Vec::new();
        let buckets = band_buckets(&signatures, 4);
        assert!(buckets.is_empty());
        assert!(candidate_pairs(&buckets).is_empty());
    }

    #[test]
    fn test_identical_signatures_collide_in_every_band() {
        let sig = vec![1u128, 2, 3, 4, 5, 6, 7, 8];
        let buckets = band_buckets(&[sig.clone(), sig], 4);

        // 4 bands, both docs share each bucket
        assert_eq!(buckets.len(), 4);
        for docs in buckets.values() {
            assert_eq!(docs, &vec![0, 1]);
        }

        let pairs = candidate_pairs(&buckets);
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&(0, 1)));
    }

    #[test]
    fn test_disjoint_signatures_never_collide() {
        let a = vec![1u128, 2, 3, 4];
        let b = vec![5u128, 6, 7, 8];
        let buckets = band_buckets(&[a, b], 2);
        assert!(candidate_pairs(&buckets).is_empty());
    }

    #[test]
    fn test_single_band_agreement_is_enough() {
        // Docs agree on the first band only
        let a = vec![1u128, 2, 30, 40];
        let b = vec![1u128, 2, 50, 60];
        let buckets = band_buckets(&[a, b], 2);
        let pairs = candidate_pairs(&buckets);
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&(0, 1)));
    }

    #[test]
    fn test_partial_band_agreement_is_not_enough() {
        // Same first component, but no full band matches
        let a = vec![1u128, 2, 3, 4];
        let b = vec![1u128, 9, 3, 9];
        let buckets = band_buckets(&[a, b], 2);
        assert!(candidate_pairs(&buckets).is_empty());
    }

    #[test]
    fn test_pairs_canonicalized_and_deduplicated() {
        // Three identical docs: 3 pairs, each once, smaller index first
        let sig = vec![7u128, 7, 7, 7];
        let buckets = band_buckets(&[sig.clone(), sig.clone(), sig], 4);
        let pairs = candidate_pairs(&buckets);
        assert_eq!(pairs.len(), 3);
        for &(a, b) in &pairs {
            assert!(a < b);
        }
    }

    #[test]
    fn test_band_slicing_offsets() {
        // 6 components, 3 bands: agreement only on the middle band
        let a = vec![1u128, 2, 3, 4, 5, 6];
        let b = vec![9u128, 9, 3, 4, 9, 9];
        let buckets = band_buckets(&[a, b], 3);
        let pairs = candidate_pairs(&buckets);
        assert_eq!(pairs.len(), 1);
    }
}
