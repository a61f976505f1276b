//! MinHash signature generation.
//!
//! Each signature component is the minimum over the shingle set of a
//! deterministic 128-bit hash seeded by the component index. Because the
//! same (shingle, seed) pair always hashes to the same value, the
//! probability that two documents agree on a component approximates the
//! Jaccard similarity of their shingle sets.
//!
//! Hashes are SHA-256 digests truncated to their first 16 bytes. Two
//! distinct shingles (or lines) colliding on a truncated digest is an
//! accepted probabilistic risk, negligible at in-scope corpus sizes, and
//! is not handled specially.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Signature component for documents with no shingles. The maximum
/// representable hash value cannot be produced by any real shingle in
/// practice, so an empty document never matches a non-empty one.
pub const EMPTY_SENTINEL: u128 = u128::MAX;

fn truncate128(digest: &[u8]) -> u128 {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(bytes)
}

/// 128-bit content hash of arbitrary text (SHA-256 truncated).
///
/// Used for exact line identity; equal text always produces equal
/// hashes across runs and machines.
pub fn content_hash(text: &str) -> u128 {
    truncate128(&Sha256::digest(text.as_bytes()))
}

/// Hash one shingle under hash-function index `seed`.
fn seeded_shingle_hash(seed: u64, shingle: &str) -> u128 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(shingle.as_bytes());
    truncate128(&hasher.finalize())
}

/// Compute the fixed-length MinHash signature of a shingle set.
///
/// The result always has exactly `num_hashes` components. An empty
/// shingle set yields [`EMPTY_SENTINEL`] in every component.
pub fn minhash_signature(shingles: &HashSet<String>, num_hashes: usize) -> Vec<u128> {
    (0..num_hashes as u64)
        .map(|seed| {
            shingles
                .iter()
                .map(|s| seeded_shingle_hash(seed, s))
                .min()
                .unwrap_or(EMPTY_SENTINEL)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shingles(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_signature_length() {
        let s = shingles(&["a b", "b c"]);
        assert_eq!(minhash_signature(&s, 1).len(), 1);
        assert_eq!(minhash_signature(&s, 64).len(), 64);
        assert_eq!(minhash_signature(&HashSet::new(), 64).len(), 64);
    }

    #[test]
    fn test_empty_set_gets_sentinel() {
        let sig = minhash_signature(&HashSet::new(), 8);
        assert!(sig.iter().all(|&v| v == EMPTY_SENTINEL));
    }

    #[test]
    fn test_deterministic_across_calls() {
        let s = shingles(&["the quick brown", "quick brown fox"]);
        assert_eq!(minhash_signature(&s, 32), minhash_signature(&s, 32));
    }

    #[test]
    fn test_identical_sets_identical_signatures() {
        // Insertion order must not matter: sets are unordered
        let a = shingles(&["x y", "y z", "z w"]);
        let b = shingles(&["z w", "x y", "y z"]);
        assert_eq!(minhash_signature(&a, 32), minhash_signature(&b, 32));
    }

    #[test]
    fn test_different_sets_differ() {
        let a = shingles(&["completely different content here"]);
        let b = shingles(&["nothing shared with the other"]);
        assert_ne!(minhash_signature(&a, 32), minhash_signature(&b, 32));
    }

    #[test]
    fn test_nonempty_never_sentinel() {
        let s = shingles(&["a"]);
        let sig = minhash_signature(&s, 16);
        assert!(sig.iter().all(|&v| v != EMPTY_SENTINEL));
    }

    #[test]
    fn test_content_hash_stable() {
        assert_eq!(content_hash("some line"), content_hash("some line"));
        assert_ne!(content_hash("some line"), content_hash("other line"));
    }

    #[test]
    fn test_seed_separates_hash_functions() {
        assert_ne!(seeded_shingle_hash(0, "a b c"), seeded_shingle_hash(1, "a b c"));
    }
}
