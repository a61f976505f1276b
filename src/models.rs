//! Data structures for the corpus deduplication pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::minhash::minhash_signature;
use crate::normalize::normalize_text;
use crate::shingle::word_ngrams;

/// One input document, with all derived state computed at construction.
///
/// A document is built once per batch run and is immutable afterwards:
/// the raw text is what gets written back out if the document survives,
/// the shingle set is what verification compares, and the signature is
/// what LSH banding operates on.
#[derive(Debug, Clone)]
pub struct Document {
    /// Stable identifier (input base name, or caller-chosen label).
    pub id: String,
    /// Original text, emitted unmodified if this document is retained.
    pub raw: String,
    /// Canonical comparable form of the raw text.
    pub normalized: String,
    /// Word n-gram set over the normalized text.
    pub shingles: HashSet<String>,
    /// MinHash signature, always `num_hashes` components long.
    pub signature: Vec<u128>,
}

impl Document {
    /// Build a document from raw text, deriving the normalized form,
    /// shingle set, and MinHash signature.
    pub fn new(id: String, raw: String, params: &DedupParams) -> Self {
        let normalized = normalize_text(&raw);
        let shingles = word_ngrams(&normalized, params.ngram_length);
        let signature = minhash_signature(&shingles, params.num_hashes);
        Document {
            id,
            raw,
            normalized,
            shingles,
            signature,
        }
    }

    /// A document with no shingles (shorter than `ngram_length` words).
    /// Such documents carry the sentinel signature and still participate
    /// in clustering.
    pub fn is_content_empty(&self) -> bool {
        self.shingles.is_empty()
    }
}

/// Parameter validation failures. Checked before any I/O.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("num_hashes must be positive")]
    ZeroHashes,
    #[error("num_bands must be positive")]
    ZeroBands,
    #[error("ngram_length must be at least 1")]
    ZeroNgram,
    #[error("num_hashes ({num_hashes}) must be evenly divisible by num_bands ({num_bands})")]
    BandMismatch { num_hashes: usize, num_bands: usize },
    #[error("jaccard_threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
}

/// MinHash deduplication parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupParams {
    /// Number of independent hash functions per signature.
    pub num_hashes: usize,
    /// Number of LSH bands; must evenly divide `num_hashes`.
    pub num_bands: usize,
    /// Shingle length in words.
    pub ngram_length: usize,
    /// Exact-Jaccard threshold a candidate pair must meet to be merged.
    pub jaccard_threshold: f64,
    /// Abort the whole run on the first per-document failure instead of
    /// skipping the document.
    pub strict: bool,
}

impl Default for DedupParams {
    fn default() -> Self {
        Self {
            num_hashes: 128,
            num_bands: 16,
            ngram_length: 5,
            jaccard_threshold: 0.8,
            strict: false,
        }
    }
}

impl DedupParams {
    /// Signature rows in each band. Only meaningful after `validate`.
    pub fn rows_per_band(&self) -> usize {
        self.num_hashes / self.num_bands
    }

    /// Fail fast on configuration errors, before any file is touched.
    /// Band counts are never rounded or truncated to fit.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.num_hashes == 0 {
            return Err(ParamsError::ZeroHashes);
        }
        if self.num_bands == 0 {
            return Err(ParamsError::ZeroBands);
        }
        if self.ngram_length == 0 {
            return Err(ParamsError::ZeroNgram);
        }
        if self.num_hashes % self.num_bands != 0 {
            return Err(ParamsError::BandMismatch {
                num_hashes: self.num_hashes,
                num_bands: self.num_bands,
            });
        }
        if !(0.0..=1.0).contains(&self.jaccard_threshold) {
            return Err(ParamsError::ThresholdOutOfRange(self.jaccard_threshold));
        }
        Ok(())
    }
}

/// Counts describing one MinHash deduplication run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupSummary {
    pub documents: usize,
    pub empty_documents: usize,
    pub candidate_pairs: usize,
    pub verified_pairs: usize,
    pub clusters: usize,
    pub duplicate_clusters: usize,
    pub retained: usize,
    pub dropped: usize,
}

/// One cluster in the run report: the surviving document plus every
/// member (representative included).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterReport {
    pub representative: String,
    pub members: Vec<String>,
}

/// Full machine-readable result of a MinHash deduplication run.
#[derive(Debug, Serialize, Deserialize)]
pub struct DedupReport {
    pub version: String,
    pub parameters: DedupParams,
    pub summary: DedupSummary,
    pub clusters: Vec<ClusterReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(DedupParams::default().validate().is_ok());
        assert_eq!(DedupParams::default().rows_per_band(), 8);
    }

    #[test]
    fn test_band_mismatch_rejected() {
        let params = DedupParams {
            num_hashes: 100,
            num_bands: 13,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::BandMismatch {
                num_hashes: 100,
                num_bands: 13
            })
        );
    }

    #[test]
    fn test_zero_counts_rejected() {
        let mut params = DedupParams {
            num_hashes: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::ZeroHashes));

        params.num_hashes = 16;
        params.num_bands = 0;
        assert_eq!(params.validate(), Err(ParamsError::ZeroBands));

        params.num_bands = 4;
        params.ngram_length = 0;
        assert_eq!(params.validate(), Err(ParamsError::ZeroNgram));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let params = DedupParams {
            jaccard_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::ThresholdOutOfRange(_))
        ));
    }

    #[test]
    fn test_document_signature_length() {
        let params = DedupParams::default();
        let doc = Document::new(
            "a".into(),
            "the quick brown fox jumps over the lazy dog".into(),
            &params,
        );
        assert_eq!(doc.signature.len(), params.num_hashes);
        assert!(!doc.is_content_empty());
    }

    #[test]
    fn test_short_document_is_content_empty() {
        let params = DedupParams::default();
        let doc = Document::new("a".into(), "too short".into(), &params);
        assert!(doc.is_content_empty());
        assert_eq!(doc.signature.len(), params.num_hashes);
    }
}
