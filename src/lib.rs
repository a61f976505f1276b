//! Corpus Deduplication Library
//!
//! Batch removal of exact and near-duplicate content from text corpora.
//! Near-duplicate documents are found with word-shingle MinHash
//! signatures and LSH banding, verified with exact Jaccard similarity,
//! and clustered with union-find; one representative per cluster is
//! kept. A separate two-pass exact deduplicator removes every line that
//! occurs more than once anywhere in the input set.
//!
//! # Example
//!
//! ```no_run
//! use corpus_dedup::prelude::*;
//! use std::path::Path;
//!
//! let paths = vec!["a.txt".into(), "b.txt".into()];
//! let params = DedupParams::default();
//!
//! let report = run_minhash_deduplication(
//!     &paths,
//!     &params,
//!     Path::new("out/"),
//!     SelectionPolicy::Deterministic,
//!     None,
//!     false,
//! ).unwrap();
//!
//! println!("Retained {} of {} documents", report.summary.retained, report.summary.documents);
//! ```
//!
//! # In-memory example
//!
//! ```
//! use corpus_dedup::prelude::*;
//!
//! let params = DedupParams::default();
//! let docs = prepare_documents(
//!     vec![
//!         ("a".to_string(), "the quick brown fox jumps over the lazy dog".to_string()),
//!         ("b".to_string(), "the quick brown fox jumps over the lazy dog".to_string()),
//!     ],
//!     &params,
//!     false,
//! );
//! let outcome = deduplicate(&docs, &params, SelectionPolicy::Deterministic, false).unwrap();
//! assert_eq!(outcome.retained.len(), 1);
//! ```

pub mod cluster;
pub mod corpus;
pub mod dedup;
pub mod exact;
pub mod lsh;
pub mod minhash;
pub mod models;
pub mod normalize;
pub mod output;
pub mod shingle;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cluster::UnionFind;
    pub use crate::corpus::{document_id, load_documents, CleanFn, CorpusError, RawDocument};
    pub use crate::dedup::{
        build_report, deduplicate, prepare_documents, run_minhash_deduplication, DedupError,
        DedupOutcome, SelectionPolicy,
    };
    pub use crate::exact::{
        count_lines, exact_line_dedup, write_unique_lines, ExactError, ExactSummary,
    };
    pub use crate::lsh::{band_buckets, candidate_pairs, BucketKey};
    pub use crate::minhash::{content_hash, minhash_signature, EMPTY_SENTINEL};
    pub use crate::models::{
        ClusterReport, DedupParams, DedupReport, DedupSummary, Document, ParamsError,
    };
    pub use crate::normalize::normalize_text;
    pub use crate::output::{
        print_exact_summary, print_summary, write_report_json, write_report_json_file,
        write_retained_documents, OutputError,
    };
    pub use crate::shingle::{jaccard_similarity, word_ngrams};
}

// Re-export commonly used types at the crate root
pub use dedup::{DedupError, DedupOutcome, SelectionPolicy};
pub use models::{DedupParams, DedupReport, Document};
