//! MinHash deduplication pipeline orchestration.
//!
//! Coordinates the full batch pass: load, normalize/shingle/sign (in
//! parallel per document), bucket, extract candidates, verify with
//! exact Jaccard (in parallel per pair), cluster with union-find
//! (sequentially), select one representative per cluster, and write the
//! retained documents out unchanged.

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cluster::UnionFind;
use crate::corpus::{load_documents, CleanFn, CorpusError};
use crate::lsh::{band_buckets, candidate_pairs};
use crate::models::{
    ClusterReport, DedupParams, DedupReport, DedupSummary, Document, ParamsError,
};
use crate::output::{write_retained_documents, OutputError};
use crate::shingle::jaccard_similarity;

#[derive(Error, Debug)]
pub enum DedupError {
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),
    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

/// How the surviving document of each cluster is chosen.
///
/// Selection is an arbitrary choice among members, not a quality
/// ranking. `Random` matches the reference behavior; `Deterministic`
/// picks the lexicographically smallest identifier so repeated runs and
/// tests produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionPolicy {
    #[default]
    Random,
    Deterministic,
}

impl SelectionPolicy {
    /// Choose one member of a non-empty cluster.
    pub fn choose(&self, members: &[usize], docs: &[Document]) -> Option<usize> {
        match self {
            SelectionPolicy::Random => {
                if members.is_empty() {
                    None
                } else {
                    Some(members[rand::thread_rng().gen_range(0..members.len())])
                }
            }
            SelectionPolicy::Deterministic => members
                .iter()
                .copied()
                .min_by(|&a, &b| docs[a].id.cmp(&docs[b].id)),
        }
    }
}

/// Result of clustering one document batch.
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// Every cluster (singletons included); members are indices into the
    /// document slice, in increasing order.
    pub clusters: Vec<Vec<usize>>,
    /// Indices of documents that survive, in increasing order.
    pub retained: Vec<usize>,
    /// Candidate pairs emitted by banding, before verification.
    pub candidate_count: usize,
    /// Candidate pairs whose exact Jaccard met the threshold.
    pub verified_count: usize,
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Build documents from (id, raw text) pairs, deriving normalized text,
/// shingle sets, and signatures in parallel. Input order is preserved.
pub fn prepare_documents(
    inputs: Vec<(String, String)>,
    params: &DedupParams,
    show_progress: bool,
) -> Vec<Document> {
    let progress = if show_progress {
        Some(progress_bar(inputs.len() as u64))
    } else {
        None
    };

    let docs: Vec<Document> = inputs
        .into_par_iter()
        .map(|(id, text)| {
            let doc = Document::new(id, text, params);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            doc
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    docs
}

/// Run banding, verification, clustering, and representative selection
/// over an already-prepared document batch.
pub fn deduplicate(
    docs: &[Document],
    params: &DedupParams,
    policy: SelectionPolicy,
    show_progress: bool,
) -> Result<DedupOutcome, DedupError> {
    params.validate()?;

    // Banding is the merge point: every document's band keys must be in
    // the bucket map before any pair can be extracted.
    if show_progress {
        eprintln!(
            "Bucketing {} signatures into {} bands...",
            docs.len(),
            params.num_bands
        );
    }
    let signatures: Vec<&[u128]> = docs.iter().map(|d| d.signature.as_slice()).collect();
    let buckets = band_buckets(&signatures, params.num_bands);
    let candidates: Vec<(usize, usize)> = candidate_pairs(&buckets).into_iter().collect();

    if show_progress {
        eprintln!("  Candidate pairs: {}", candidates.len());
        eprintln!(
            "Verifying candidates (exact Jaccard, threshold {:.2})...",
            params.jaccard_threshold
        );
    }

    // Banding is approximate; each candidate is confirmed against the
    // true shingle-set similarity so banding false positives never reach
    // the clustering step.
    let progress = if show_progress {
        Some(progress_bar(candidates.len() as u64))
    } else {
        None
    };

    let verified: Vec<(usize, usize)> = candidates
        .par_iter()
        .filter_map(|&(i, j)| {
            let sim = jaccard_similarity(&docs[i].shingles, &docs[j].shingles);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            (sim >= params.jaccard_threshold).then_some((i, j))
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if show_progress {
        eprintln!("  Verified pairs: {}", verified.len());
    }

    // Union-find mutation is sequential after verification.
    let mut uf = UnionFind::new(docs.len());
    for &(i, j) in &verified {
        uf.union(i, j);
    }
    let clusters = uf.clusters();

    let mut retained: Vec<usize> = clusters
        .iter()
        .filter_map(|members| policy.choose(members, docs))
        .collect();
    retained.sort_unstable();

    Ok(DedupOutcome {
        clusters,
        retained,
        candidate_count: candidates.len(),
        verified_count: verified.len(),
    })
}

/// Full filesystem run: load input paths, deduplicate, write each
/// retained document's original content into `output_dir` under its
/// input base name.
pub fn run_minhash_deduplication(
    paths: &[PathBuf],
    params: &DedupParams,
    output_dir: &Path,
    policy: SelectionPolicy,
    clean: Option<&CleanFn>,
    show_progress: bool,
) -> Result<DedupReport, DedupError> {
    // Configuration errors surface before any input is opened.
    params.validate()?;

    if show_progress {
        eprintln!("Loading {} input documents...", paths.len());
    }
    let raw = load_documents(paths, clean, params.strict)?;

    if show_progress {
        eprintln!("Computing signatures for {} documents...", raw.len());
    }
    let inputs: Vec<(String, String)> = raw.into_iter().map(|d| (d.id, d.text)).collect();
    let docs = prepare_documents(inputs, params, show_progress);

    let outcome = deduplicate(&docs, params, policy, show_progress)?;

    if show_progress {
        eprintln!("Writing {} retained documents...", outcome.retained.len());
    }
    write_retained_documents(&docs, &outcome.retained, output_dir)?;

    Ok(build_report(&docs, &outcome, params))
}

/// Assemble the machine-readable run report.
pub fn build_report(docs: &[Document], outcome: &DedupOutcome, params: &DedupParams) -> DedupReport {
    let retained: std::collections::HashSet<usize> = outcome.retained.iter().copied().collect();

    let clusters: Vec<ClusterReport> = outcome
        .clusters
        .iter()
        .map(|members| {
            let representative = members
                .iter()
                .find(|i| retained.contains(i))
                .map(|&i| docs[i].id.clone())
                .unwrap_or_default();
            ClusterReport {
                representative,
                members: members.iter().map(|&i| docs[i].id.clone()).collect(),
            }
        })
        .collect();

    let duplicate_clusters = outcome.clusters.iter().filter(|c| c.len() > 1).count();

    DedupReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        parameters: params.clone(),
        summary: DedupSummary {
            documents: docs.len(),
            empty_documents: docs.iter().filter(|d| d.is_content_empty()).count(),
            candidate_pairs: outcome.candidate_count,
            verified_pairs: outcome.verified_count,
            clusters: outcome.clusters.len(),
            duplicate_clusters,
            retained: outcome.retained.len(),
            dropped: docs.len() - outcome.retained.len(),
        },
        clusters,
    }
}
