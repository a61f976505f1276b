//! Exact line deduplication across the whole input set.
//!
//! Two strictly ordered passes. Pass 1 hashes every trimmed non-empty
//! line in every input and counts global occurrences. Pass 2 re-reads
//! each input and writes a line only when its global count is exactly 1.
//!
//! A line seen more than once anywhere, including repeats inside a
//! single file, is dropped from every location: duplicates are
//! annihilated, not collapsed to one copy. Downstream consumers depend
//! on this aggressive removal. Empty lines are never counted and never
//! written.
//!
//! Line identity is a truncated SHA-256 hash; distinct lines colliding
//! is an accepted, documented probabilistic risk at in-scope corpus
//! sizes (see [`crate::minhash::content_hash`]).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::corpus::document_id;
use crate::minhash::content_hash;

#[derive(Error, Debug)]
pub enum ExactError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input path {path} has no file name")]
    NoFileName { path: PathBuf },
}

/// Counts describing one exact-dedup run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactSummary {
    /// Inputs that were successfully counted and rewritten.
    pub files: usize,
    /// Total non-empty line occurrences across all inputs.
    pub lines_seen: u64,
    /// Distinct line values.
    pub distinct_lines: usize,
    /// Lines that occur exactly once globally (the survivors).
    pub unique_lines: usize,
}

/// Pass 1: count every trimmed non-empty line across all inputs.
///
/// Returns the global count map and the subset of paths that were read
/// successfully; only those take part in pass 2. Unreadable inputs are
/// skipped with a warning unless `strict` is set.
pub fn count_lines(
    paths: &[PathBuf],
    strict: bool,
) -> Result<(HashMap<u128, u64>, Vec<PathBuf>), ExactError> {
    // Per-file counting is independent; the merge below is the barrier
    // before pass 2 may begin.
    let per_file: Vec<Result<(PathBuf, HashMap<u128, u64>), ExactError>> = paths
        .par_iter()
        .map(|path| count_file_lines(path).map(|counts| (path.clone(), counts)))
        .collect();

    let mut counts: HashMap<u128, u64> = HashMap::new();
    let mut counted_paths = Vec::with_capacity(paths.len());

    for result in per_file {
        match result {
            Ok((path, file_counts)) => {
                for (hash, n) in file_counts {
                    *counts.entry(hash).or_insert(0) += n;
                }
                counted_paths.push(path);
            }
            Err(err) => {
                if strict {
                    return Err(err);
                }
                eprintln!("Warning: skipping file: {err}");
            }
        }
    }

    Ok((counts, counted_paths))
}

fn count_file_lines(path: &Path) -> Result<HashMap<u128, u64>, ExactError> {
    let file = std::fs::File::open(path).map_err(|source| ExactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut counts: HashMap<u128, u64> = HashMap::new();
    for line in reader.lines() {
        let line = line.map_err(|source| ExactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        *counts.entry(content_hash(line)).or_insert(0) += 1;
    }

    Ok(counts)
}

/// Pass 2: rewrite each input into `output_dir`, keeping only lines
/// whose global count is exactly 1. The count map is immutable here;
/// pass 1 must be complete across all files before this runs.
pub fn write_unique_lines(
    paths: &[PathBuf],
    counts: &HashMap<u128, u64>,
    output_dir: &Path,
    strict: bool,
) -> Result<u64, ExactError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ExactError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let written: Vec<Result<u64, ExactError>> = paths
        .par_iter()
        .map(|path| write_unique_file(path, counts, output_dir))
        .collect();

    let mut total = 0u64;
    for result in written {
        match result {
            Ok(n) => total += n,
            Err(err) => {
                if strict {
                    return Err(err);
                }
                eprintln!("Warning: skipping file: {err}");
            }
        }
    }

    Ok(total)
}

fn write_unique_file(
    path: &Path,
    counts: &HashMap<u128, u64>,
    output_dir: &Path,
) -> Result<u64, ExactError> {
    let id = document_id(path).map_err(|_| ExactError::NoFileName {
        path: path.to_path_buf(),
    })?;
    let output_path = output_dir.join(id);

    let file = std::fs::File::open(path).map_err(|source| ExactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let out = std::fs::File::create(&output_path).map_err(|source| ExactError::Write {
        path: output_path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(out);

    let mut written = 0u64;
    for line in reader.lines() {
        let line = line.map_err(|source| ExactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if counts.get(&content_hash(line)).copied() == Some(1) {
            writeln!(writer, "{line}").map_err(|source| ExactError::Write {
                path: output_path.clone(),
                source,
            })?;
            written += 1;
        }
    }

    writer.flush().map_err(|source| ExactError::Write {
        path: output_path.clone(),
        source,
    })?;

    Ok(written)
}

/// Full two-pass run over all inputs.
pub fn exact_line_dedup(
    paths: &[PathBuf],
    output_dir: &Path,
    strict: bool,
    show_progress: bool,
) -> Result<ExactSummary, ExactError> {
    if show_progress {
        eprintln!("Pass 1: counting lines across {} files...", paths.len());
    }
    let (counts, counted_paths) = count_lines(paths, strict)?;

    let lines_seen: u64 = counts.values().sum();
    let unique_lines = counts.values().filter(|&&n| n == 1).count();

    if show_progress {
        eprintln!(
            "  {} occurrences, {} distinct, {} globally unique",
            lines_seen,
            counts.len(),
            unique_lines
        );
        eprintln!("Pass 2: rewriting {} files...", counted_paths.len());
    }

    write_unique_lines(&counted_paths, &counts, output_dir, strict)?;

    Ok(ExactSummary {
        files: counted_paths.len(),
        lines_seen,
        distinct_lines: counts.len(),
        unique_lines,
    })
}
