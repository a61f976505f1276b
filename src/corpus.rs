//! Document loading from the filesystem.
//!
//! Inputs are read-only; each path resolves to one document whose
//! identifier is its base name. Per-document read or decode failures
//! are reported and the document excluded from the run, unless the
//! caller requests strict mode, in which case the first failure aborts.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8")]
    Decode { path: PathBuf },
    #[error("input path {path} has no file name")]
    NoFileName { path: PathBuf },
}

/// Optional text-extraction collaborator.
///
/// When supplied, it receives the raw bytes of each input and returns
/// the cleaned text, or `None` to skip the document entirely (the
/// extraction subsystem deciding there is nothing usable). Its
/// internals are outside this crate.
pub type CleanFn = dyn Fn(&[u8]) -> Option<String> + Sync;

/// A loaded input prior to any derived computation.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Base name of the source path; used to name the output file.
    pub id: String,
    pub path: PathBuf,
    pub text: String,
}

/// Load every input path into memory.
///
/// With `clean` supplied, each document's bytes pass through the
/// extraction hook; a `None` result drops that document silently. Without
/// it, bytes are decoded as UTF-8. Unreadable or undecodable inputs are
/// skipped with a warning unless `strict` is set.
pub fn load_documents(
    paths: &[PathBuf],
    clean: Option<&CleanFn>,
    strict: bool,
) -> Result<Vec<RawDocument>, CorpusError> {
    let mut docs = Vec::with_capacity(paths.len());
    let mut seen_ids: HashSet<String> = HashSet::new();

    for path in paths {
        let id = document_id(path)?;

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(source) => {
                let err = CorpusError::Read {
                    path: path.clone(),
                    source,
                };
                if strict {
                    return Err(err);
                }
                eprintln!("Warning: skipping document: {err}");
                continue;
            }
        };

        let text = match clean {
            Some(clean) => match clean(&bytes) {
                Some(text) => text,
                None => continue,
            },
            None => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    let err = CorpusError::Decode { path: path.clone() };
                    if strict {
                        return Err(err);
                    }
                    eprintln!("Warning: skipping document: {err}");
                    continue;
                }
            },
        };

        if !seen_ids.insert(id.clone()) {
            eprintln!(
                "Warning: duplicate base name {id:?}; outputs will overwrite each other"
            );
        }

        docs.push(RawDocument {
            id,
            path: path.clone(),
            text,
        });
    }

    Ok(docs)
}

/// Document identifier for a source path: its base name.
pub fn document_id(path: &Path) -> Result<String, CorpusError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CorpusError::NoFileName {
            path: path.to_path_buf(),
        })
}
