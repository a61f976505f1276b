//! Output writing: retained documents, JSON run reports, console summaries.

use crate::exact::ExactSummary;
use crate::models::{DedupReport, Document};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write every retained document's original content into `output_dir`,
/// one file per document named by its identifier. Content is emitted
/// byte-for-byte unmodified.
pub fn write_retained_documents(
    docs: &[Document],
    retained: &[usize],
    output_dir: &Path,
) -> Result<usize, OutputError> {
    std::fs::create_dir_all(output_dir)?;

    for &idx in retained {
        let doc = &docs[idx];
        std::fs::write(output_dir.join(&doc.id), &doc.raw)?;
    }

    Ok(retained.len())
}

/// Write a run report as pretty-printed JSON.
pub fn write_report_json<W: Write>(report: &DedupReport, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(report)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write a run report as JSON to a file.
pub fn write_report_json_file(report: &DedupReport, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_report_json(report, &mut file)
}

/// Print a human-readable summary of a MinHash run to stdout.
pub fn print_summary(report: &DedupReport) {
    println!("\n=== Deduplication Summary ===");
    println!("Version: {}", report.version);
    println!();
    println!("Parameters:");
    println!("  Num hashes: {}", report.parameters.num_hashes);
    println!("  Num bands: {}", report.parameters.num_bands);
    println!("  N-gram length: {}", report.parameters.ngram_length);
    println!(
        "  Jaccard threshold: {:.2}",
        report.parameters.jaccard_threshold
    );
    println!();
    println!("Results:");
    println!("  Documents: {}", report.summary.documents);
    println!("  Empty documents: {}", report.summary.empty_documents);
    println!("  Candidate pairs: {}", report.summary.candidate_pairs);
    println!("  Verified pairs: {}", report.summary.verified_pairs);
    println!(
        "  Clusters: {} ({} with duplicates)",
        report.summary.clusters, report.summary.duplicate_clusters
    );
    println!(
        "  Retained: {} / dropped: {}",
        report.summary.retained, report.summary.dropped
    );
}

/// Print a human-readable summary of an exact-dedup run to stdout.
pub fn print_exact_summary(summary: &ExactSummary) {
    println!("\n=== Exact Line Dedup Summary ===");
    println!("Files processed: {}", summary.files);
    println!("Line occurrences: {}", summary.lines_seen);
    println!("Distinct lines: {}", summary.distinct_lines);
    println!("Globally unique (written): {}", summary.unique_lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClusterReport, DedupParams, DedupSummary};
    use tempfile::TempDir;

    fn sample_report() -> DedupReport {
        DedupReport {
            version: "0.0.0".into(),
            parameters: DedupParams::default(),
            summary: DedupSummary {
                documents: 2,
                empty_documents: 0,
                candidate_pairs: 1,
                verified_pairs: 1,
                clusters: 1,
                duplicate_clusters: 1,
                retained: 1,
                dropped: 1,
            },
            clusters: vec![ClusterReport {
                representative: "a.txt".into(),
                members: vec!["a.txt".into(), "b.txt".into()],
            }],
        }
    }

    #[test]
    fn test_write_retained_preserves_raw_content() {
        let dir = TempDir::new().unwrap();
        let params = DedupParams::default();
        let docs = vec![
            Document::new("a.txt".into(), "Raw, Unmodified!  Content\n".into(), &params),
            Document::new("b.txt".into(), "dropped".into(), &params),
        ];

        let written = write_retained_documents(&docs, &[0], dir.path()).unwrap();
        assert_eq!(written, 1);

        let content = std::fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(content, "Raw, Unmodified!  Content\n");
        assert!(!dir.path().join("b.txt").exists());
    }

    #[test]
    fn test_report_json_round_trip() {
        let mut buf = Vec::new();
        write_report_json(&sample_report(), &mut buf).unwrap();

        let parsed: DedupReport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.summary.documents, 2);
        assert_eq!(parsed.clusters[0].representative, "a.txt");
    }

    #[test]
    fn test_report_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        write_report_json_file(&sample_report(), &path).unwrap();
        assert!(path.exists());
    }
}
