//! Corpus Deduplication Pipeline
//!
//! Removes exact duplicate lines and clusters near-duplicate documents
//! across a text corpus, retaining one representative per cluster.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cluster;
mod corpus;
mod dedup;
mod exact;
mod lsh;
mod minhash;
mod models;
mod normalize;
mod output;
mod shingle;

use corpus::load_documents;
use dedup::{prepare_documents, run_minhash_deduplication, SelectionPolicy};
use exact::exact_line_dedup;
use models::DedupParams;
use output::{print_exact_summary, print_summary, write_report_json_file};
use shingle::word_ngrams;

#[derive(Parser)]
#[command(name = "corpus-dedup")]
#[command(about = "Exact and MinHash/LSH near-duplicate removal for text corpora")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Near-duplicate document removal via MinHash + LSH
    ///
    /// Parameters default to DedupParams::default(). Override any
    /// parameter explicitly to customize behavior.
    Minhash {
        /// Input files, one document each
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for retained documents
        #[arg(long)]
        output: PathBuf,

        /// Number of MinHash functions [default: 128]
        #[arg(long)]
        num_hashes: Option<usize>,

        /// Number of LSH bands; must divide num-hashes [default: 16]
        #[arg(long)]
        num_bands: Option<usize>,

        /// Shingle length in words [default: 5]
        #[arg(long)]
        ngram_length: Option<usize>,

        /// Exact-Jaccard threshold for verified duplicates [default: 0.8]
        #[arg(long)]
        threshold: Option<f64>,

        /// Keep the lexicographically smallest identifier per cluster
        /// instead of a random member (reproducible runs)
        #[arg(long)]
        deterministic: bool,

        /// Abort on the first unreadable document instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Also write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Suppress progress output
        #[arg(long)]
        quiet: bool,
    },

    /// Exact line deduplication across all inputs
    ///
    /// A line occurring more than once anywhere in the input set is
    /// removed from every file, not collapsed to one copy.
    Exact {
        /// Input files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for rewritten files
        #[arg(long)]
        output: PathBuf,

        /// Abort on the first unreadable file instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Suppress progress output
        #[arg(long)]
        quiet: bool,
    },

    /// Show corpus statistics
    Stats {
        /// Input files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Shingle length used for the unique-shingle count
        #[arg(long, default_value = "5")]
        ngram_length: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Minhash {
            inputs,
            output,
            num_hashes,
            num_bands,
            ngram_length,
            threshold,
            deterministic,
            strict,
            report,
            quiet,
        } => {
            // Overlay user-specified values onto library defaults
            let defaults = DedupParams::default();
            let params = DedupParams {
                num_hashes: num_hashes.unwrap_or(defaults.num_hashes),
                num_bands: num_bands.unwrap_or(defaults.num_bands),
                ngram_length: ngram_length.unwrap_or(defaults.ngram_length),
                jaccard_threshold: threshold.unwrap_or(defaults.jaccard_threshold),
                strict,
            };

            let policy = if deterministic {
                SelectionPolicy::Deterministic
            } else {
                SelectionPolicy::Random
            };

            let run_report =
                run_minhash_deduplication(&inputs, &params, &output, policy, None, !quiet)?;

            if let Some(report_path) = report {
                write_report_json_file(&run_report, &report_path)?;
                if !quiet {
                    eprintln!("Report: {}", report_path.display());
                }
            }

            if !quiet {
                print_summary(&run_report);
                eprintln!("\nOutput: {}", output.display());
            }
        }

        Commands::Exact {
            inputs,
            output,
            strict,
            quiet,
        } => {
            let summary = exact_line_dedup(&inputs, &output, strict, !quiet)?;

            if !quiet {
                print_exact_summary(&summary);
                eprintln!("\nOutput: {}", output.display());
            }
        }

        Commands::Stats {
            inputs,
            ngram_length,
        } => {
            let raw = load_documents(&inputs, None, false)?;
            let params = DedupParams {
                ngram_length,
                ..Default::default()
            };
            let doc_inputs: Vec<(String, String)> =
                raw.into_iter().map(|d| (d.id, d.text)).collect();
            let docs = prepare_documents(doc_inputs, &params, false);

            let total_words: usize = docs
                .iter()
                .map(|d| d.normalized.split_whitespace().count())
                .sum();
            let empty_docs = docs.iter().filter(|d| d.is_content_empty()).count();

            let mut all_shingles = std::collections::HashSet::new();
            for doc in &docs {
                all_shingles.extend(word_ngrams(&doc.normalized, ngram_length));
            }

            println!("=== Corpus Statistics ===");
            println!("Documents: {}", docs.len());
            println!("Empty documents (< {ngram_length} words): {empty_docs}");
            println!("Total words (normalized): {total_words}");
            println!("Unique {ngram_length}-gram shingles: {}", all_shingles.len());
        }
    }

    Ok(())
}
