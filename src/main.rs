//! bibsort - merge, sort and benchmark BibTeX exports
//!
//! ## Usage
//!
//! ```bash
//! bibsort merge --base-dir downloads --output unified.bib --duplicates repeated.bib
//! bibsort sort --input unified.bib --output sorted.bib --algorithm radix
//! bibsort bench --input unified.bib --csv timings.csv --verify
//! bibsort authors --input unified.bib --top 15
//! ```

use anyhow::{Context, Result};
use bibsort::bench::Benchmark;
use bibsort::bibtex::read_records;
use bibsort::dedupe::{MergeConfig, merge_sources};
use bibsort::tally::AuthorTally;
use bibsort::{Algorithm, BibtexParser, BibtexWriter, Record, SortConfig, Sorter};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Merge, deduplicate, sort and benchmark BibTeX exports
#[derive(Parser)]
#[command(name = "bibsort")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the per-source exports into one file without repeated titles
    Merge {
        /// Directory holding one sub-directory per source
        #[arg(long, default_value = "downloads")]
        base_dir: PathBuf,

        /// Source directory names, read in order (default: ieee, science_direct)
        #[arg(long = "source")]
        sources: Vec<String>,

        /// Unified output file
        #[arg(short, long, default_value = "unified.bib")]
        output: PathBuf,

        /// File receiving the dropped duplicates, written only when there are any
        #[arg(long, default_value = "duplicates.bib")]
        duplicates: PathBuf,

        /// Spaces of field indentation
        #[arg(long, default_value_t = 4)]
        indent: usize,
    },

    /// Sort a BibTeX file by year and title
    Sort {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Sorting algorithm (see `bibsort algorithms`)
        #[arg(short, long, default_value = "timsort")]
        algorithm: Algorithm,

        /// Years per bucket for bucket sort
        #[arg(long, default_value_t = 5)]
        bucket_span: u32,

        /// Leave key ties in whatever order the algorithm produces
        #[arg(long)]
        unstable: bool,

        /// Spaces of field indentation
        #[arg(long, default_value_t = 4)]
        indent: usize,
    },

    /// Time every algorithm on the same input
    Bench {
        #[arg(short, long)]
        input: PathBuf,

        /// Algorithms to run, in order (default: all)
        #[arg(short, long = "algorithm")]
        algorithms: Vec<Algorithm>,

        /// Write the timings as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Check that every output is sorted
        #[arg(long)]
        verify: bool,
    },

    /// Show the most frequent authors
    Authors {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, default_value_t = 15)]
        top: usize,
    },

    /// List the available algorithms
    Algorithms,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Merge {
            base_dir,
            sources,
            output,
            duplicates,
            indent,
        } => {
            let config = MergeConfig::default().with_sources(sources);
            let outcome = merge_sources(&base_dir, &config.sources, &BibtexParser::new())
                .with_context(|| format!("failed to merge exports under {}", base_dir.display()))?;
            outcome
                .write(&output, &duplicates, &BibtexWriter::with_indent(indent))
                .context("failed to write merged files")?;

            info!(
                unique = outcome.unique.len(),
                duplicates = outcome.duplicates.len(),
                output = %output.display(),
                "merge complete"
            );
        }

        Commands::Sort {
            input,
            output,
            algorithm,
            bucket_span,
            unstable,
            indent,
        } => {
            let records = load(&input)?;
            let sorter = Sorter::new().with_config(SortConfig {
                bucket_span,
                stable: !unstable,
                ..Default::default()
            });
            let sorted = sorter
                .sort(algorithm, &records)
                .with_context(|| format!("{} sort failed", algorithm))?;
            BibtexWriter::with_indent(indent)
                .write_file(&output, &sorted)
                .with_context(|| format!("failed to write {}", output.display()))?;

            info!(%algorithm, records = sorted.len(), output = %output.display(), "sort complete");
        }

        Commands::Bench {
            input,
            algorithms,
            csv,
            json,
            verify,
        } => {
            let records = load(&input)?;
            let report = Benchmark::new()
                .with_algorithms(algorithms)
                .with_verify(verify)
                .run(&records);

            if let Some(path) = csv {
                fs::write(&path, report.to_csv()?)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }

            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{:<18} {:>12}", "algorithm", "seconds");
                for timing in report.ranking() {
                    println!(
                        "{:<18} {:>12.6}",
                        timing.algorithm.name(),
                        timing.duration.as_secs_f64()
                    );
                }
                for timing in report.timings.iter().filter(|t| t.error.is_some()) {
                    println!(
                        "{:<18} {:>12}",
                        timing.algorithm.name(),
                        timing.status.as_str()
                    );
                }
            }
        }

        Commands::Authors { input, top } => {
            let records = load(&input)?;
            let tally = AuthorTally::from_records(&records);
            for (name, count) in tally.top(top) {
                println!("{:>5}  {}", count, name);
            }
            info!(authors = tally.len(), "tally complete");
        }

        Commands::Algorithms => {
            for algorithm in Algorithm::ALL {
                let stability = if algorithm.is_natively_stable() {
                    "stable"
                } else {
                    "unstable"
                };
                let kind = if algorithm.is_distribution() {
                    "distribution"
                } else {
                    "comparison"
                };
                println!("{:<18} {:<13} {}", algorithm.name(), kind, stability);
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Vec<Record>> {
    read_records(path, &BibtexParser::new())
        .with_context(|| format!("failed to read {}", path.display()))
}
