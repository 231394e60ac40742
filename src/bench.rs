//! Timing of every sorting strategy on the same collection.
//!
//! Each algorithm sorts its own copy of the input, so earlier runs never
//! hand later ones a presorted collection.
//!
//! ```rust
//! use bibsort::{Algorithm, Record};
//! use bibsort::bench::Benchmark;
//!
//! let records: Vec<Record> = (0..50)
//!     .map(|i| Record::with_title(&format!("Title {}", 50 - i), Some(2000 + i % 7)))
//!     .collect();
//!
//! let report = Benchmark::new()
//!     .with_algorithms([Algorithm::QuickSort, Algorithm::RadixSort])
//!     .run(&records);
//!
//! assert_eq!(report.timings.len(), 2);
//! assert_eq!(report.ranking().len(), 2);
//! ```

use crate::compare::is_sorted;
use crate::sort::{Algorithm, SortConfig, Sorter};
use crate::{BibError, Record, Result};
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Outcome of one timed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The algorithm returned a sorted collection.
    Ok,
    /// The algorithm returned, but verification found the output out of order.
    Unsorted,
    /// The algorithm rejected the input.
    Failed,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Ok => "ok",
            RunStatus::Unsorted => "unsorted",
            RunStatus::Failed => "failed",
        }
    }
}

/// Timing of one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmTiming {
    #[serde(serialize_with = "serialize_name")]
    pub algorithm: Algorithm,
    #[serde(rename = "seconds", serialize_with = "serialize_seconds")]
    pub duration: Duration,
    pub records: usize,
    pub status: RunStatus,
    /// Error message when the run failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn serialize_name<S>(algorithm: &Algorithm, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(algorithm)
}

fn serialize_seconds<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Timings of one benchmark run, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub records: usize,
    pub timings: Vec<AlgorithmTiming>,
}

impl BenchmarkReport {
    /// Successful runs from fastest to slowest.
    ///
    /// Failed runs are left out. Equal durations keep registration order.
    pub fn ranking(&self) -> Vec<&AlgorithmTiming> {
        let mut ranked: Vec<&AlgorithmTiming> = self
            .timings
            .iter()
            .filter(|timing| timing.status != RunStatus::Failed)
            .collect();
        ranked.sort_by_key(|timing| timing.duration);
        ranked
    }

    /// Timing for `algorithm`, if it was registered.
    pub fn get(&self, algorithm: Algorithm) -> Option<&AlgorithmTiming> {
        self.timings.iter().find(|timing| timing.algorithm == algorithm)
    }

    /// Renders the timings as CSV with an `algorithm,seconds,records,status` header.
    ///
    /// # Errors
    ///
    /// Returns `BibError::InvalidFormat` if the CSV writer fails.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["algorithm", "seconds", "records", "status"])?;
        for timing in &self.timings {
            writer.write_record([
                timing.algorithm.name().to_string(),
                format!("{:.9}", timing.duration.as_secs_f64()),
                timing.records.to_string(),
                timing.status.as_str().to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| BibError::InvalidFormat(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| BibError::InvalidFormat(err.to_string()))
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `BibError::InvalidFormat` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| BibError::InvalidFormat(err.to_string()))
    }
}

/// Benchmark harness.
#[derive(Debug, Clone)]
pub struct Benchmark {
    algorithms: Vec<Algorithm>,
    sorter: Sorter,
    verify: bool,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new()
    }
}

impl Benchmark {
    /// Creates a benchmark over every algorithm with the default sort configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            sorter: Sorter::new(),
            verify: false,
        }
    }

    /// Restricts the run to `algorithms`, in the given order. An empty list keeps all of them.
    #[must_use]
    pub fn with_algorithms<I: IntoIterator<Item = Algorithm>>(mut self, algorithms: I) -> Self {
        let algorithms: Vec<Algorithm> = algorithms.into_iter().collect();
        if !algorithms.is_empty() {
            self.algorithms = algorithms;
        }
        self
    }

    #[must_use]
    pub fn with_sort_config(mut self, config: SortConfig) -> Self {
        self.sorter = Sorter::new().with_config(config);
        self
    }

    /// Checks every output with [`is_sorted`] after timing it.
    #[must_use]
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    /// Times each registered algorithm on its own copy of `records`.
    pub fn run(&self, records: &[Record]) -> BenchmarkReport {
        let mut timings = Vec::with_capacity(self.algorithms.len());

        for &algorithm in &self.algorithms {
            let working = records.to_vec();
            let start = Instant::now();
            let result = self.sorter.sort(algorithm, &working);
            let duration = start.elapsed();

            let timing = match result {
                Ok(sorted) => {
                    let status = if self.verify && !is_sorted(&sorted) {
                        error!(%algorithm, "output is not sorted");
                        RunStatus::Unsorted
                    } else {
                        RunStatus::Ok
                    };
                    info!(%algorithm, seconds = duration.as_secs_f64(), "benchmark run");
                    AlgorithmTiming {
                        algorithm,
                        duration,
                        records: sorted.len(),
                        status,
                        error: None,
                    }
                }
                Err(err) => {
                    warn!(%algorithm, error = %err, "algorithm rejected input");
                    AlgorithmTiming {
                        algorithm,
                        duration,
                        records: working.len(),
                        status: RunStatus::Failed,
                        error: Some(err.to_string()),
                    }
                }
            };
            timings.push(timing);
        }

        BenchmarkReport {
            records: records.len(),
            timings,
        }
    }
}
