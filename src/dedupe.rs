//! Merging of per-source exports with title deduplication.
//!
//! Academic databases export search results page by page, one BibTeX file
//! per page, into a directory per source:
//!
//! ```text
//! downloads/
//! ├── ieee/
//! │   ├── page1.bib
//! │   └── page2.bib
//! └── science_direct/
//!     └── page1.bib
//! ```
//!
//! [`merge_sources`] reads those files in a fixed order and splits the
//! records into a unified collection and the duplicates that were dropped.
//!
//! ## Matching
//!
//! Two records are duplicates when their titles are equal after
//! [`normalize_title`]. The first occurrence wins. Records without a title
//! all normalize to the empty string and are therefore duplicates of each
//! other.
//!
//! ## Usage
//!
//! ```rust
//! use bibsort::Record;
//! use bibsort::dedupe::merge_collections;
//!
//! let ieee = vec![
//!     Record::with_title("A Study", Some(2020)),
//!     Record::with_title("B Study", Some(2021)),
//! ];
//! let science_direct = vec![Record::with_title("a  study", Some(2020))];
//!
//! let outcome = merge_collections(&[ieee, science_direct]);
//! assert_eq!(outcome.unique.len(), 2);
//! assert_eq!(outcome.duplicates[0].title.as_deref(), Some("a  study"));
//! ```

use crate::bibtex::{BibtexWriter, read_records};
use crate::normalize::normalize_title;
use crate::{Record, RecordParser, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension of the export files read from each source directory.
const BIB_EXTENSION: &str = "bib";

/// Configuration of the source directories to merge.
///
/// # Examples
///
/// ```
/// use bibsort::dedupe::MergeConfig;
///
/// let config = MergeConfig::default();
/// assert_eq!(config.sources, vec!["ieee", "science_direct"]);
///
/// let config = MergeConfig::default().with_sources(["acm"]);
/// assert_eq!(config.sources, vec!["acm"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    /// Source directory names, read in this order.
    pub sources: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            sources: vec!["ieee".to_string(), "science_direct".to_string()],
        }
    }
}

impl MergeConfig {
    /// Replaces the source list. An empty list keeps the defaults.
    #[must_use]
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        if !sources.is_empty() {
            self.sources = sources;
        }
        self
    }
}

/// Result of a merge: the records kept and the ones dropped as duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    /// First occurrences, in input order.
    pub unique: Vec<Record>,
    /// Later occurrences, in input order.
    pub duplicates: Vec<Record>,
}

impl MergeOutcome {
    /// Writes the unified collection, and the duplicates when there are any.
    ///
    /// # Errors
    ///
    /// Returns an error when either file cannot be written.
    pub fn write<P, Q>(&self, unified_path: P, duplicates_path: Q, writer: &BibtexWriter) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        writer.write_file(unified_path, &self.unique)?;
        if !self.duplicates.is_empty() {
            writer.write_file(duplicates_path, &self.duplicates)?;
        }
        Ok(())
    }
}

/// Splits records into first occurrences and duplicates by normalized title.
fn partition_duplicates<I>(records: I) -> MergeOutcome
where
    I: IntoIterator<Item = Record>,
{
    let mut seen = HashSet::new();
    let mut outcome = MergeOutcome::default();

    for record in records {
        let key = record.title.as_deref().map(normalize_title).unwrap_or_default();
        if seen.insert(key) {
            outcome.unique.push(record);
        } else {
            outcome.duplicates.push(record);
        }
    }

    outcome
}

/// Merges collections in the given order, dropping repeated titles.
///
/// Every input record ends up in exactly one of `unique` or `duplicates`.
pub fn merge_collections(collections: &[Vec<Record>]) -> MergeOutcome {
    let outcome = partition_duplicates(collections.iter().flatten().cloned());
    debug!(
        unique = outcome.unique.len(),
        duplicates = outcome.duplicates.len(),
        "merged collections"
    );
    outcome
}

/// Reads every source directory under `base_dir` and merges the records.
///
/// Within a source, `*.bib` files are read in lexicographic file-name
/// order. A source directory that does not exist contributes nothing.
///
/// # Errors
///
/// Returns an error when a directory or file cannot be read, or when a
/// file cannot be parsed.
pub fn merge_sources<S: AsRef<str>>(
    base_dir: impl AsRef<Path>,
    sources: &[S],
    parser: &impl RecordParser,
) -> Result<MergeOutcome> {
    let base_dir = base_dir.as_ref();
    let mut records = Vec::new();

    for source in sources {
        let dir = base_dir.join(source.as_ref());
        let Some(files) = source_files(&dir)? else {
            warn!(dir = %dir.display(), "source directory not found, skipping");
            continue;
        };

        let before = records.len();
        for file in files {
            records.extend(read_records(&file, parser)?);
        }
        info!(
            source = source.as_ref(),
            records = records.len() - before,
            "loaded source"
        );
    }

    let outcome = partition_duplicates(records);
    info!(
        unique = outcome.unique.len(),
        duplicates = outcome.duplicates.len(),
        "merged sources"
    );
    Ok(outcome)
}

/// Lists the `*.bib` files of `dir` sorted by name, or `None` when `dir` is missing.
fn source_files(dir: &Path) -> Result<Option<Vec<PathBuf>>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_bib = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(BIB_EXTENSION));
        if is_bib && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(Some(files))
}
