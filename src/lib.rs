//! Merge, deduplicate, sort and benchmark bibliographic citation exports.
//!
//! `bibsort` takes the BibTeX files exported page by page from academic
//! databases, unifies them into one collection without duplicate titles,
//! and orders that collection by publication year and normalized title with
//! any of twelve classic sorting algorithms.
//!
//! # Key Features
//!
//! - **BibTeX codec**: parse `@article{...}` style exports (braced and quoted
//!   values, `@string` macros, `#` concatenation) and write them back with a
//!   configurable indent.
//! - **Title normalization**: LaTeX braces, commands and diacritics are
//!   removed before titles are compared or deduplicated.
//! - **Twelve sorting strategies** sharing one comparator: timsort, comb,
//!   selection, tree, bucket, pigeonhole, quick, heap, bitonic, gnome,
//!   binary insertion and radix.
//! - **Benchmarking** of every strategy on the same input, with CSV/JSON
//!   export of the timings.
//! - **Author tally** of the most frequent authors in a collection.
//!
//! # Basic Usage
//!
//! ```rust
//! use bibsort::{Algorithm, BibtexParser, RecordParser, sort_records};
//!
//! let input = r#"@article{b, title = {Zebra}, year = {2021}}
//! @article{a, title = {Apple}, year = {2019}}"#;
//!
//! let records = BibtexParser::new().parse(input).unwrap();
//! let sorted = sort_records(Algorithm::QuickSort, &records).unwrap();
//! assert_eq!(sorted[0].title.as_deref(), Some("Apple"));
//! ```
//!
//! # Merging Exports
//!
//! ```rust
//! use bibsort::{Record, dedupe::merge_collections};
//!
//! let ieee = vec![Record::with_title("A Study", Some(2020))];
//! let science_direct = vec![Record::with_title("a study", Some(2020))];
//!
//! let outcome = merge_collections(&[ieee, science_direct]);
//! assert_eq!(outcome.unique.len(), 1);
//! assert_eq!(outcome.duplicates.len(), 1);
//! ```
//!
//! # Error Handling
//!
//! The library uses a custom [`Result`] type that wraps [`BibError`].
//! Malformed field values never produce errors: a year that cannot be read
//! becomes `None` and sorts with the [`compare::MISSING_YEAR`] sentinel.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

pub mod bench;
pub mod bibtex;
pub mod compare;
pub mod dedupe;
pub mod normalize;
mod regex;
pub mod sort;
pub mod tally;

// Reexports
pub use bibtex::{BibtexParser, BibtexWriter, EntryType};
pub use compare::{SortKey, compare_records};
pub use normalize::normalize_title;
pub use sort::{Algorithm, SortConfig, SortError, Sorter, sort_records};

static AUTHOR_SEPARATOR: LazyLock<crate::regex::Regex> =
    LazyLock::new(|| crate::regex::Regex::new(r"(?i)\s+and\s+").unwrap());

/// A specialized Result type for bibliographic operations.
pub type Result<T> = std::result::Result<T, BibError>;

/// Represents errors that can occur while reading, merging or sorting records.
#[derive(Error, Debug)]
pub enum BibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    InvalidFormat(String),

    #[error("Invalid field value: {field} - {message}")]
    InvalidFieldValue { field: String, message: String },

    #[error("Malformed input: {message} at line {line}")]
    MalformedInput { message: String, line: usize },

    #[error("Sort error: {0}")]
    Sort(#[from] SortError),
}

impl From<csv::Error> for BibError {
    fn from(err: csv::Error) -> Self {
        BibError::InvalidFormat(err.to_string())
    }
}

/// A single bibliographic record.
///
/// `title`, `author` and `year` are the fields the pipeline reads; everything
/// else an export carries is kept in `extra_fields` so it can be written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Random identifier assigned when the record is created
    pub id: String,
    /// BibTeX entry type
    pub entry_type: EntryType,
    /// Citation key, empty when the export had none
    pub cite_key: String,
    /// Title as it appears in the source, markup included
    pub title: Option<String>,
    /// Author names joined by ` and `
    pub author: Option<String>,
    /// Publication year, `None` when absent or unreadable
    pub year: Option<i32>,
    /// Remaining fields keyed by lower-case field name
    pub extra_fields: BTreeMap<CompactString, String>,
}

impl Record {
    /// Creates an empty `@article` record with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: nanoid::nanoid!(),
            ..Default::default()
        }
    }

    /// Creates a record carrying only a title and an optional year.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibsort::Record;
    ///
    /// let record = Record::with_title("Deep Learning", Some(2016));
    /// assert_eq!(record.year, Some(2016));
    /// ```
    #[must_use]
    pub fn with_title(title: &str, year: Option<i32>) -> Self {
        Self {
            title: Some(title.to_string()),
            year,
            ..Self::new()
        }
    }

    /// Returns the author names, split on the ` and ` separator.
    pub fn authors(&self) -> Vec<&str> {
        self.author
            .as_deref()
            .map(split_authors)
            .unwrap_or_default()
    }
}

/// Splits a BibTeX author list on the ` and ` token.
///
/// The token is matched case-insensitively and must be surrounded by
/// whitespace, so names such as "Anderson" are left intact.
pub fn split_authors(authors: &str) -> Vec<&str> {
    AUTHOR_SEPARATOR
        .split(authors.trim())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Trait for implementing record parsers.
pub trait RecordParser {
    /// Parse a string containing zero or more records.
    ///
    /// # Errors
    ///
    /// Returns `BibError` if the input cannot be read as the parser's format
    fn parse(&self, input: &str) -> Result<Vec<Record>>;
}
