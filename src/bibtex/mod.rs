//! BibTeX reading and writing.
//!
//! Provides functionality to parse the BibTeX files exported by academic
//! databases and to write record collections back out.
//!
//! # Example
//!
//! ```
//! use bibsort::{BibtexParser, RecordParser};
//!
//! let input = r#"@string{acc = "IEEE Access"}
//! @article{smith2021,
//!     title = {Generative {AI}},
//!     author = {Smith, John and Doe, Jane},
//!     journal = acc,
//!     year = 2021
//! }"#;
//!
//! let records = BibtexParser::new().parse(input).unwrap();
//! assert_eq!(records[0].title.as_deref(), Some("Generative {AI}"));
//! assert_eq!(records[0].year, Some(2021));
//! assert_eq!(records[0].extra_fields["journal"], "IEEE Access");
//! ```

mod parse;
mod structure;
mod types;
mod write;

pub use types::EntryType;
pub use write::BibtexWriter;

use crate::{BibError, Record, RecordParser, Result};
use parse::bibtex_parse;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parser for BibTeX files.
///
/// Entries that cannot be parsed are skipped with a warning. Parsing only
/// fails when the input holds `@` blocks but none of them is readable.
#[derive(Debug, Clone, Default)]
pub struct BibtexParser;

impl BibtexParser {
    /// Creates a new BibTeX parser instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibsort::BibtexParser;
    /// let parser = BibtexParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RecordParser for BibtexParser {
    /// Parses a string containing zero or more BibTeX entries.
    ///
    /// # Errors
    ///
    /// Returns `BibError::MalformedInput` when no entry could be read and at
    /// least one was skipped.
    fn parse(&self, input: &str) -> Result<Vec<Record>> {
        let raw = bibtex_parse(input);

        if raw.entries.is_empty() {
            if let Some(&line) = raw.skipped_lines.first() {
                return Err(BibError::MalformedInput {
                    message: "no readable BibTeX entry".to_string(),
                    line,
                });
            }
        }

        debug!(
            entries = raw.entries.len(),
            skipped = raw.skipped_lines.len(),
            "parsed BibTeX input"
        );

        Ok(raw.entries.into_iter().map(Record::from).collect())
    }
}

/// Reads and parses the file at `path` with `parser`.
///
/// # Errors
///
/// Returns `BibError::Io` when the file cannot be read, or the parser's error.
pub fn read_records<P: AsRef<Path>>(path: P, parser: &impl RecordParser) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let records = parser.parse(&text)?;
    debug!(path = %path.display(), records = records.len(), "read records");
    Ok(records)
}
