//! BibTeX output.
//!
//! Records are written in the order given, one entry per block:
//!
//! ```text
//! @article{smith2021,
//!     author = {Smith, John},
//!     title = {Deep Learning},
//!     year = {2021}
//! }
//! ```

use crate::{BibError, Record, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

const DEFAULT_INDENT: usize = 4;

/// Writer for BibTeX files.
#[derive(Debug, Clone)]
pub struct BibtexWriter {
    indent: String,
}

impl Default for BibtexWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BibtexWriter {
    /// Creates a writer indenting fields with four spaces.
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    /// Creates a writer indenting fields with `spaces` spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibsort::{BibtexWriter, Record};
    ///
    /// let mut record = Record::with_title("Deep Learning", Some(2016));
    /// record.cite_key = "goodfellow2016".to_string();
    ///
    /// let text = BibtexWriter::with_indent(2).write(&[record]).unwrap();
    /// assert_eq!(
    ///     text,
    ///     "@article{goodfellow2016,\n  title = {Deep Learning},\n  year = {2016}\n}\n"
    /// );
    /// ```
    #[must_use]
    pub fn with_indent(spaces: usize) -> Self {
        Self {
            indent: " ".repeat(spaces),
        }
    }

    /// Formats `records` as one BibTeX document.
    ///
    /// # Errors
    ///
    /// Returns `BibError::InvalidFieldValue` when a value has unbalanced
    /// braces, since it could not be read back.
    pub fn write(&self, records: &[Record]) -> Result<String> {
        let entries = records
            .iter()
            .map(|record| self.format_entry(record))
            .collect::<Result<Vec<_>>>()?;
        Ok(entries.join("\n"))
    }

    /// Writes `records` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error when a value cannot be written or the file cannot be created.
    pub fn write_file<P: AsRef<Path>>(&self, path: P, records: &[Record]) -> Result<()> {
        let path = path.as_ref();
        let text = self.write(records)?;
        fs::write(path, text)?;
        debug!(path = %path.display(), records = records.len(), "wrote BibTeX file");
        Ok(())
    }

    fn format_entry(&self, record: &Record) -> Result<String> {
        let key = if record.cite_key.is_empty() {
            record.id.as_str()
        } else {
            record.cite_key.as_str()
        };

        let mut fields: Vec<(&str, Cow<'_, str>)> = record
            .extra_fields
            .iter()
            .map(|(name, value)| (name.as_str(), Cow::Borrowed(value.as_str())))
            .collect();
        if let Some(title) = &record.title {
            fields.push(("title", Cow::Borrowed(title.as_str())));
        }
        if let Some(author) = &record.author {
            fields.push(("author", Cow::Borrowed(author.as_str())));
        }
        // A raw year kept in extra_fields already carries the source text.
        if let (Some(year), false) = (record.year, record.extra_fields.contains_key("year")) {
            fields.push(("year", Cow::Owned(year.to_string())));
        }
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let mut entry = format!("@{}{{{},\n", record.entry_type.as_str(), key);
        let last = fields.len().saturating_sub(1);
        for (index, (name, value)) in fields.iter().enumerate() {
            check_braces(name, value)?;
            entry.push_str(&self.indent);
            entry.push_str(name);
            entry.push_str(" = {");
            entry.push_str(value);
            entry.push('}');
            if index != last {
                entry.push(',');
            }
            entry.push('\n');
        }
        entry.push_str("}\n");

        Ok(entry)
    }
}

fn check_braces(field: &str, value: &str) -> Result<()> {
    let mut depth = 0i64;
    let mut escaped = false;
    for c in value.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    break;
                }
            }
            _ => {}
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(BibError::InvalidFieldValue {
            field: field.to_string(),
            message: format!("unbalanced braces in '{}'", value),
        })
    }
}
