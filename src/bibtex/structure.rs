//! BibTeX data structures.
//!
//! This module defines the intermediate entry produced by the parser and
//! its conversion into a [`Record`].
//!
//! # Field Processing
//! - **First-wins**: a field repeated inside one entry keeps its first value
//! - **Typed fields**: `title`, `author` and `year` move into the record
//! - **Lossless year**: a year that does not read as a number stays in
//!   `extra_fields` so the writer can emit it unchanged

use crate::bibtex::types::EntryType;
use crate::regex::Regex;
use crate::Record;
use compact_str::CompactString;
use std::sync::LazyLock;
use tracing::debug;

/// First standalone four-digit run, e.g. `1998` in `c. 1998`.
static YEAR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(\d{4})(?:\D|$)").unwrap());

/// One entry as read from the BibTeX text, before typing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawBibtexEntry {
    /// Entry type as written, e.g. `Article`.
    pub(crate) entry_type: String,
    pub(crate) cite_key: String,
    /// Fields in source order with lower-cased names.
    pub(crate) fields: Vec<(String, String)>,
    /// 1-based line of the `@` that opened the entry.
    pub(crate) line: usize,
}

impl RawBibtexEntry {
    pub(crate) fn new(entry_type: &str, cite_key: &str) -> Self {
        Self {
            entry_type: entry_type.to_string(),
            cite_key: cite_key.to_string(),
            fields: Vec::new(),
            line: 0,
        }
    }

    pub(crate) fn add_field(&mut self, name: String, value: String) {
        self.fields.push((name, value));
    }

    /// Get the first value for a field, if it exists.
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Reads a publication year from a raw field value.
///
/// The trimmed value is tried as an integer first, then the first
/// standalone four-digit run is used.
pub(crate) fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }

    YEAR_DIGITS
        .captures(trimmed)
        .and_then(|caps| caps[1].parse().ok())
}

impl From<RawBibtexEntry> for Record {
    fn from(raw: RawBibtexEntry) -> Self {
        let mut record = Record {
            entry_type: EntryType::from_name(&raw.entry_type),
            cite_key: raw.cite_key,
            ..Record::new()
        };

        for (name, value) in raw.fields {
            match name.as_str() {
                "title" if record.title.is_none() => record.title = Some(value),
                "author" if record.author.is_none() => record.author = Some(value),
                "year" if record.year.is_none() && !record.extra_fields.contains_key("year") => {
                    record.year = parse_year(&value);
                    // Keep the source text whenever the typed year would not reproduce it.
                    if record.year.map(|year| year.to_string()).as_deref() != Some(value.trim()) {
                        record.extra_fields.insert(CompactString::from("year"), value);
                    }
                }
                "title" | "author" | "year" => {
                    debug!(line = raw.line, field = %name, "ignoring repeated field");
                }
                _ => {
                    let key = CompactString::from(name);
                    if record.extra_fields.contains_key(&key) {
                        debug!(line = raw.line, field = %key, "ignoring repeated field");
                    } else {
                        record.extra_fields.insert(key, value);
                    }
                }
            }
        }

        record
    }
}
