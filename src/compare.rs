//! The ordering shared by every sorting strategy.
//!
//! Records sort by ascending publication year, then by ascending normalized
//! title. A record without a readable year takes [`MISSING_YEAR`], so it
//! sorts before every dated record regardless of which algorithm runs.

use crate::Record;
use crate::normalize::normalize_title;
use serde::Serialize;
use std::cmp::Ordering;

/// Year substituted for records whose year is absent or unreadable.
pub const MISSING_YEAR: i32 = 0;

/// Comparison key derived from a record.
///
/// The derived `Ord` compares `year` first, then `title`, which is exactly
/// the record order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SortKey {
    pub year: i32,
    pub title: String,
}

impl SortKey {
    /// Builds the key for a record.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibsort::{Record, SortKey};
    ///
    /// let key = SortKey::of(&Record::with_title("{Café} Society", None));
    /// assert_eq!(key.year, 0);
    /// assert_eq!(key.title, "cafe society");
    /// ```
    pub fn of(record: &Record) -> Self {
        Self {
            year: record.year.unwrap_or(MISSING_YEAR),
            title: record
                .title
                .as_deref()
                .map(normalize_title)
                .unwrap_or_default(),
        }
    }
}

impl From<&Record> for SortKey {
    fn from(record: &Record) -> Self {
        Self::of(record)
    }
}

/// Compares two records by (year, normalized title).
///
/// Records with equal keys compare as `Equal` even when other fields differ.
pub fn compare_records(a: &Record, b: &Record) -> Ordering {
    SortKey::of(a).cmp(&SortKey::of(b))
}

/// Returns `true` when `a` may be placed before `b`.
pub fn precedes(a: &Record, b: &Record) -> bool {
    compare_records(a, b) != Ordering::Greater
}

/// Checks that every adjacent pair of `records` is in order.
pub fn is_sorted(records: &[Record]) -> bool {
    let keys: Vec<SortKey> = records.iter().map(SortKey::of).collect();
    keys.is_sorted()
}
