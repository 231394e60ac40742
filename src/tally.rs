//! Author frequency counts.

use crate::Record;
use crate::normalize::normalize_author;
use serde::Serialize;
use std::collections::HashMap;

/// Number of records each author appears on.
///
/// Names are normalized with [`normalize_author`] before counting, so
/// `M{\"u}ller, Hans` and `Müller, Hans` count as one author.
///
/// # Examples
///
/// ```
/// use bibsort::Record;
/// use bibsort::tally::AuthorTally;
///
/// let mut first = Record::with_title("One", None);
/// first.author = Some("Smith, John and Doe, Jane".to_string());
/// let mut second = Record::with_title("Two", None);
/// second.author = Some("Doe, Jane".to_string());
///
/// let tally = AuthorTally::from_records(&[first, second]);
/// assert_eq!(tally.top(1), vec![("Doe, Jane", 2)]);
/// assert_eq!(tally.get("Smith, John"), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorTally {
    counts: HashMap<String, usize>,
}

impl AuthorTally {
    /// Counts the authors of `records`.
    pub fn from_records(records: &[Record]) -> Self {
        let mut counts = HashMap::new();
        for name in records.iter().flat_map(Record::authors) {
            let name = normalize_author(name);
            if !name.is_empty() {
                *counts.entry(name).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// The `n` most frequent authors, by descending count then ascending name.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Count for an already normalized name, 0 when unseen.
    pub fn get(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct authors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(name, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}
