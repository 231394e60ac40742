//! Record sorting with interchangeable algorithms.
//!
//! Every strategy produces the order defined in [`crate::compare`]: ascending
//! year, then ascending normalized title. Keys are computed once per record
//! before the algorithm runs, and each call sorts its own working copy, so
//! the caller's slice is never reordered.
//!
//! ## Usage
//!
//! ```rust
//! use bibsort::{Algorithm, Record, Sorter, SortConfig};
//!
//! let records = vec![
//!     Record::with_title("Zebra", Some(2021)),
//!     Record::with_title("Apple", Some(2019)),
//!     Record::with_title("apple", Some(2021)),
//! ];
//!
//! let sorter = Sorter::new().with_config(SortConfig {
//!     bucket_span: 10,
//!     ..Default::default()
//! });
//!
//! for algorithm in Algorithm::ALL {
//!     let sorted = sorter.sort(algorithm, &records).unwrap();
//!     let titles: Vec<_> = sorted.iter().filter_map(|r| r.title.as_deref()).collect();
//!     assert_eq!(titles, ["Apple", "apple", "Zebra"]);
//! }
//! ```
//!
//! ## Stability
//!
//! With [`SortConfig::stable`] set (the default) the comparison-based
//! strategies break key ties by input position, so all twelve algorithms
//! return the same sequence and records with equal keys keep their input
//! order. The distribution strategies (bucket, pigeonhole, radix) are stable
//! without help. [`Algorithm::is_natively_stable`] reports what each
//! strategy guarantees when `stable` is off.

pub mod binary_insertion;
pub mod bitonic;
pub mod bucket;
pub mod comb;
pub mod gnome;
pub mod heap;
pub mod pigeonhole;
pub mod quick;
pub mod radix;
pub mod selection;
pub mod tim;
pub mod tree;

use crate::Record;
use crate::compare::SortKey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Default width, in years, of one bucket in [`Algorithm::BucketSort`].
pub const DEFAULT_BUCKET_SPAN: u32 = 5;

/// Default upper bound on the number of buckets or holes a distribution
/// strategy may allocate.
pub const DEFAULT_MAX_SLOTS: usize = 1 << 16;

/// Error types for sort operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("Year range {min}..={max} needs {slots} slots, more than the limit of {limit}")]
    RangeTooLarge {
        min: i32,
        max: i32,
        slots: u64,
        limit: usize,
    },

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// The available sorting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    TimSort,
    CombSort,
    SelectionSort,
    TreeSort,
    PigeonholeSort,
    BucketSort,
    QuickSort,
    HeapSort,
    BitonicSort,
    GnomeSort,
    BinaryInsertionSort,
    RadixSort,
}

impl Algorithm {
    /// Every strategy, in benchmark order.
    pub const ALL: [Algorithm; 12] = [
        Algorithm::TimSort,
        Algorithm::CombSort,
        Algorithm::SelectionSort,
        Algorithm::TreeSort,
        Algorithm::PigeonholeSort,
        Algorithm::BucketSort,
        Algorithm::QuickSort,
        Algorithm::HeapSort,
        Algorithm::BitonicSort,
        Algorithm::GnomeSort,
        Algorithm::BinaryInsertionSort,
        Algorithm::RadixSort,
    ];

    /// Short name used on the command line and in reports.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::TimSort => "timsort",
            Algorithm::CombSort => "comb",
            Algorithm::SelectionSort => "selection",
            Algorithm::TreeSort => "tree",
            Algorithm::PigeonholeSort => "pigeonhole",
            Algorithm::BucketSort => "bucket",
            Algorithm::QuickSort => "quick",
            Algorithm::HeapSort => "heap",
            Algorithm::BitonicSort => "bitonic",
            Algorithm::GnomeSort => "gnome",
            Algorithm::BinaryInsertionSort => "binary-insertion",
            Algorithm::RadixSort => "radix",
        }
    }

    /// Whether the strategy keeps equal keys in input order on its own.
    pub fn is_natively_stable(self) -> bool {
        match self {
            Algorithm::TimSort
            | Algorithm::TreeSort
            | Algorithm::PigeonholeSort
            | Algorithm::BucketSort
            | Algorithm::GnomeSort
            | Algorithm::BinaryInsertionSort
            | Algorithm::RadixSort => true,
            Algorithm::CombSort
            | Algorithm::SelectionSort
            | Algorithm::QuickSort
            | Algorithm::HeapSort
            | Algorithm::BitonicSort => false,
        }
    }

    /// Whether the strategy distributes by key instead of comparing pairs.
    pub fn is_distribution(self) -> bool {
        matches!(
            self,
            Algorithm::PigeonholeSort | Algorithm::BucketSort | Algorithm::RadixSort
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let wanted = wanted.strip_suffix("sort").unwrap_or(&wanted);

        Algorithm::ALL
            .into_iter()
            .find(|algorithm| {
                let name = algorithm.name().replace('-', "");
                name == wanted || name.strip_suffix("sort") == Some(wanted)
            })
            .ok_or_else(|| SortError::UnknownAlgorithm(s.to_string()))
    }
}

/// Configuration options for the sorting engine.
///
/// # Examples
///
/// ```
/// use bibsort::SortConfig;
///
/// let config = SortConfig {
///     bucket_span: 10,   // one bucket per decade
///     stable: false,     // let each strategy handle ties its own way
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Years covered by one bucket in bucket sort.
    pub bucket_span: u32,
    /// Largest number of buckets or holes bucket and pigeonhole sort may allocate.
    pub max_slots: usize,
    /// Break key ties by input position in the comparison-based strategies.
    pub stable: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            bucket_span: DEFAULT_BUCKET_SPAN,
            max_slots: DEFAULT_MAX_SLOTS,
            stable: true,
        }
    }
}

/// A record (or anything else) tagged with its precomputed key and input position.
#[derive(Debug, Clone)]
pub struct Keyed<T> {
    pub key: SortKey,
    pub position: usize,
    pub item: T,
}

impl<T> Keyed<T> {
    pub fn new(key: SortKey, position: usize, item: T) -> Self {
        Self {
            key,
            position,
            item,
        }
    }

    /// Orders by key, falling back to input position when `stable` is set.
    pub fn compare(&self, other: &Self, stable: bool) -> Ordering {
        let ordering = self.key.cmp(&other.key);
        if stable {
            ordering.then(self.position.cmp(&other.position))
        } else {
            ordering
        }
    }
}

/// Sorting engine dispatching to the configured strategies.
#[derive(Debug, Default, Clone)]
pub struct Sorter {
    config: SortConfig,
}

impl Sorter {
    /// Creates a sorter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    ///
    /// A `bucket_span` of zero is raised to one year and a `max_slots` of
    /// zero to one slot.
    #[must_use]
    pub fn with_config(mut self, mut config: SortConfig) -> Self {
        config.bucket_span = config.bucket_span.max(1);
        config.max_slots = config.max_slots.max(1);
        self.config = config;
        self
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Returns a sorted copy of `records`.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::RangeTooLarge`] when a distribution strategy would
    /// need more slots than [`SortConfig::max_slots`].
    pub fn sort(&self, algorithm: Algorithm, records: &[Record]) -> Result<Vec<Record>, SortError> {
        let keyed: Vec<Keyed<&Record>> = records
            .iter()
            .enumerate()
            .map(|(position, record)| Keyed::new(SortKey::of(record), position, record))
            .collect();

        let sorted = self.sort_keyed(algorithm, keyed)?;
        Ok(sorted.into_iter().map(|k| k.item.clone()).collect())
    }

    /// Sorts already-keyed items with the given strategy.
    pub fn sort_keyed<T>(
        &self,
        algorithm: Algorithm,
        mut items: Vec<Keyed<T>>,
    ) -> Result<Vec<Keyed<T>>, SortError> {
        debug!(%algorithm, len = items.len(), stable = self.config.stable, "sorting");

        let stable = self.config.stable;
        let compare = move |a: &Keyed<T>, b: &Keyed<T>| a.compare(b, stable);

        match algorithm {
            Algorithm::TimSort => tim::sort_by(&mut items, compare),
            Algorithm::CombSort => comb::sort_by(&mut items, compare),
            Algorithm::SelectionSort => selection::sort_by(&mut items, compare),
            Algorithm::QuickSort => quick::sort_by(&mut items, compare),
            Algorithm::HeapSort => heap::sort_by(&mut items, compare),
            Algorithm::GnomeSort => gnome::sort_by(&mut items, compare),
            Algorithm::BinaryInsertionSort => binary_insertion::sort_by(&mut items, compare),
            Algorithm::TreeSort => items = tree::sort_by(items, compare),
            Algorithm::BitonicSort => items = bitonic::sort_by(items, compare),
            Algorithm::BucketSort => {
                items = bucket::sort(items, self.config.bucket_span, self.config.max_slots)?
            }
            Algorithm::PigeonholeSort => {
                items = pigeonhole::sort(items, self.config.max_slots)?
            }
            Algorithm::RadixSort => items = radix::sort(items),
        }

        Ok(items)
    }
}

/// Sorts `records` with `algorithm` under the default configuration.
///
/// # Examples
///
/// ```
/// use bibsort::{Algorithm, Record, sort_records};
///
/// let records = vec![
///     Record::with_title("B", Some(2020)),
///     Record::with_title("A", Some(2020)),
/// ];
/// let sorted = sort_records(Algorithm::HeapSort, &records).unwrap();
/// assert_eq!(sorted[0].title.as_deref(), Some("A"));
/// ```
pub fn sort_records(algorithm: Algorithm, records: &[Record]) -> Result<Vec<Record>, SortError> {
    Sorter::new().sort(algorithm, records)
}

/// Number of slots needed to cover `min..=max` in steps of `span`.
pub(crate) fn slot_count(min: i32, max: i32, span: u32) -> u64 {
    ((i64::from(max) - i64::from(min)) / i64::from(span.max(1))) as u64 + 1
}

/// Smallest and largest year among `items`, `None` when empty.
pub(crate) fn year_range<T>(items: &[Keyed<T>]) -> Option<(i32, i32)> {
    let min = items.iter().map(|k| k.key.year).min()?;
    let max = items.iter().map(|k| k.key.year).max()?;
    Some((min, max))
}

/// Stable in-place insertion sort, used inside buckets.
pub(crate) fn insertion_sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && compare(&v[j - 1], &v[j]) == Ordering::Greater {
            v.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Reorders `v` so that position `k` holds the element previously at `perm[k]`.
pub(crate) fn apply_permutation<T>(v: &mut [T], perm: &[usize]) {
    debug_assert_eq!(v.len(), perm.len());
    let mut placed = vec![false; v.len()];

    for start in 0..v.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let next = perm[current];
            if next == start {
                break;
            }
            v.swap(current, next);
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn record(title: &str, year: Option<i32>) -> Record {
        Record::with_title(title, year)
    }

    fn titles(records: &[Record]) -> Vec<&str> {
        records.iter().filter_map(|r| r.title.as_deref()).collect()
    }

    #[rstest]
    #[case("timsort", Algorithm::TimSort)]
    #[case("TimSort", Algorithm::TimSort)]
    #[case("quick", Algorithm::QuickSort)]
    #[case("QuickSort", Algorithm::QuickSort)]
    #[case("binary-insertion", Algorithm::BinaryInsertionSort)]
    #[case("BinaryInsertionSort", Algorithm::BinaryInsertionSort)]
    #[case("radix_sort", Algorithm::RadixSort)]
    fn test_algorithm_from_str(#[case] name: &str, #[case] expected: Algorithm) {
        assert_eq!(name.parse::<Algorithm>().unwrap(), expected);
    }

    #[test]
    fn test_algorithm_from_str_unknown() {
        assert_eq!(
            "bogo".parse::<Algorithm>(),
            Err(SortError::UnknownAlgorithm("bogo".to_string()))
        );
    }

    #[test]
    fn test_algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_concrete_scenario_every_algorithm() {
        let records = vec![
            record("Zebra", Some(2021)),
            record("Apple", Some(2019)),
            record("apple", Some(2021)),
        ];
        for algorithm in Algorithm::ALL {
            let sorted = sort_records(algorithm, &records).unwrap();
            assert_eq!(titles(&sorted), vec!["Apple", "apple", "Zebra"], "{algorithm}");
        }
    }

    #[test]
    fn test_empty_input_every_algorithm() {
        for algorithm in Algorithm::ALL {
            assert!(sort_records(algorithm, &[]).unwrap().is_empty(), "{algorithm}");
        }
    }

    #[test]
    fn test_caller_slice_untouched() {
        let records = vec![record("b", Some(2)), record("a", Some(1))];
        let before = records.clone();
        for algorithm in Algorithm::ALL {
            let _ = sort_records(algorithm, &records).unwrap();
        }
        assert_eq!(records, before);
    }

    #[test]
    fn test_stable_ties_keep_input_order() {
        let records: Vec<Record> = (0..40)
            .map(|i| Record {
                cite_key: format!("k{i}"),
                ..record(if i % 2 == 0 { "Same" } else { "same" }, Some(2000 + i % 3))
            })
            .collect();

        let expected = sort_records(Algorithm::TimSort, &records).unwrap();
        for algorithm in Algorithm::ALL {
            let sorted = sort_records(algorithm, &records).unwrap();
            assert_eq!(sorted, expected, "{algorithm}");
        }
    }

    #[test]
    fn test_with_config_clamps_zero_values() {
        let sorter = Sorter::new().with_config(SortConfig {
            bucket_span: 0,
            max_slots: 0,
            stable: true,
        });
        assert_eq!(sorter.config().bucket_span, 1);
        assert_eq!(sorter.config().max_slots, 1);
    }

    #[test]
    fn test_unstable_config_still_orders() {
        let sorter = Sorter::new().with_config(SortConfig {
            stable: false,
            ..Default::default()
        });
        let records = vec![
            record("b", Some(2020)),
            record("a", Some(2020)),
            record("a", Some(2020)),
            record("c", None),
        ];
        for algorithm in Algorithm::ALL {
            let sorted = sorter.sort(algorithm, &records).unwrap();
            assert!(crate::compare::is_sorted(&sorted), "{algorithm}");
        }
    }

    #[test]
    fn test_slot_count() {
        assert_eq!(slot_count(2000, 2000, 5), 1);
        assert_eq!(slot_count(2000, 2004, 5), 1);
        assert_eq!(slot_count(2000, 2005, 5), 2);
        assert_eq!(slot_count(i32::MIN, i32::MAX, 1), 1 << 32);
    }

    #[test]
    fn test_apply_permutation() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        apply_permutation(&mut v, &[3, 0, 4, 1, 2]);
        assert_eq!(v, vec!['d', 'a', 'e', 'b', 'c']);
    }

    #[test]
    fn test_insertion_sort_by_is_stable() {
        let mut v = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        insertion_sort_by(&mut v, |a, b| a.0.cmp(&b.0));
        assert_eq!(v, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }
}
