//! Property-based tests for the sorting engine and title normalization.
//!
//! Every algorithm must return a permutation of its input ordered by
//! (year, normalized title), and with the default configuration all of
//! them must agree with a stable reference sort.

use bibsort::compare::is_sorted;
use bibsort::normalize::normalize_title;
use bibsort::{Algorithm, Record, SortKey, sort_records};
use proptest::prelude::*;

fn arb_record() -> impl Strategy<Value = Record> {
    (
        prop::option::of("[A-Za-z {}ÀÉéüÅ]{0,12}"),
        prop::option::of(1950..2030i32),
    )
        .prop_map(|(title, year)| Record {
            title,
            year,
            ..Record::new()
        })
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..48)
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

fn reference_order(records: &[Record]) -> Vec<&str> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by_key(|record| SortKey::of(record));
    sorted.iter().map(|r| r.id.as_str()).collect()
}

proptest! {
    /// Property: output is a permutation of the input
    #[test]
    fn prop_sort_preserves_records(records in arb_records()) {
        let mut expected = ids(&records);
        expected.sort_unstable();

        for algorithm in Algorithm::ALL {
            let sorted = sort_records(algorithm, &records).unwrap();
            let mut actual = ids(&sorted);
            actual.sort_unstable();
            prop_assert_eq!(&actual, &expected, "{} lost or duplicated records", algorithm);
        }
    }

    /// Property: adjacent records are in non-decreasing order
    #[test]
    fn prop_sort_orders_records(records in arb_records()) {
        for algorithm in Algorithm::ALL {
            let sorted = sort_records(algorithm, &records).unwrap();
            prop_assert!(is_sorted(&sorted), "{} returned unsorted output", algorithm);
        }
    }

    /// Property: every algorithm matches the stable reference order
    #[test]
    fn prop_algorithms_agree(records in arb_records()) {
        let expected = reference_order(&records);
        for algorithm in Algorithm::ALL {
            let sorted = sort_records(algorithm, &records).unwrap();
            prop_assert_eq!(ids(&sorted), expected.clone(), "{} disagrees", algorithm);
        }
    }

    /// Property: sorting sorted input changes nothing
    #[test]
    fn prop_sort_idempotent(records in arb_records()) {
        for algorithm in Algorithm::ALL {
            let once = sort_records(algorithm, &records).unwrap();
            let twice = sort_records(algorithm, &once).unwrap();
            prop_assert_eq!(ids(&twice), ids(&once));
        }
    }

    /// Property: normalization is idempotent
    #[test]
    fn prop_normalize_title_idempotent(raw in "[A-Za-z ÀÉéüßÅ{}\\\\'\"]{0,24}") {
        let once = normalize_title(&raw);
        prop_assert_eq!(normalize_title(&once), once.clone());
        prop_assert!(!once.contains(['{', '}', '\\']), "normalized title contains braces or backslash: {:?}", once);
        prop_assert_eq!(once.trim(), once.as_str());
    }
}

#[test]
fn concrete_scenario() {
    let records = vec![
        Record::with_title("Zebra", Some(2021)),
        Record::with_title("Apple", Some(2019)),
        Record::with_title("apple", Some(2021)),
    ];
    for algorithm in Algorithm::ALL {
        let sorted = sort_records(algorithm, &records).unwrap();
        let pairs: Vec<_> = sorted
            .iter()
            .map(|r| (r.year, r.title.as_deref()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Some(2019), Some("Apple")),
                (Some(2021), Some("apple")),
                (Some(2021), Some("Zebra")),
            ],
            "{algorithm}"
        );
    }
}

#[test]
fn radix_handles_unequal_title_lengths() {
    let records: Vec<Record> = ["a", "abc", "", "ab", "b", "abcdefghij"]
        .into_iter()
        .map(|title| Record::with_title(title, Some(2000)))
        .collect();
    let sorted = sort_records(Algorithm::RadixSort, &records).unwrap();
    let titles: Vec<_> = sorted.iter().filter_map(|r| r.title.as_deref()).collect();
    assert_eq!(titles, vec!["", "a", "ab", "abc", "abcdefghij", "b"]);
}
