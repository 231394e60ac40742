//! LSD radix sort over a composite character key.
//!
//! Each item gets the key `"{year:010}|{title}"`, where the year is shifted
//! into the unsigned range so ten digits order every `i32` correctly. The
//! keys are then counting-sorted one character position at a time, from the
//! last position to the first.
//!
//! Keys of different lengths are compared as if the shorter one were padded
//! with a sentinel below every real character, which reproduces plain string
//! order (`"2020|ai"` before `"2020|aid"`). The counting alphabet is built
//! from the characters actually present, ranked by code point, so titles in
//! any script sort exactly and the count table stays as small as the input's
//! character set.

use super::Keyed;
use crate::compare::SortKey;
use std::collections::{BTreeSet, HashMap};

/// Rank given to positions past the end of a key.
const SENTINEL: u32 = 0;

/// Separates the year digits from the title in the composite key.
pub const KEY_SEPARATOR: char = '|';

/// Builds the composite key for one sort key.
///
/// # Examples
///
/// ```
/// use bibsort::SortKey;
/// use bibsort::sort::radix::composite_key;
///
/// let key = SortKey { year: 2020, title: "ai".to_string() };
/// assert_eq!(composite_key(&key), "2147485668|ai");
/// ```
pub fn composite_key(key: &SortKey) -> String {
    let shifted = i64::from(key.year) - i64::from(i32::MIN);
    format!("{shifted:010}{KEY_SEPARATOR}{}", key.title)
}

pub fn sort<T>(items: Vec<Keyed<T>>) -> Vec<Keyed<T>> {
    if items.len() < 2 {
        return items;
    }

    let keys: Vec<Vec<char>> = items
        .iter()
        .map(|item| composite_key(&item.key).chars().collect())
        .collect();
    let ranked = rank_characters(&keys);
    let order = radix_order(&ranked);

    let mut slots: Vec<Option<Keyed<T>>> = items.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

/// Replaces every character by its rank in the alphabet of all keys.
///
/// Ranks start at 1; 0 is left for [`SENTINEL`].
fn rank_characters(keys: &[Vec<char>]) -> Vec<Vec<u32>> {
    let alphabet: BTreeSet<char> = keys.iter().flatten().copied().collect();
    let ranks: HashMap<char, u32> = alphabet
        .into_iter()
        .zip(1u32..)
        .collect();

    keys.iter()
        .map(|key| key.iter().map(|c| ranks[c]).collect())
        .collect()
}

/// Returns the indices of `keys` in ascending key order.
fn radix_order(keys: &[Vec<u32>]) -> Vec<usize> {
    let max_len = keys.iter().map(Vec::len).max().unwrap_or(0);
    let alphabet_len = keys.iter().flatten().copied().max().unwrap_or(SENTINEL) as usize + 1;

    let mut order: Vec<usize> = (0..keys.len()).collect();
    let mut next = vec![0; keys.len()];
    let mut counts = vec![0usize; alphabet_len];

    for position in (0..max_len).rev() {
        let rank_at = |index: usize| keys[index].get(position).copied().unwrap_or(SENTINEL) as usize;

        counts.fill(0);
        for &index in &order {
            counts[rank_at(index)] += 1;
        }

        let mut total = 0;
        for count in counts.iter_mut() {
            let current = *count;
            *count = total;
            total += current;
        }

        for &index in &order {
            let rank = rank_at(index);
            next[counts[rank]] = index;
            counts[rank] += 1;
        }
        std::mem::swap(&mut order, &mut next);
    }

    order
}
