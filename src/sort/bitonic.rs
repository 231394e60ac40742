//! Bitonic merge network.
//!
//! The network only sorts power-of-two lengths, so the input is padded with
//! `None` sentinels that order after every real item. After the network has
//! run the sentinels sit at the tail and are dropped, leaving exactly the
//! original items.
//!
//! The network is data-oblivious: the same compare-exchange steps run
//! whatever the input, O(n log² n) of them.

use std::cmp::Ordering;

pub fn sort_by<T, F>(items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return items;
    }

    let padded_len = len.next_power_of_two();
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    slots.resize_with(padded_len, || None);

    let mut block = 2;
    while block <= padded_len {
        let mut distance = block / 2;
        while distance > 0 {
            for i in 0..padded_len {
                let partner = i ^ distance;
                if partner <= i {
                    continue;
                }
                let ascending = i & block == 0;
                let ordering = compare_padded(&slots[i], &slots[partner], &mut compare);
                let inverted = if ascending {
                    ordering == Ordering::Greater
                } else {
                    ordering == Ordering::Less
                };
                if inverted {
                    slots.swap(i, partner);
                }
            }
            distance /= 2;
        }
        block *= 2;
    }

    let sorted: Vec<T> = slots.into_iter().flatten().collect();
    debug_assert_eq!(sorted.len(), len);
    sorted
}

/// Compares two slots, with `None` ordered after every item.
fn compare_padded<T, F>(a: &Option<T>, b: &Option<T>, compare: &mut F) -> Ordering
where
    F: FnMut(&T, &T) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
