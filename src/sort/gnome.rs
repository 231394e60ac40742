//! Gnome sort.
//!
//! Walks forward while adjacent pairs are ordered; on an inversion it swaps
//! the pair and steps back. Only strictly greater pairs are swapped, so the
//! sort is stable. Worst case O(n²).

use std::cmp::Ordering;

pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut i = 1;
    while i < v.len() {
        if i == 0 || compare(&v[i - 1], &v[i]) != Ordering::Greater {
            i += 1;
        } else {
            v.swap(i - 1, i);
            i -= 1;
        }
    }
}
