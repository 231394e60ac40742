//! Binary insertion sort.
//!
//! For each element, a binary search over the sorted prefix finds the first
//! position holding a strictly greater element, and the element is rotated
//! into place. Ties therefore land after their equals, which makes the sort
//! stable. Moves stay O(n²); comparisons drop to O(n log n).

use std::cmp::Ordering;

pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        let position = insertion_point(&v[..i], &v[i], &mut compare);
        if position < i {
            v[position..=i].rotate_right(1);
        }
    }
}

/// Index of the first element in `sorted` that is greater than `item`.
fn insertion_point<T, F>(sorted: &[T], item: &T, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut low, mut high) = (0, sorted.len());
    while low < high {
        let mid = low + (high - low) / 2;
        if compare(&sorted[mid], item) == Ordering::Greater {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    low
}
