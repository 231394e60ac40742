//! Selection sort: the O(n²) baseline.

use std::cmp::Ordering;

pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if compare(&v[j], &v[min]) == Ordering::Less {
                min = j;
            }
        }
        if min != i {
            v.swap(i, min);
        }
    }
}
