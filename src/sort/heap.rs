//! Binary heap sort.
//!
//! Builds a max-heap in place, then repeatedly swaps the root into the tail
//! and sifts the new root down through the shrinking heap. Sifting is a loop,
//! not a recursion.

use std::cmp::Ordering;

pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    if n < 2 {
        return;
    }

    for root in (0..n / 2).rev() {
        sift_down(v, root, n, &mut compare);
    }

    for end in (1..n).rev() {
        v.swap(0, end);
        sift_down(v, 0, end, &mut compare);
    }
}

/// Restores the heap property for `v[..end]` below `root`.
fn sift_down<T, F>(v: &mut [T], mut root: usize, end: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && compare(&v[child], &v[child + 1]) == Ordering::Less {
            child += 1;
        }
        if compare(&v[root], &v[child]) != Ordering::Less {
            break;
        }
        v.swap(root, child);
        root = child;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sorts() {
        let mut v: Vec<i64> = (0..500).map(|i| (i * 37 + 11) % 101).collect();
        let mut expected = v.clone();
        expected.sort();
        sort_by(&mut v, |a, b| a.cmp(b));
        assert_eq!(v, expected);
    }

    #[test]
    fn test_two_elements() {
        let mut v = vec![2, 1];
        sort_by(&mut v, |a, b| a.cmp(b));
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn test_descending_comparator() {
        let mut v = vec![1, 4, 2, 3];
        sort_by(&mut v, |a, b| b.cmp(a));
        assert_eq!(v, vec![4, 3, 2, 1]);
    }
}
