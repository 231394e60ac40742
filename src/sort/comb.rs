//! Gap-shrinking exchange sort.
//!
//! Compares elements `gap` apart and swaps inverted pairs, shrinking the gap
//! by a factor of 1.3 each pass. Once the gap reaches 1 the passes continue
//! until one of them makes no swap, so already-sorted input finishes after a
//! few linear passes.

use std::cmp::Ordering;

/// The gap shrinks to `gap * SHRINK_NUMERATOR / SHRINK_DENOMINATOR` each pass (÷1.3).
const SHRINK_NUMERATOR: usize = 10;
const SHRINK_DENOMINATOR: usize = 13;

pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    if n < 2 {
        return;
    }

    let mut gap = n;
    let mut swapped = true;

    while gap > 1 || swapped {
        gap = (gap * SHRINK_NUMERATOR / SHRINK_DENOMINATOR).max(1);
        swapped = false;

        for i in 0..n - gap {
            if compare(&v[i], &v[i + gap]) == Ordering::Greater {
                v.swap(i, i + gap);
                swapped = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sorts_reversed() {
        let mut v: Vec<i32> = (0..257).rev().collect();
        sort_by(&mut v, |a, b| a.cmp(b));
        assert_eq!(v, (0..257).collect::<Vec<_>>());
    }

    #[test]
    fn test_terminates_on_sorted_input() {
        let mut v: Vec<i32> = (0..100).collect();
        let mut comparisons = 0;
        sort_by(&mut v, |a, b| {
            comparisons += 1;
            a.cmp(b)
        });
        assert_eq!(v, (0..100).collect::<Vec<_>>());
        assert!(comparisons < 100 * 100);
    }

    #[test]
    fn test_duplicates() {
        let mut v = vec![3, 1, 3, 1, 2, 2, 1];
        sort_by(&mut v, |a, b| a.cmp(b));
        assert_eq!(v, vec![1, 1, 1, 2, 2, 3, 3]);
    }
}
