//! Partition-exchange sort with a three-way partition.
//!
//! The middle element is the pivot. Each pass splits the range into
//! less / equal / greater bands, so runs of equal keys are settled in one
//! pass instead of degrading to quadratic work. Pending ranges live on an
//! explicit stack; the smaller side is always processed first, which keeps
//! the stack at O(log n) entries.

use std::cmp::Ordering;
use std::ops::Range;

pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut pending: Vec<Range<usize>> = vec![0..v.len()];

    while let Some(range) = pending.pop() {
        if range.len() < 2 {
            continue;
        }

        let start = range.start;
        let (equal_start, equal_end) = partition(&mut v[range.clone()], &mut compare);
        let less = start..start + equal_start;
        let greater = start + equal_end..range.end;

        // Push the larger side first so the smaller one is popped next.
        if less.len() > greater.len() {
            pending.push(less);
            pending.push(greater);
        } else {
            pending.push(greater);
            pending.push(less);
        }
    }
}

/// Partitions `v` around its middle element.
///
/// Returns the bounds `(lt, gt)` of the band equal to the pivot: afterwards
/// `v[..lt]` is less, `v[lt..gt]` is equal and `v[gt..]` is greater.
fn partition<T, F>(v: &mut [T], compare: &mut F) -> (usize, usize)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    v.swap(0, n / 2);

    // `v[lt]` always holds an element equal to the pivot.
    let mut lt = 0;
    let mut i = 1;
    let mut gt = n;

    while i < gt {
        match compare(&v[i], &v[lt]) {
            Ordering::Less => {
                v.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                v.swap(i, gt);
            }
            Ordering::Equal => i += 1,
        }
    }

    (lt, gt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partition_bands() {
        let mut v = vec![5, 1, 5, 9, 5, 0, 7];
        let (lt, gt) = partition(&mut v, &mut |a: &i32, b: &i32| a.cmp(b));
        assert!(v[..lt].iter().all(|&x| x < 5));
        assert!(v[lt..gt].iter().all(|&x| x == 5));
        assert!(v[gt..].iter().all(|&x| x > 5));
        assert_eq!(gt - lt, 3);
    }

    #[test]
    fn test_many_duplicates_stay_linear_per_pass() {
        let mut v: Vec<u8> = (0..10_000).map(|i| (i % 2) as u8).collect();
        let mut comparisons = 0usize;
        sort_by(&mut v, |a, b| {
            comparisons += 1;
            a.cmp(b)
        });
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
        assert!(comparisons < 100_000, "{comparisons} comparisons");
    }

    #[test]
    fn test_sorted_and_reversed_input() {
        let mut ascending: Vec<u32> = (0..5_000).collect();
        sort_by(&mut ascending, |a, b| a.cmp(b));
        assert_eq!(ascending, (0..5_000).collect::<Vec<_>>());

        let mut descending: Vec<u32> = (0..5_000).rev().collect();
        sort_by(&mut descending, |a, b| a.cmp(b));
        assert_eq!(descending, (0..5_000).collect::<Vec<_>>());
    }
}
