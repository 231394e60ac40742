//! Hybrid run-insertion-merge sort.
//!
//! The input is cut into runs of [`MIN_RUN`] elements, each run is sorted by
//! insertion, then neighbouring runs are merged bottom-up with the merge
//! width doubling each pass. Merging takes from the left run on ties, so the
//! sort is stable.
//!
//! Elements are moved once at the end: runs and merges work on a vector of
//! indices, which is then applied to the slice as a permutation.

use super::apply_permutation;
use std::cmp::Ordering;

/// Length of the runs sorted by insertion before merging starts.
pub const MIN_RUN: usize = 32;

pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    if n < 2 {
        return;
    }

    let mut order: Vec<usize> = (0..n).collect();
    {
        let mut greater = |a: usize, b: usize| compare(&v[a], &v[b]) == Ordering::Greater;

        for start in (0..n).step_by(MIN_RUN) {
            let end = (start + MIN_RUN).min(n);
            insertion_sort(&mut order[start..end], &mut greater);
        }

        let mut buffer = Vec::with_capacity(n);
        let mut width = MIN_RUN;
        while width < n {
            for left in (0..n).step_by(2 * width) {
                let mid = (left + width).min(n);
                let right = (left + 2 * width).min(n);
                if mid < right {
                    merge(&mut order[left..right], mid - left, &mut buffer, &mut greater);
                }
            }
            width *= 2;
        }
    }

    apply_permutation(v, &order);
}

fn insertion_sort<G>(run: &mut [usize], greater: &mut G)
where
    G: FnMut(usize, usize) -> bool,
{
    for i in 1..run.len() {
        let current = run[i];
        let mut j = i;
        while j > 0 && greater(run[j - 1], current) {
            run[j] = run[j - 1];
            j -= 1;
        }
        run[j] = current;
    }
}

/// Merges the sorted halves `run[..mid]` and `run[mid..]`.
fn merge<G>(run: &mut [usize], mid: usize, buffer: &mut Vec<usize>, greater: &mut G)
where
    G: FnMut(usize, usize) -> bool,
{
    buffer.clear();
    let (mut i, mut j) = (0, mid);

    while i < mid && j < run.len() {
        if greater(run[i], run[j]) {
            buffer.push(run[j]);
            j += 1;
        } else {
            buffer.push(run[i]);
            i += 1;
        }
    }
    buffer.extend_from_slice(&run[i..mid]);
    buffer.extend_from_slice(&run[j..]);
    run.copy_from_slice(buffer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sorts_across_many_runs() {
        let mut v: Vec<u32> = (0..1000).map(|i| (i * 7919) % 1000).collect();
        sort_by(&mut v, |a, b| a.cmp(b));
        assert_eq!(v, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn test_is_stable() {
        let mut v: Vec<(u8, usize)> = (0..200).map(|i| ((i % 3) as u8, i)).rev().collect();
        sort_by(&mut v, |a, b| a.0.cmp(&b.0));
        for pair in v.windows(2) {
            assert!(pair[0].0 < pair[1].0 || pair[0].1 > pair[1].1);
        }
    }

    #[test]
    fn test_small_inputs() {
        let mut empty: Vec<i32> = vec![];
        sort_by(&mut empty, |a, b| a.cmp(b));
        assert!(empty.is_empty());

        let mut single = vec![1];
        sort_by(&mut single, |a, b| a.cmp(b));
        assert_eq!(single, vec![1]);
    }
}
