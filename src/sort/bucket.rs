//! Bucket sort by year range.
//!
//! Items are distributed into `(max_year - min_year) / span + 1` buckets of
//! `span` consecutive years each, every bucket is insertion-sorted by the
//! full key, and the buckets are concatenated. Items enter their bucket in
//! input order and insertion sort is stable, so the whole sort is stable.

use super::{Keyed, SortError, insertion_sort_by, slot_count, year_range};

pub fn sort<T>(items: Vec<Keyed<T>>, span: u32, max_slots: usize) -> Result<Vec<Keyed<T>>, SortError> {
    let Some((min, max)) = year_range(&items) else {
        return Ok(items);
    };

    let span = span.max(1);
    let slots = slot_count(min, max, span);
    if slots > max_slots as u64 {
        return Err(SortError::RangeTooLarge {
            min,
            max,
            slots,
            limit: max_slots,
        });
    }

    let len = items.len();
    let mut buckets: Vec<Vec<Keyed<T>>> = (0..slots).map(|_| Vec::new()).collect();
    for item in items {
        let index = (i64::from(item.key.year) - i64::from(min)) / i64::from(span);
        buckets[index as usize].push(item);
    }

    let mut sorted = Vec::with_capacity(len);
    for mut bucket in buckets {
        insertion_sort_by(&mut bucket, |a, b| a.key.cmp(&b.key));
        sorted.append(&mut bucket);
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::SortKey;
    use pretty_assertions::assert_eq;

    fn keyed(year: i32, title: &str, position: usize) -> Keyed<usize> {
        Keyed::new(
            SortKey {
                year,
                title: title.to_string(),
            },
            position,
            position,
        )
    }

    #[test]
    fn test_empty_input() {
        assert!(sort(Vec::<Keyed<()>>::new(), 5, 16).unwrap().is_empty());
    }

    #[test]
    fn test_orders_across_and_within_buckets() {
        let items = vec![
            keyed(2024, "b", 0),
            keyed(2001, "z", 1),
            keyed(2024, "a", 2),
            keyed(2003, "a", 3),
            keyed(0, "undated", 4),
        ];
        let sorted = sort(items, 5, 1024).unwrap();
        let order: Vec<usize> = sorted.iter().map(|k| k.item).collect();
        assert_eq!(order, vec![4, 1, 3, 2, 0]);
    }

    #[test]
    fn test_single_year() {
        let items = vec![keyed(2020, "b", 0), keyed(2020, "a", 1), keyed(2020, "a", 2)];
        let order: Vec<usize> = sort(items, 5, 1).unwrap().iter().map(|k| k.item).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_range_too_large() {
        let items = vec![keyed(i32::MIN, "a", 0), keyed(i32::MAX, "b", 1)];
        assert!(matches!(
            sort(items, 1, 1 << 16),
            Err(SortError::RangeTooLarge { limit: 65536, .. })
        ));
    }
}
