//! Pigeonhole sort: one hole per distinct year.
//!
//! Works well when the years span a small, dense range. A sparse or very
//! wide range would need one hole per year in between, so the sort refuses
//! ranges needing more than `max_slots` holes instead of allocating them.
//! Within a hole items are ordered by title with a stable sort.

use super::{Keyed, SortError, slot_count, year_range};

pub fn sort<T>(items: Vec<Keyed<T>>, max_slots: usize) -> Result<Vec<Keyed<T>>, SortError> {
    let Some((min, max)) = year_range(&items) else {
        return Ok(items);
    };

    let holes = slot_count(min, max, 1);
    if holes > max_slots as u64 {
        return Err(SortError::RangeTooLarge {
            min,
            max,
            slots: holes,
            limit: max_slots,
        });
    }

    let len = items.len();
    let mut pigeonholes: Vec<Vec<Keyed<T>>> = (0..holes).map(|_| Vec::new()).collect();
    for item in items {
        let index = i64::from(item.key.year) - i64::from(min);
        pigeonholes[index as usize].push(item);
    }

    let mut sorted = Vec::with_capacity(len);
    for mut hole in pigeonholes {
        hole.sort_by(|a, b| a.key.title.cmp(&b.key.title));
        sorted.append(&mut hole);
    }
    Ok(sorted)
}
