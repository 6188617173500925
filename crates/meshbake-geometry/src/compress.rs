//! Duplicate compression over flat arrays.
//!
//! Equal entries are found by sorting an index permutation and comparing neighbours, which
//! keeps the whole pass at O(n log n). Within a run of equal entries the first one in sort
//! order becomes the representative; the sort is stable, so that is also the lowest input
//! index of the run. Retained representatives keep their relative input order.

use std::cmp::Ordering;

/// Result of compressing an array.
#[derive(Debug, Clone, PartialEq)]
pub struct Compressed<T> {
    /// Unique values, in input order of their representatives.
    pub values: Vec<T>,
    /// For every input index, the index of its value in `values`.
    pub remap: Vec<u32>,
}

/// Maps every index to the representative index of its equal run.
///
/// Representatives map to themselves. The returned indices still refer to `items`.
#[allow(clippy::cast_possible_truncation)]
pub fn map_duplicates<T, F>(items: &[T], compare: F) -> Vec<u32>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut order: Vec<u32> = (0..items.len() as u32).collect();
    order.sort_by(|&i, &j| compare(&items[i as usize], &items[j as usize]));

    let mut map: Vec<u32> = (0..items.len() as u32).collect();
    for pair in order.windows(2) {
        let (i, j) = (pair[0] as usize, pair[1] as usize);
        if compare(&items[i], &items[j]) == Ordering::Equal {
            // Walking in sort order means map[i] is already a representative.
            map[j] = map[i];
        }
    }
    map
}

/// Compresses `items` into unique values and a full-length remap table.
///
/// An empty input yields empty outputs.
#[allow(clippy::cast_possible_truncation)]
pub fn compress<T, F>(items: &[T], compare: F) -> Compressed<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let map = map_duplicates(items, compare);

    // Close the gaps left by merged entries.
    let mut dense = vec![0u32; items.len()];
    let mut values = Vec::new();
    for (i, &rep) in map.iter().enumerate() {
        if rep as usize == i {
            dense[i] = values.len() as u32;
            values.push(items[i].clone());
        }
    }

    let remap = map.iter().map(|&rep| dense[rep as usize]).collect();
    Compressed { values, remap }
}
