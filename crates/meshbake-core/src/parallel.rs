//! Chunked parallel loops over index ranges.
//!
//! `[0, len)` is split into at most `max_chunks` contiguous ranges. Each range runs on one
//! rayon worker and the call returns only after every range has finished, so a stage built
//! on these helpers never overlaps with the next one. The first error from any chunk is
//! returned and the remaining results are discarded.
//!
//! Chunk boundaries are `len * i / chunks`, so chunk sizes differ by at most one.

use std::ops::Range;

use rayon::prelude::*;

use crate::error::Result;

/// Splits `[0, len)` into at most `max_chunks` contiguous, non-empty ranges.
#[must_use]
pub fn chunk_ranges(len: usize, max_chunks: usize) -> Vec<Range<usize>> {
    let chunks = max_chunks.max(1).min(len);
    (0..chunks)
        .map(|i| (len * i / chunks)..(len * (i + 1) / chunks))
        .collect()
}

/// Runs `f` once per chunk of `[0, len)` and waits for all chunks.
pub fn try_for_each_chunk<F>(len: usize, max_chunks: usize, f: F) -> Result<()>
where
    F: Fn(Range<usize>) -> Result<()> + Sync,
{
    chunk_ranges(len, max_chunks)
        .into_par_iter()
        .try_for_each(&f)
}

/// Maps every index of `[0, len)` through `f`, one chunk per worker, preserving index order.
pub fn try_map_chunked<T, F>(len: usize, max_chunks: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync,
{
    let chunks: Vec<Vec<T>> = chunk_ranges(len, max_chunks)
        .into_par_iter()
        .map(|range| range.map(&f).collect::<Result<Vec<T>>>())
        .collect::<Result<Vec<Vec<T>>>>()?;

    let mut out = Vec::with_capacity(len);
    for chunk in chunks {
        out.extend(chunk);
    }
    Ok(out)
}
