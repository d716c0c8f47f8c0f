//! Splits a sequence into contiguous, equally sized shards.

use std::ops::Range;

/// Size of every shard but possibly the last: `ceil(len / workers)`.
///
/// A worker count of zero is treated as one.
pub fn shard_size(len: usize, workers: usize) -> usize {
    len.div_ceil(workers.max(1))
}

/// The half-open index range owned by worker `index`.
///
/// Workers past the end of the sequence get an empty range.
pub fn shard_range(len: usize, workers: usize, index: usize) -> Range<usize> {
    let size = shard_size(len, workers);
    let start = index.saturating_mul(size).min(len);
    let end = index.saturating_add(1).saturating_mul(size).min(len);
    start..end
}

/// Every shard range, one per worker, in worker order.
pub fn shards(len: usize, workers: usize) -> impl Iterator<Item = Range<usize>> {
    (0..workers.max(1)).map(move |index| shard_range(len, workers, index))
}
