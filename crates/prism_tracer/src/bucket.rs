//! Splits the flat pixel index space into contiguous runs, one per worker.

use std::ops::Range;

/// A contiguous run of pixel indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// First pixel index
    pub start: usize,
    /// Number of pixels
    pub len: usize,
    /// Position in the bucket list
    pub index: usize,
}

impl Bucket {
    pub fn new(start: usize, len: usize, index: usize) -> Self {
        Self { start, len, index }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Split `num_pixels` into at most `num_tasks` buckets of near-equal size.
///
/// The first `num_pixels % num_tasks` buckets take one extra pixel. Empty
/// buckets are never produced.
pub fn generate_buckets(num_pixels: usize, num_tasks: usize) -> Vec<Bucket> {
    let num_tasks = num_tasks.clamp(1, num_pixels.max(1));
    let base = num_pixels / num_tasks;
    let remainder = num_pixels % num_tasks;

    let mut buckets = Vec::with_capacity(num_tasks);
    let mut start = 0;
    for index in 0..num_tasks {
        let len = base + usize::from(index < remainder);
        if len == 0 {
            break;
        }
        buckets.push(Bucket::new(start, len, index));
        start += len;
    }

    buckets
}
