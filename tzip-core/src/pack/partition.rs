//! Static split of the sorted file list into one contiguous index range per worker.

use crate::error::{Result, TzipError};
use std::ops::Range;

/// Half-open span `[start, end)` of file indices owned by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkRange {
    pub start: usize,
    pub end: usize,
}

impl WorkRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn iter(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PartitionPolicy {
    /// Every worker gets `n / w` files; the last one also takes the remainder.
    #[default]
    RemainderToLast,
    /// Every worker gets exactly `n / w` files. Up to `w - 1` trailing files
    /// belong to no worker. Kept for byte-compatibility with the legacy tool.
    EqualSlices,
}

/// Split `[0, n)` into exactly `workers` contiguous ranges, in worker order.
/// Ranges may be empty when `n < workers`.
pub fn partition(n: usize, workers: usize, policy: PartitionPolicy) -> Result<Vec<WorkRange>> {
    if workers == 0 {
        return Err(TzipError::InvalidOptions(
            "worker count must be at least 1".into(),
        ));
    }
    let width = n / workers;
    let ranges = (0..workers)
        .map(|i| {
            let start = (i * width).min(n);
            let end = match policy {
                PartitionPolicy::RemainderToLast if i + 1 == workers => n,
                _ => ((i + 1) * width).min(n),
            };
            WorkRange { start, end }
        })
        .collect();
    Ok(ranges)
}

/// Number of indices no range covers (always 0 for `RemainderToLast`).
pub fn unassigned(n: usize, ranges: &[WorkRange]) -> usize {
    n - ranges.last().map(|r| r.end).unwrap_or(0)
}
