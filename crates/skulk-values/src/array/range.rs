//! Time-range queries and trimming on sorted arrays.
//!
//! All ranges are inclusive on both ends. Results are undefined if the array
//! is not sorted and duplicate-free.

use super::{TimeValueArray, Timestamp};
use crate::value::ArrayValue;

impl<T: ArrayValue> TimeValueArray<T> {
    /// Returns the first timestamp, or `None` if the array is empty.
    pub fn min_time(&self) -> Option<Timestamp> {
        self.timestamps.first().copied()
    }

    /// Returns the last timestamp, or `None` if the array is empty.
    pub fn max_time(&self) -> Option<Timestamp> {
        self.timestamps.last().copied()
    }

    /// Returns the positions at which `min` and `max` would be inserted.
    ///
    /// Each position is the index of the first timestamp `>=` the bound.
    /// Returns `None` if the array is empty, `min > max`, or every timestamp
    /// lies outside `[min, max]`.
    pub fn find_range(&self, min: Timestamp, max: Timestamp) -> Option<(usize, usize)> {
        let (first, last) = (self.min_time()?, self.max_time()?);
        if min > max || last < min || first > max {
            return None;
        }
        Some((self.lower_bound(min), self.lower_bound(max)))
    }

    /// Returns true if at least one point lies in `[min, max]`.
    pub fn contains(&self, min: Timestamp, max: Timestamp) -> bool {
        min <= max && self.lower_bound(min) < self.upper_bound(max)
    }

    /// Removes every point with a timestamp in `[min, max]`.
    pub fn exclude(&mut self, min: Timestamp, max: Timestamp) {
        if min > max {
            return;
        }
        let (lo, hi) = (self.lower_bound(min), self.upper_bound(max));
        if lo < hi {
            self.timestamps.drain(lo..hi);
            self.values.drain(lo..hi);
        }
    }

    /// Keeps only the points with a timestamp in `[min, max]`.
    pub fn include(&mut self, min: Timestamp, max: Timestamp) {
        if min > max {
            self.clear();
            return;
        }
        let (lo, hi) = (self.lower_bound(min), self.upper_bound(max));
        self.timestamps.truncate(hi);
        self.values.truncate(hi);
        self.timestamps.drain(..lo);
        self.values.drain(..lo);
    }

    /// Estimated memory footprint of the points in bytes.
    pub fn size(&self) -> usize {
        let slots = self.len() * (std::mem::size_of::<Timestamp>() + std::mem::size_of::<T>());
        slots + self.values.iter().map(T::heap_size).sum::<usize>()
    }

    fn lower_bound(&self, ts: Timestamp) -> usize {
        self.timestamps.partition_point(|&t| t < ts)
    }

    fn upper_bound(&self, ts: Timestamp) -> usize {
        self.timestamps.partition_point(|&t| t <= ts)
    }
}
