//! TimeValueArray - ordered column of (timestamp, value) pairs.
//!
//! A [`TimeValueArray`] is the unit exchanged between the block decoder, the
//! write cache reader and the cursor layer. It holds two index-aligned
//! columns:
//!
//! ```text
//! timestamps: [ t0 < t1 < t2 < ... < tn ]
//! values:     [ v0   v1   v2   ...   vn ]
//! ```
//!
//! The columns always have the same length. Timestamps are expected to be
//! strictly increasing; producers that fill an array by index (see
//! [`TimeValueArray::new_len`]) are responsible for upholding that, and
//! [`TimeValueArray::validate`] checks it explicitly.
//!
//! # Example
//!
//! ```rust
//! use alopex_skulk_values::FloatArray;
//!
//! let mut disk = FloatArray::new_len(2);
//! let (ts, vals) = disk.parts_mut();
//! ts.copy_from_slice(&[10, 20]);
//! vals.copy_from_slice(&[1.0, 2.0]);
//!
//! let cache: FloatArray = vec![(20, 2.5), (30, 3.0)].into_iter().collect();
//!
//! disk.merge(&cache);
//! assert_eq!(disk.timestamps(), &[10, 20, 30]);
//! assert_eq!(disk.values(), &[1.0, 2.5, 3.0]);
//! ```

mod merge;
mod range;

pub use merge::{merged_len, OutputSizing};

use crate::error::{ArrayError, Result};
use crate::value::ArrayValue;
use std::iter::FusedIterator;

/// Timestamp in nanoseconds since Unix epoch.
pub type Timestamp = i64;

/// Ordered, duplicate-free column of (timestamp, value) pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeValueArray<T> {
    timestamps: Vec<Timestamp>,
    values: Vec<T>,
}

/// Array of boolean values.
pub type BooleanArray = TimeValueArray<bool>;
/// Array of 64-bit float values.
pub type FloatArray = TimeValueArray<f64>;
/// Array of signed 64-bit integer values.
pub type IntegerArray = TimeValueArray<i64>;
/// Array of unsigned 64-bit integer values.
pub type UnsignedArray = TimeValueArray<u64>;
/// Array of text values.
pub type StringArray = TimeValueArray<String>;

impl<T> Default for TimeValueArray<T> {
    fn default() -> Self {
        Self {
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T: ArrayValue> TimeValueArray<T> {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty array with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Creates an empty array with room for `capacity` points, reporting
    /// allocation failure instead of aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut array = Self::new();
        array.try_reserve(capacity)?;
        Ok(array)
    }

    /// Creates an array of exactly `n` points with zeroed timestamps and
    /// values.
    ///
    /// This is a pre-allocation for decoders that fill slots by index. The
    /// all-zero timestamps do not satisfy the ordering invariant for `n > 1`;
    /// the caller must overwrite every slot before the array is merged.
    pub fn new_len(n: usize) -> Self {
        Self {
            timestamps: vec![0; n],
            values: vec![T::zero(); n],
        }
    }

    /// Builds an array from its two columns, validating the invariants.
    pub fn from_parts(timestamps: Vec<Timestamp>, values: Vec<T>) -> Result<Self> {
        let array = Self { timestamps, values };
        array.validate()?;
        Ok(array)
    }

    /// Splits the array into its timestamp and value columns.
    pub fn into_parts(self) -> (Vec<Timestamp>, Vec<T>) {
        (self.timestamps, self.values)
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns true if the array holds no points.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Returns the number of points the array can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.timestamps.capacity().min(self.values.capacity())
    }

    /// Returns the timestamp column.
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Returns the value column.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the timestamp column for in-place filling.
    pub fn timestamps_mut(&mut self) -> &mut [Timestamp] {
        &mut self.timestamps
    }

    /// Returns the value column for in-place filling.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Returns both columns for in-place filling.
    pub fn parts_mut(&mut self) -> (&mut [Timestamp], &mut [T]) {
        (&mut self.timestamps, &mut self.values)
    }

    /// Appends a point. `timestamp` must be greater than the last timestamp.
    pub fn push(&mut self, timestamp: Timestamp, value: T) {
        debug_assert!(
            self.timestamps.last().map_or(true, |&last| last < timestamp),
            "timestamp {} does not follow {:?}",
            timestamp,
            self.timestamps.last()
        );
        self.timestamps.push(timestamp);
        self.values.push(value);
    }

    /// Returns the point at `index`.
    pub fn get(&self, index: usize) -> Option<(Timestamp, &T)> {
        let ts = *self.timestamps.get(index)?;
        self.values.get(index).map(|v| (ts, v))
    }

    /// Iterates over the points in ascending timestamp order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            timestamps: self.timestamps.iter(),
            values: self.values.iter(),
        }
    }

    /// Removes every point, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.timestamps.clear();
        self.values.clear();
    }

    /// Reserves room for at least `additional` more points.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let alloc_err = |source| ArrayError::AllocationFailed {
            requested: additional,
            source,
        };
        self.timestamps.try_reserve_exact(additional).map_err(alloc_err)?;
        self.values.try_reserve_exact(additional).map_err(alloc_err)?;
        Ok(())
    }

    /// Checks that both columns have the same length and that timestamps are
    /// strictly increasing.
    pub fn validate(&self) -> Result<()> {
        if self.timestamps.len() != self.values.len() {
            return Err(ArrayError::LengthMismatch {
                timestamps: self.timestamps.len(),
                values: self.values.len(),
            });
        }
        for (index, pair) in self.timestamps.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(ArrayError::UnsortedTimestamps {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        Ok(())
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        self.timestamps.len() == self.values.len()
            && self.timestamps.windows(2).all(|pair| pair[0] < pair[1])
    }

    /// Appends a copy of every point in `other`. The last timestamp of
    /// `self` must precede the first of `other`.
    pub(crate) fn extend_from(&mut self, other: &Self) {
        self.timestamps.extend_from_slice(&other.timestamps);
        self.values.extend_from_slice(&other.values);
    }
}

impl<T: ArrayValue> FromIterator<(Timestamp, T)> for TimeValueArray<T> {
    fn from_iter<I: IntoIterator<Item = (Timestamp, T)>>(iter: I) -> Self {
        let (timestamps, values) = iter.into_iter().unzip();
        Self { timestamps, values }
    }
}

impl<'a, T: ArrayValue> IntoIterator for &'a TimeValueArray<T> {
    type Item = (Timestamp, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the points of a [`TimeValueArray`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    timestamps: std::slice::Iter<'a, Timestamp>,
    values: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Timestamp, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let ts = *self.timestamps.next()?;
        self.values.next().map(|v| (ts, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.timestamps.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let ts = *self.timestamps.next_back()?;
        self.values.next_back().map(|v| (ts, v))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
