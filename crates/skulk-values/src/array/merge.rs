//! Last-writer-wins merge of two time-value arrays.
//!
//! Both inputs must be sorted ascending with no duplicate timestamps. The
//! merge walks them with one cursor each and appends into a fresh output
//! buffer:
//!
//! ```text
//! a.ts <  b.ts  → emit a, advance a
//! a.ts >  b.ts  → emit b, advance b
//! a.ts == b.ts  → emit b, advance both
//! ```
//!
//! When either cursor runs out the remainder of the other input is copied
//! verbatim. The output then replaces the receiver's storage in one step.
//! Writing into the receiver's own buffer is not possible because points of
//! `b` interleaved early in `a`'s range would overwrite unread points of `a`.

use super::{TimeValueArray, Timestamp};
use crate::error::Result;
use crate::value::ArrayValue;
use std::cmp::Ordering;

/// How the output buffer of a merge is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSizing {
    /// Allocate `a.len() + b.len()` slots up front (single pass).
    #[default]
    WorstCase,
    /// Count distinct timestamps first and allocate exactly that many
    /// (two passes, no spare capacity).
    Exact,
}

impl OutputSizing {
    /// Returns the number of slots to allocate for merging `a` and `b`.
    pub fn capacity<T: ArrayValue>(self, a: &TimeValueArray<T>, b: &TimeValueArray<T>) -> usize {
        match self {
            Self::WorstCase => a.len() + b.len(),
            Self::Exact => merged_len(a, b),
        }
    }
}

/// Returns the number of distinct timestamps across `a` and `b`, which is the
/// length of `a` after `a.merge(b)`.
pub fn merged_len<T: ArrayValue>(a: &TimeValueArray<T>, b: &TimeValueArray<T>) -> usize {
    a.len() + b.len() - count_shared(&a.timestamps, &b.timestamps)
}

fn count_shared(a: &[Timestamp], b: &[Timestamp]) -> usize {
    let (mut i, mut j, mut shared) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    shared
}

/// Appends the merge of `a` and `b` to `out`. `out` must be empty.
fn merge_into<T: ArrayValue>(
    a: &TimeValueArray<T>,
    b: &TimeValueArray<T>,
    out: &mut TimeValueArray<T>,
) {
    debug_assert!(out.is_empty());
    let (a_ts, b_ts) = (&a.timestamps, &b.timestamps);
    let (mut i, mut j) = (0, 0);

    while i < a_ts.len() && j < b_ts.len() {
        match a_ts[i].cmp(&b_ts[j]) {
            Ordering::Less => {
                out.timestamps.push(a_ts[i]);
                out.values.push(a.values[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                out.timestamps.push(b_ts[j]);
                out.values.push(b.values[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                out.timestamps.push(b_ts[j]);
                out.values.push(b.values[j].clone());
                i += 1;
                j += 1;
            }
        }
    }

    out.timestamps.extend_from_slice(&a_ts[i..]);
    out.values.extend_from_slice(&a.values[i..]);
    out.timestamps.extend_from_slice(&b_ts[j..]);
    out.values.extend_from_slice(&b.values[j..]);
}

impl<T: ArrayValue> TimeValueArray<T> {
    /// Merges `other` into `self`.
    ///
    /// Afterwards `self` holds the union of both timestamp sets in ascending
    /// order. Where both arrays have a point at the same timestamp the value
    /// from `other` is kept. `other` is not modified and the result shares no
    /// storage with it.
    ///
    /// The output buffer is sized for the worst case (`self.len() +
    /// other.len()`). Use [`try_merge`](Self::try_merge) to choose the sizing
    /// strategy or to handle allocation failure, or
    /// [`ArrayPool::merge`](crate::ArrayPool::merge) to reuse buffers.
    pub fn merge(&mut self, other: &Self) {
        self.debug_check_inputs(other);

        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.timestamps.clone_from(&other.timestamps);
            self.values.clone_from(&other.values);
            return;
        }

        let mut out = Self::with_capacity(self.len() + other.len());
        merge_into(self, other, &mut out);
        *self = out;

        debug_assert!(self.is_well_formed());
    }

    /// Merges `other` into `self` with the given output sizing, returning an
    /// error instead of aborting if the output buffer cannot be allocated.
    ///
    /// On error `self` is left unchanged.
    pub fn try_merge(&mut self, other: &Self, sizing: OutputSizing) -> Result<()> {
        self.debug_check_inputs(other);

        if other.is_empty() {
            return Ok(());
        }

        let mut out = Self::try_with_capacity(sizing.capacity(self, other))?;
        if self.is_empty() {
            out.extend_from(other);
        } else {
            merge_into(self, other, &mut out);
        }
        *self = out;

        debug_assert!(self.is_well_formed());
        Ok(())
    }

    /// Merges `other` into `self` using `scratch` as the output buffer and
    /// returns the storage previously owned by `self`.
    ///
    /// `scratch` must be empty and is expected to already have enough
    /// capacity. When `other` is empty nothing is merged and `scratch` is
    /// returned as is.
    pub(crate) fn merge_with_scratch(&mut self, other: &Self, mut scratch: Self) -> Self {
        self.debug_check_inputs(other);
        debug_assert!(scratch.is_empty());

        if other.is_empty() {
            return scratch;
        }
        if self.is_empty() {
            scratch.extend_from(other);
        } else {
            merge_into(self, other, &mut scratch);
        }

        debug_assert!(scratch.is_well_formed());
        std::mem::replace(self, scratch)
    }

    fn debug_check_inputs(&self, other: &Self) {
        debug_assert!(
            self.is_well_formed(),
            "merge receiver is not sorted and duplicate-free"
        );
        debug_assert!(
            other.is_well_formed(),
            "merge argument is not sorted and duplicate-free"
        );
    }
}
