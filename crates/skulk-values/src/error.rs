//! Error and Result types for Skulk value arrays.

use crate::value::ValueType;
use std::collections::TryReserveError;
use thiserror::Error;

/// A convenience `Result` type for value array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;

/// The error type for value array operations.
#[derive(Debug, Error)]
pub enum ArrayError {
    /// The output buffer for a merge or pooled acquire could not be allocated.
    #[error("Allocation failed: could not reserve {requested} slots: {source}")]
    AllocationFailed {
        /// Number of slots that were requested.
        requested: usize,
        /// Underlying allocator error.
        #[source]
        source: TryReserveError,
    },

    /// Timestamp and value columns differ in length.
    #[error("Length mismatch: {timestamps} timestamps, {values} values")]
    LengthMismatch {
        /// Length of the timestamp column.
        timestamps: usize,
        /// Length of the value column.
        values: usize,
    },

    /// The timestamp column is not strictly increasing.
    #[error("Unsorted timestamps at index {index}: {current} does not follow {previous}")]
    UnsortedTimestamps {
        /// Index of the offending timestamp.
        index: usize,
        /// Timestamp at `index - 1`.
        previous: i64,
        /// Timestamp at `index`.
        current: i64,
    },

    /// Two runtime-typed arrays hold different value domains.
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Value type of the receiver.
        expected: ValueType,
        /// Value type of the argument.
        actual: ValueType,
    },
}
