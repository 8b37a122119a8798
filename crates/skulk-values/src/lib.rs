//! Skulk Values - typed time-value arrays for the Alopex Skulk time series engine.
//!
//! This crate provides the column type that sits between block decoding, the
//! write cache and the query cursors, together with the last-writer-wins merge
//! that reconciles cached writes with persisted blocks.
//!
//! # Components
//!
//! - [`TimeValueArray`]: ordered (timestamp, value) column, generic over the
//!   five value domains ([`BooleanArray`], [`FloatArray`], [`IntegerArray`],
//!   [`UnsignedArray`], [`StringArray`])
//! - [`TimeValueArray::merge`]: right-biased linear merge of two arrays
//! - [`TypedArray`]: runtime-tagged array for block-header driven dispatch
//! - [`ArrayPool`]: reusable merge output buffers
//!
//! # Example
//!
//! ```rust
//! use alopex_skulk_values::BooleanArray;
//!
//! let mut disk: BooleanArray = vec![(0, true), (2, true), (4, true)].into_iter().collect();
//! let cache: BooleanArray = vec![(1, false), (2, false)].into_iter().collect();
//!
//! // Cached writes are newer and win on equal timestamps.
//! disk.merge(&cache);
//!
//! let points: Vec<_> = disk.iter().map(|(ts, v)| (ts, *v)).collect();
//! assert_eq!(points, vec![(0, true), (1, false), (2, false), (4, true)]);
//! ```

#![deny(missing_docs)]

pub mod array;
pub mod error;
pub mod pool;
pub mod typed;
pub mod value;

pub use array::{
    merged_len, BooleanArray, FloatArray, IntegerArray, Iter, OutputSizing, StringArray,
    TimeValueArray, Timestamp, UnsignedArray,
};
pub use error::{ArrayError, Result};
pub use pool::{ArrayPool, PoolConfig, PoolStats};
pub use typed::TypedArray;
pub use value::{ArrayValue, ValueType};
