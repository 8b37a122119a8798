//! Runtime-tagged arrays for callers that only learn the value domain from a
//! block header.

use crate::array::{
    BooleanArray, FloatArray, IntegerArray, StringArray, Timestamp, UnsignedArray,
};
use crate::error::{ArrayError, Result};
use crate::value::ValueType;

/// A time-value array of any supported value domain.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    /// Boolean values.
    Boolean(BooleanArray),
    /// Float values.
    Float(FloatArray),
    /// Signed integer values.
    Integer(IntegerArray),
    /// Unsigned integer values.
    Unsigned(UnsignedArray),
    /// Text values.
    String(StringArray),
}

/// Runs `$body` with `$a` bound to the inner array of `$self`.
macro_rules! dispatch {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            TypedArray::Boolean($a) => $body,
            TypedArray::Float($a) => $body,
            TypedArray::Integer($a) => $body,
            TypedArray::Unsigned($a) => $body,
            TypedArray::String($a) => $body,
        }
    };
}

impl TypedArray {
    /// Creates a zeroed array of `n` points for the given domain.
    pub fn new_len(value_type: ValueType, n: usize) -> Self {
        match value_type {
            ValueType::Boolean => Self::Boolean(BooleanArray::new_len(n)),
            ValueType::Float => Self::Float(FloatArray::new_len(n)),
            ValueType::Integer => Self::Integer(IntegerArray::new_len(n)),
            ValueType::Unsigned => Self::Unsigned(UnsignedArray::new_len(n)),
            ValueType::String => Self::String(StringArray::new_len(n)),
        }
    }

    /// Returns the value domain.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Boolean(_) => ValueType::Boolean,
            Self::Float(_) => ValueType::Float,
            Self::Integer(_) => ValueType::Integer,
            Self::Unsigned(_) => ValueType::Unsigned,
            Self::String(_) => ValueType::String,
        }
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        dispatch!(self, a => a.len())
    }

    /// Returns true if the array holds no points.
    pub fn is_empty(&self) -> bool {
        dispatch!(self, a => a.is_empty())
    }

    /// Returns the timestamp column.
    pub fn timestamps(&self) -> &[Timestamp] {
        dispatch!(self, a => a.timestamps())
    }

    /// Returns the first timestamp.
    pub fn min_time(&self) -> Option<Timestamp> {
        dispatch!(self, a => a.min_time())
    }

    /// Returns the last timestamp.
    pub fn max_time(&self) -> Option<Timestamp> {
        dispatch!(self, a => a.max_time())
    }

    /// Removes every point in `[min, max]`.
    pub fn exclude(&mut self, min: Timestamp, max: Timestamp) {
        dispatch!(self, a => a.exclude(min, max))
    }

    /// Keeps only the points in `[min, max]`.
    pub fn include(&mut self, min: Timestamp, max: Timestamp) {
        dispatch!(self, a => a.include(min, max))
    }

    /// Estimated memory footprint in bytes.
    pub fn size(&self) -> usize {
        dispatch!(self, a => a.size())
    }

    /// Checks the array invariants.
    pub fn validate(&self) -> Result<()> {
        dispatch!(self, a => a.validate())
    }

    /// Merges `other` into `self`; `other` wins on equal timestamps.
    ///
    /// Fails with [`ArrayError::TypeMismatch`] if the domains differ, in which
    /// case `self` is unchanged.
    pub fn merge(&mut self, other: &TypedArray) -> Result<()> {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a.merge(b),
            (Self::Float(a), Self::Float(b)) => a.merge(b),
            (Self::Integer(a), Self::Integer(b)) => a.merge(b),
            (Self::Unsigned(a), Self::Unsigned(b)) => a.merge(b),
            (Self::String(a), Self::String(b)) => a.merge(b),
            (a, b) => {
                return Err(ArrayError::TypeMismatch {
                    expected: a.value_type(),
                    actual: b.value_type(),
                })
            }
        }
        Ok(())
    }
}

impl From<BooleanArray> for TypedArray {
    fn from(a: BooleanArray) -> Self {
        Self::Boolean(a)
    }
}

impl From<FloatArray> for TypedArray {
    fn from(a: FloatArray) -> Self {
        Self::Float(a)
    }
}

impl From<IntegerArray> for TypedArray {
    fn from(a: IntegerArray) -> Self {
        Self::Integer(a)
    }
}

impl From<UnsignedArray> for TypedArray {
    fn from(a: UnsignedArray) -> Self {
        Self::Unsigned(a)
    }
}

impl From<StringArray> for TypedArray {
    fn from(a: StringArray) -> Self {
        Self::String(a)
    }
}
