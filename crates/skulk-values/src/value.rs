//! Value domains that can be stored in a [`TimeValueArray`](crate::TimeValueArray).
//!
//! Five domains are supported: boolean, 64-bit float, signed and unsigned
//! 64-bit integers, and text. They share one array and merge implementation;
//! everything type-specific lives behind the [`ArrayValue`] trait.

use std::fmt;

/// Tag identifying the value domain of an array.
///
/// The numeric representation matches the per-block type byte written by the
/// TSM layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    /// `bool` values.
    Boolean = 0,
    /// `f64` values.
    Float = 1,
    /// `i64` values.
    Integer = 2,
    /// `u64` values.
    Unsigned = 3,
    /// `String` values.
    String = 4,
}

impl ValueType {
    /// Creates a ValueType from a u8 value.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Boolean),
            1 => Some(Self::Float),
            2 => Some(Self::Integer),
            3 => Some(Self::Unsigned),
            4 => Some(Self::String),
            _ => None,
        }
    }

    /// Returns the u8 representation.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// A value that can be stored in a time-value array.
///
/// `Clone` is the copy operation used by merge. For the scalar domains it is a
/// bitwise copy; for `String` it duplicates the character data so a merged
/// array never shares storage with its inputs.
pub trait ArrayValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Domain tag for this type.
    const VALUE_TYPE: ValueType;

    /// The value written into pre-allocated slots by `new_len`.
    fn zero() -> Self;

    /// Bytes owned by this value outside of the array slot itself.
    fn heap_size(&self) -> usize {
        0
    }
}

impl ArrayValue for bool {
    const VALUE_TYPE: ValueType = ValueType::Boolean;

    fn zero() -> Self {
        false
    }
}

impl ArrayValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn zero() -> Self {
        0.0
    }
}

impl ArrayValue for i64 {
    const VALUE_TYPE: ValueType = ValueType::Integer;

    fn zero() -> Self {
        0
    }
}

impl ArrayValue for u64 {
    const VALUE_TYPE: ValueType = ValueType::Unsigned;

    fn zero() -> Self {
        0
    }
}

impl ArrayValue for String {
    const VALUE_TYPE: ValueType = ValueType::String;

    fn zero() -> Self {
        String::new()
    }

    fn heap_size(&self) -> usize {
        self.len()
    }
}
