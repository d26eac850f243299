//! Property values and the numeric semantics the index is ordered by.
//!
//! `Value` is what callers hand to the reader. Only its numeric scalar
//! variants can be indexed; they are carried inside keys as a [`Number`].

pub mod array;
pub mod number;

use std::cmp::Ordering;
use std::fmt;

pub use array::{FloatingPointArray, IntegralArray, NumberArray};

use number::{compare_double_against_long, compare_doubles, hash_double, hash_long};

/// A numeric scalar as stored in an index key.
///
/// Integral values of any width are widened to `i64`, floating values to
/// `f64`. The representation is kept: an integral `5` and a floating `5.0`
/// are distinct variants that compare `Equal`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integral(i64),
    Floating(f64),
}

impl Number {
    /// Total order across both representations.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Self::Integral(a), Self::Integral(b)) => a.cmp(&b),
            (Self::Floating(a), Self::Floating(b)) => compare_doubles(a, b),
            (Self::Floating(a), Self::Integral(b)) => compare_double_against_long(a, b),
            (Self::Integral(a), Self::Floating(b)) => compare_double_against_long(b, a).reverse(),
        }
    }

    /// Value equality. Floating values use IEEE `==`, so NaN is not equal
    /// to itself here even though it compares `Equal` under [`Self::compare`].
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn numbers_equal(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Integral(a), Self::Integral(b)) => a == b,
            (Self::Floating(a), Self::Floating(b)) => a == b,
            (Self::Floating(fpn), Self::Integral(n)) | (Self::Integral(n), Self::Floating(fpn)) => {
                number::numbers_equal(fpn, n)
            }
        }
    }

    #[must_use]
    pub fn hash_code(&self) -> i32 {
        match self {
            Self::Integral(n) => hash_long(*n),
            Self::Floating(fpn) => hash_double(*fpn),
        }
    }

    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self, Self::Floating(fpn) if fpn.is_nan())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integral(n) => write!(f, "{n}"),
            Self::Floating(fpn) => write!(f, "{fpn:?}"),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::Integral(n)
    }
}

impl From<f64> for Number {
    fn from(fpn: f64) -> Self {
        Self::Floating(fpn)
    }
}

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Boolean(bool),
    Text(String),
    Int8Array(Vec<i8>),
    Int16Array(Vec<i16>),
    Int32Array(Vec<i32>),
    Int64Array(Vec<i64>),
    Float32Array(Vec<f32>),
    Float64Array(Vec<f64>),
    BooleanArray(Vec<bool>),
}

impl Value {
    /// The numeric scalar this value holds, if any.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Int8(n) => Some(Number::Integral(i64::from(*n))),
            Self::Int16(n) => Some(Number::Integral(i64::from(*n))),
            Self::Int32(n) => Some(Number::Integral(i64::from(*n))),
            Self::Int64(n) => Some(Number::Integral(*n)),
            Self::Float32(fpn) => Some(Number::Floating(f64::from(*fpn))),
            Self::Float64(fpn) => Some(Number::Floating(*fpn)),
            _ => None,
        }
    }

    /// A borrowed view of this value as an array, if it is one.
    #[must_use]
    pub fn as_array(&self) -> Option<NumberArray<'_>> {
        match self {
            Self::Int8Array(values) => Some(NumberArray::Integral(IntegralArray::Byte(values))),
            Self::Int16Array(values) => Some(NumberArray::Integral(IntegralArray::Short(values))),
            Self::Int32Array(values) => Some(NumberArray::Integral(IntegralArray::Int(values))),
            Self::Int64Array(values) => Some(NumberArray::Integral(IntegralArray::Long(values))),
            Self::Float32Array(values) => {
                Some(NumberArray::Floating(FloatingPointArray::Float(values)))
            }
            Self::Float64Array(values) => {
                Some(NumberArray::Floating(FloatingPointArray::Double(values)))
            }
            Self::BooleanArray(values) => Some(NumberArray::Boolean(values)),
            _ => None,
        }
    }

    /// Short name of the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Boolean(_) => "boolean",
            Self::Text(_) => "text",
            Self::Int8Array(_) => "int8[]",
            Self::Int16Array(_) => "int16[]",
            Self::Int32Array(_) => "int32[]",
            Self::Int64Array(_) => "int64[]",
            Self::Float32Array(_) => "float32[]",
            Self::Float64Array(_) => "float64[]",
            Self::BooleanArray(_) => "boolean[]",
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int64(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int32(n)
    }
}

impl From<f64> for Value {
    fn from(fpn: f64) -> Self {
        Self::Float64(fpn)
    }
}

impl From<f32> for Value {
    fn from(fpn: f32) -> Self {
        Self::Float32(fpn)
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Integral(n) => Self::Int64(n),
            Number::Floating(fpn) => Self::Float64(fpn),
        }
    }
}
