//! Numeric and boolean arrays.
//!
//! Arrays are compared length-first: a shorter array always sorts before a
//! longer one. Arrays of equal length compare by their first unequal
//! element.

use std::cmp::Ordering;

use crate::values::number::{
    compare_doubles, compare_long_against_double, hash_boolean, hash_double, hash_elements,
    hash_long, numbers_equal,
};

/// A borrowed array of integral elements, widened to `i64` on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegralArray<'a> {
    Byte(&'a [i8]),
    Short(&'a [i16]),
    Int(&'a [i32]),
    Long(&'a [i64]),
}

impl IntegralArray<'_> {
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Byte(values) => values.len(),
            Self::Short(values) => values.len(),
            Self::Int(values) => values.len(),
            Self::Long(values) => values.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `index` widened to a long, or `None` past the end.
    #[must_use]
    pub fn long_value(&self, index: usize) -> Option<i64> {
        match self {
            Self::Byte(values) => values.get(index).copied().map(i64::from),
            Self::Short(values) => values.get(index).copied().map(i64::from),
            Self::Int(values) => values.get(index).copied().map(i64::from),
            Self::Long(values) => values.get(index).copied(),
        }
    }

    /// All elements widened to longs, in order.
    pub fn longs(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.len()).filter_map(|index| self.long_value(index))
    }

    #[must_use]
    pub fn hash_code(&self) -> i32 {
        hash_elements(self.longs().map(hash_long))
    }
}

/// A borrowed array of floating point elements, widened to `f64` on access.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatingPointArray<'a> {
    Float(&'a [f32]),
    Double(&'a [f64]),
}

impl FloatingPointArray<'_> {
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Float(values) => values.len(),
            Self::Double(values) => values.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn double_value(&self, index: usize) -> Option<f64> {
        match self {
            Self::Float(values) => values.get(index).copied().map(f64::from),
            Self::Double(values) => values.get(index).copied(),
        }
    }

    pub fn doubles(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).filter_map(|index| self.double_value(index))
    }

    #[must_use]
    pub fn hash_code(&self) -> i32 {
        hash_elements(self.doubles().map(hash_double))
    }
}

/// Length first, then the first element pair that does not compare equal.
fn compare_elementwise<A, B, F>(
    lhs_len: usize,
    rhs_len: usize,
    lhs: impl Iterator<Item = A>,
    rhs: impl Iterator<Item = B>,
    compare: F,
) -> Ordering
where
    F: Fn(A, B) -> Ordering,
{
    lhs_len.cmp(&rhs_len).then_with(|| {
        lhs.zip(rhs)
            .map(|(a, b)| compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

#[must_use]
pub fn compare_integer_arrays(a: IntegralArray<'_>, b: IntegralArray<'_>) -> Ordering {
    compare_elementwise(a.len(), b.len(), a.longs(), b.longs(), |x: i64, y: i64| {
        x.cmp(&y)
    })
}

#[must_use]
pub fn compare_integer_vs_float_arrays(
    a: IntegralArray<'_>,
    b: FloatingPointArray<'_>,
) -> Ordering {
    compare_elementwise(
        a.len(),
        b.len(),
        a.longs(),
        b.doubles(),
        compare_long_against_double,
    )
}

/// Orders elements with [`compare_doubles`], so `-0.0` and `0.0` compare
/// equal here. A total order such as `f64::total_cmp` would put `[-0.0]`
/// before `[0.0]`; this one keeps array order consistent with scalar
/// equality, where `-0.0 == 0`.
#[must_use]
pub fn compare_float_arrays(a: FloatingPointArray<'_>, b: FloatingPointArray<'_>) -> Ordering {
    compare_elementwise(a.len(), b.len(), a.doubles(), b.doubles(), compare_doubles)
}

#[must_use]
pub fn compare_boolean_arrays(a: &[bool], b: &[bool]) -> Ordering {
    compare_elementwise(
        a.len(),
        b.len(),
        a.iter().copied(),
        b.iter().copied(),
        |x: bool, y: bool| x.cmp(&y),
    )
}

#[must_use]
pub fn integral_arrays_equal(lhs: IntegralArray<'_>, rhs: IntegralArray<'_>) -> bool {
    lhs.len() == rhs.len() && lhs.longs().eq(rhs.longs())
}

/// Element equality uses IEEE `==`: NaN never equals NaN.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn floating_arrays_equal(lhs: FloatingPointArray<'_>, rhs: FloatingPointArray<'_>) -> bool {
    lhs.len() == rhs.len() && lhs.doubles().zip(rhs.doubles()).all(|(a, b)| a == b)
}

#[must_use]
pub fn floating_integral_arrays_equal(
    fps: FloatingPointArray<'_>,
    ins: IntegralArray<'_>,
) -> bool {
    fps.len() == ins.len()
        && fps
            .doubles()
            .zip(ins.longs())
            .all(|(fpn, n)| numbers_equal(fpn, n))
}

/// Any array an index value may hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberArray<'a> {
    Integral(IntegralArray<'a>),
    Floating(FloatingPointArray<'a>),
    Boolean(&'a [bool]),
}

impl NumberArray<'_> {
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Integral(array) => array.len(),
            Self::Floating(array) => array.len(),
            Self::Boolean(values) => values.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Order against another array, or `None` when one side is boolean and
    /// the other numeric.
    #[must_use]
    pub fn compare(&self, other: &NumberArray<'_>) -> Option<Ordering> {
        match (*self, *other) {
            (Self::Integral(a), NumberArray::Integral(b)) => Some(compare_integer_arrays(a, b)),
            (Self::Integral(a), NumberArray::Floating(b)) => {
                Some(compare_integer_vs_float_arrays(a, b))
            }
            (Self::Floating(a), NumberArray::Integral(b)) => {
                Some(compare_integer_vs_float_arrays(b, a).reverse())
            }
            (Self::Floating(a), NumberArray::Floating(b)) => Some(compare_float_arrays(a, b)),
            (Self::Boolean(a), NumberArray::Boolean(b)) => Some(compare_boolean_arrays(a, b)),
            _ => None,
        }
    }

    #[must_use]
    pub fn equals(&self, other: &NumberArray<'_>) -> bool {
        match (*self, *other) {
            (Self::Integral(a), NumberArray::Integral(b)) => integral_arrays_equal(a, b),
            (Self::Floating(a), NumberArray::Floating(b)) => floating_arrays_equal(a, b),
            (Self::Floating(a), NumberArray::Integral(b)) => floating_integral_arrays_equal(a, b),
            (Self::Integral(a), NumberArray::Floating(b)) => floating_integral_arrays_equal(b, a),
            (Self::Boolean(a), NumberArray::Boolean(b)) => a == b,
            _ => false,
        }
    }

    #[must_use]
    pub fn hash_code(&self) -> i32 {
        match self {
            Self::Integral(array) => array.hash_code(),
            Self::Floating(array) => array.hash_code(),
            Self::Boolean(values) => hash_elements(values.iter().copied().map(hash_boolean)),
        }
    }
}
