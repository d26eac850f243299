//! Hashing, equality and ordering for scalar numbers.
//!
//! Integral values are carried as `i64` and floating values as `f64`. The
//! functions here compare the two representations without ever rounding:
//! an `i64` is only converted to `f64` when its magnitude fits in the 53-bit
//! mantissa, and a finite `f64` is only converted to `i64` when it is known
//! to be integral and in range.
//!
//! # Invariants
//!
//! - Two numbers that compare `Equal` hash to the same value.
//! - `compare_*` never fails: NaN sorts after every number (and equal to
//!   itself), infinities sort by sign.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]

use std::cmp::Ordering;

/// Mask of the high 11 bits of a long. A long whose masked bits are all
/// sign bits has a magnitude below 2^53 and converts to `f64` exactly.
pub const NON_DOUBLE_LONG: i64 = 0xFFE0_0000_0000_0000_u64 as i64;

/// 2^63 as a double: the first value above the `i64` range.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Hash of a long: low 32 bits xor high 32 bits.
#[must_use]
pub const fn hash_long(number: i64) -> i32 {
    (number ^ ((number as u64) >> 32) as i64) as i32
}

/// Hash of a double.
///
/// A double holding an exact integer hashes like the equal long, so values
/// that compare equal across representations land in the same bucket.
#[must_use]
pub fn hash_double(number: f64) -> i32 {
    let as_long = number as i64;
    if as_long as f64 == number {
        return hash_long(as_long);
    }
    let bits = if number.is_nan() {
        f64::NAN.to_bits()
    } else {
        number.to_bits()
    };
    hash_long(bits as i64)
}

#[must_use]
pub fn hash_float(number: f32) -> i32 {
    hash_double(f64::from(number))
}

/// Polynomial combination of element hashes, seeded with 1.
#[must_use]
pub fn hash_elements<I>(element_hashes: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    element_hashes
        .into_iter()
        .fold(1_i32, |acc, hash| acc.wrapping_mul(31).wrapping_add(hash))
}

/// Hash of a single boolean element.
#[must_use]
pub const fn hash_boolean(value: bool) -> i32 {
    if value { 1231 } else { 1237 }
}

/// True if `n` converts to `f64` without losing precision.
#[must_use]
pub const fn fits_in_double(n: i64) -> bool {
    let high = n & NON_DOUBLE_LONG;
    high == 0 || high == NON_DOUBLE_LONG
}

/// Equality between a double and a long, true only when no precision is
/// lost between the two representations.
#[must_use]
pub fn numbers_equal(fpn: f64, n: i64) -> bool {
    if n < 0 {
        if fpn < 0.0 {
            if (NON_DOUBLE_LONG & n) == NON_DOUBLE_LONG {
                return fpn == n as f64;
            } else if fpn < -TWO_POW_63 {
                return false;
            } else if fpn == fpn.floor() && !fpn.is_infinite() {
                return n == fpn as i64;
            }
        }
    } else if fpn >= 0.0 {
        if (NON_DOUBLE_LONG & n) == 0 {
            return fpn == n as f64;
        } else if fpn >= TWO_POW_63 {
            return false;
        } else if fpn == fpn.floor() && !fpn.is_infinite() {
            return n == fpn as i64;
        }
    }
    false
}

/// Total order over doubles used by the index.
///
/// NaN is greater than every number and equal to itself. `-0.0` and `0.0`
/// are equal, matching [`numbers_equal`] against the long `0`.
#[must_use]
pub fn compare_doubles(lhs: f64, rhs: f64) -> Ordering {
    match (lhs.is_nan(), rhs.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
    }
}

/// Compare a double against a long without rounding either side.
#[must_use]
pub fn compare_double_against_long(lhs: f64, rhs: i64) -> Ordering {
    if fits_in_double(rhs) {
        return compare_doubles(lhs, rhs as f64);
    }
    if lhs.is_nan() {
        return Ordering::Greater;
    }
    if lhs.is_infinite() {
        return if lhs < 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }
    compare_finite_exactly(lhs, rhs)
}

#[must_use]
pub fn compare_long_against_double(lhs: i64, rhs: f64) -> Ordering {
    compare_double_against_long(rhs, lhs).reverse()
}

/// Exact comparison of a finite double with a long.
///
/// Inside the long range the integral part of `lhs` is an exact `i64`, and
/// the fractional part only matters when the integral parts tie.
fn compare_finite_exactly(lhs: f64, rhs: i64) -> Ordering {
    if lhs >= TWO_POW_63 {
        return Ordering::Greater;
    }
    if lhs < -TWO_POW_63 {
        return Ordering::Less;
    }
    let whole = lhs.trunc() as i64;
    match whole.cmp(&rhs) {
        Ordering::Equal => compare_doubles(lhs.fract(), 0.0),
        unequal => unequal,
    }
}
