//! Composite index keys.
//!
//! A key pairs an entity id with the indexed numeric value. Stored keys
//! always describe a real entity; range boundaries reuse the same type with
//! `entity_id_is_special_tie_breaker` set, which makes the entity id an
//! ordering device for the boundary value rather than a real id.

use std::cmp::Ordering;
use std::fmt;

use crate::types::EntityId;
use crate::values::{Number, Value};

/// Key of the numeric index: `(entity_id, value)` plus the tie-break flag.
#[derive(Debug, Clone, Copy)]
pub struct NumberKey {
    pub entity_id: EntityId,
    pub value: Number,
    /// When set on either side of a comparison, equal values are ordered by
    /// entity id even in a unique layout.
    pub entity_id_is_special_tie_breaker: bool,
}

impl NumberKey {
    /// A blank key: entity 0, integral value 0, no tie-break.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entity_id: EntityId(0),
            value: Number::Integral(0),
            entity_id_is_special_tie_breaker: false,
        }
    }

    /// Make this key sort below every stored key.
    pub const fn init_as_lowest(&mut self) {
        self.entity_id = EntityId::MIN;
        self.value = Number::Floating(f64::NEG_INFINITY);
        self.entity_id_is_special_tie_breaker = true;
    }

    /// Make this key sort above every stored key, NaN values included.
    pub const fn init_as_highest(&mut self) {
        self.entity_id = EntityId::MAX;
        self.value = Number::Floating(f64::NAN);
        self.entity_id_is_special_tie_breaker = true;
    }

    /// Point this key at `(entity_id, values[0])` and clear the tie-break.
    ///
    /// # Errors
    ///
    /// Returns an error unless `values` holds exactly one numeric scalar.
    pub fn init_from(&mut self, entity_id: EntityId, values: &[Value]) -> Result<(), KeyError> {
        let [value] = values else {
            return Err(KeyError::ValueCount(values.len()));
        };
        let number = value
            .as_number()
            .ok_or(KeyError::NonNumericValue(value.type_name()))?;

        self.entity_id = entity_id;
        self.value = number;
        self.entity_id_is_special_tie_breaker = false;
        Ok(())
    }

    /// Compare only the values of two keys.
    #[must_use]
    pub fn compare_value_to(&self, other: &Self) -> Ordering {
        self.value.compare(&other.value)
    }
}

impl Default for NumberKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NumberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}", self.entity_id, self.value)?;
        if self.entity_id_is_special_tie_breaker {
            write!(f, ", tie-break")?;
        }
        write!(f, ")")
    }
}

/// Errors that can occur when building a key from property values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The key holds exactly one value; this many were given.
    ValueCount(usize),
    /// The value is not a numeric scalar.
    NonNumericValue(&'static str),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueCount(count) => {
                write!(f, "expected exactly one property value, got {count}")
            }
            Self::NonNumericValue(type_name) => {
                write!(f, "value of type {type_name} cannot be stored in a number key")
            }
        }
    }
}

impl std::error::Error for KeyError {}
