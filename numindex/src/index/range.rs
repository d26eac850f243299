//! Translation of predicates into seek bounds.
//!
//! # Range endpoints
//!
//! Range boundaries set the tie-break flag and pick an extreme entity id so
//! that keys holding the boundary value fall on the intended side:
//!
//! | endpoint        | entity id | effect                               |
//! |-----------------|-----------|--------------------------------------|
//! | from, inclusive | `MIN`     | sorts before every key with the value |
//! | from, exclusive | `MAX`     | sorts after every key with the value  |
//! | to, inclusive   | `MAX`     | sorts after every key with the value  |
//! | to, exclusive   | `MIN`     | sorts before every key with the value |

use std::slice;

use crate::index::error::IndexError;
use crate::index::key::NumberKey;
use crate::index::layout::NumberLayout;
use crate::index::query::{IndexQuery, NumberRange, QueryKind};
use crate::types::EntityId;
use crate::values::Value;

/// Inclusive seek bounds.
#[derive(Debug, Clone, Copy)]
pub struct KeyRange {
    pub from: NumberKey,
    pub to: NumberKey,
}

/// Builds [`KeyRange`]s for a layout.
#[derive(Debug, Clone, Copy)]
pub struct KeyRangeBuilder {
    layout: NumberLayout,
}

impl KeyRangeBuilder {
    #[must_use]
    pub const fn new(layout: NumberLayout) -> Self {
        Self { layout }
    }

    /// Bounds covering every key in the tree.
    #[must_use]
    pub const fn everything(&self) -> KeyRange {
        let mut from = self.layout.new_key();
        from.init_as_lowest();
        let mut to = self.layout.new_key();
        to.init_as_highest();
        KeyRange { from, to }
    }

    /// Bounds for a single predicate.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPredicate` for values a number index cannot
    /// match exactly: non-numeric values, arrays and NaN.
    pub fn for_query(&self, query: &IndexQuery) -> Result<KeyRange, IndexError> {
        match query {
            IndexQuery::Exists => Ok(self.everything()),
            IndexQuery::Exact(value) => {
                let from = self.boundary(QueryKind::Exact, EntityId::MIN, value, false)?;
                let to = self.boundary(QueryKind::Exact, EntityId::MAX, value, false)?;
                Ok(KeyRange { from, to })
            }
            IndexQuery::Range(range) => self.for_range(range),
        }
    }

    /// Bounds matching exactly `(entity_id, values)`.
    ///
    /// Both bounds are the same key without the tie-break flag. In a unique
    /// layout that range covers every key with the value, whatever its
    /// entity; callers that care about the entity must check it on each hit.
    pub fn for_entity(&self, entity_id: EntityId, values: &[Value]) -> Result<KeyRange, IndexError> {
        let mut key = self.layout.new_key();
        key.init_from(entity_id, values)?;
        Ok(KeyRange { from: key, to: key })
    }

    fn for_range(&self, range: &NumberRange) -> Result<KeyRange, IndexError> {
        let from = match &range.from {
            Some(value) => {
                let entity = if range.from_inclusive {
                    EntityId::MIN
                } else {
                    EntityId::MAX
                };
                self.boundary(QueryKind::Range, entity, value, true)?
            }
            None => self.everything().from,
        };
        let to = match &range.to {
            Some(value) => {
                let entity = if range.to_inclusive {
                    EntityId::MAX
                } else {
                    EntityId::MIN
                };
                self.boundary(QueryKind::Range, entity, value, true)?
            }
            None => self.everything().to,
        };
        Ok(KeyRange { from, to })
    }

    fn boundary(
        &self,
        kind: QueryKind,
        entity_id: EntityId,
        value: &Value,
        tie_break: bool,
    ) -> Result<NumberKey, IndexError> {
        let Some(number) = value.as_number() else {
            return Err(IndexError::UnsupportedPredicate {
                kind,
                reason: format!("{} values are not held by a number index", value.type_name()),
            });
        };
        if number.is_nan() {
            return Err(IndexError::UnsupportedPredicate {
                kind,
                reason: "NaN has no position in the number order".to_string(),
            });
        }

        let mut key = self.layout.new_key();
        key.init_from(entity_id, slice::from_ref(value))?;
        key.entity_id_is_special_tie_breaker = tie_break;
        Ok(key)
    }
}
