//! Entity identifier type.
//!
//! This module provides the newtype wrapper for the ids of indexed
//! entities, together with the two extreme values that range keys use as
//! tie-break sentinels.

use std::fmt;

/// Identifier of an indexed entity.
///
/// Wraps a signed 64-bit integer. The inner field is public so storage code
/// can read the raw id.
///
/// # Invariants
///
/// - Real entities use ids strictly between [`EntityId::MIN`] and
///   [`EntityId::MAX`]. The extremes are reserved for range-boundary keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EntityId(pub i64);

impl EntityId {
    /// Lowest id. Only used to position range boundaries.
    pub const MIN: Self = Self(i64::MIN);
    /// Highest id. Only used to position range boundaries.
    pub const MAX: Self = Self(i64::MAX);

    /// Get the raw id.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// True for the two reserved extremes.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == i64::MIN || self.0 == i64::MAX
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<EntityId> for i64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
