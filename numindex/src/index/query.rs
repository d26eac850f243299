//! Predicates the number index can answer.

use std::fmt;

use crate::values::Value;

/// A single index predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexQuery {
    /// Every entity that has an indexed value.
    Exists,
    /// Entities whose value equals the given number.
    Exact(Value),
    /// Entities whose value lies in a numeric range.
    Range(NumberRange),
}

impl IndexQuery {
    #[must_use]
    pub fn exact(value: impl Into<Value>) -> Self {
        Self::Exact(value.into())
    }

    /// A range bounded on both ends.
    #[must_use]
    pub fn range(
        from: impl Into<Value>,
        from_inclusive: bool,
        to: impl Into<Value>,
        to_inclusive: bool,
    ) -> Self {
        Self::Range(NumberRange {
            from: Some(from.into()),
            from_inclusive,
            to: Some(to.into()),
            to_inclusive,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        match self {
            Self::Exists => QueryKind::Exists,
            Self::Exact(_) => QueryKind::Exact,
            Self::Range(_) => QueryKind::Range,
        }
    }
}

/// Bounds of a numeric range query. A missing bound leaves that side open.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRange {
    pub from: Option<Value>,
    pub from_inclusive: bool,
    pub to: Option<Value>,
    pub to_inclusive: bool,
}

impl NumberRange {
    /// Everything at or above `from`.
    #[must_use]
    pub fn at_least(from: impl Into<Value>) -> Self {
        Self {
            from: Some(from.into()),
            from_inclusive: true,
            to: None,
            to_inclusive: true,
        }
    }

    /// Everything strictly below `to`.
    #[must_use]
    pub fn less_than(to: impl Into<Value>) -> Self {
        Self {
            from: None,
            from_inclusive: true,
            to: Some(to.into()),
            to_inclusive: false,
        }
    }
}

/// Discriminant of [`IndexQuery`], used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Exists,
    Exact,
    Range,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists => write!(f, "exists"),
            Self::Exact => write!(f, "exact"),
            Self::Range => write!(f, "range"),
        }
    }
}
