//! Key ordering for the ordered tree.

use std::cmp::Ordering;

use crate::index::key::NumberKey;

/// How the tree orders [`NumberKey`]s.
///
/// Keys sort by value first. What happens on a value tie depends on the
/// layout:
///
/// - `NonUnique`: the entity id decides, so every `(entity, value)` pair is
///   a distinct key.
/// - `Unique`: keys with equal values are equal, unless either key carries
///   the tie-break flag, in which case the entity id decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLayout {
    Unique,
    NonUnique,
}

impl NumberLayout {
    /// A blank key to be initialised by the caller.
    #[must_use]
    pub const fn new_key(self) -> NumberKey {
        NumberKey::new()
    }

    #[must_use]
    pub const fn is_unique(self) -> bool {
        matches!(self, Self::Unique)
    }

    #[must_use]
    pub fn compare(self, a: &NumberKey, b: &NumberKey) -> Ordering {
        let comparison = a.compare_value_to(b);
        if comparison != Ordering::Equal {
            return comparison;
        }
        let tie_break = a.entity_id_is_special_tie_breaker || b.entity_id_is_special_tie_breaker;
        if tie_break || !self.is_unique() {
            a.entity_id.cmp(&b.entity_id)
        } else {
            Ordering::Equal
        }
    }
}
