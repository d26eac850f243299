//! Read access to a number index.
//!
//! # Invariants
//!
//! - Every cursor the reader opens is either closed by the caller draining
//!   it, or by [`NumberIndexReader::close`] (or drop).
//! - Hits of one query come out in key order: by value, then entity id.

use std::iter::FusedIterator;
use std::sync::Arc;

use crate::config::SamplingConfig;
use crate::index::error::IndexError;
use crate::index::key::NumberKey;
use crate::index::query::IndexQuery;
use crate::index::range::{KeyRange, KeyRangeBuilder};
use crate::index::registry::{CursorRegistry, RegisteredCursor, scoped_seek};
use crate::index::sampler::IndexSampler;
use crate::storage::OrderedTree;
use crate::types::EntityId;
use crate::values::Value;

/// Answers predicates against a number index stored in an ordered tree.
pub struct NumberIndexReader<T: OrderedTree + ?Sized> {
    tree: Arc<T>,
    ranges: KeyRangeBuilder,
    registry: Arc<CursorRegistry>,
    sampling: SamplingConfig,
}

impl<T: OrderedTree + ?Sized> NumberIndexReader<T> {
    /// Create a reader with default sampling configuration.
    ///
    /// The environment is not consulted; pass [`SamplingConfig::from_env`]
    /// to [`Self::with_sampling_config`] for that.
    #[must_use]
    pub fn new(tree: Arc<T>) -> Self {
        Self::with_sampling_config(tree, SamplingConfig::default())
    }

    #[must_use]
    pub fn with_sampling_config(tree: Arc<T>, sampling: SamplingConfig) -> Self {
        let ranges = KeyRangeBuilder::new(tree.layout());
        Self {
            tree,
            ranges,
            registry: Arc::new(CursorRegistry::new()),
            sampling,
        }
    }

    /// Entity ids matching a single predicate, in key order.
    ///
    /// The returned iterator is lazy and forward-only. Its cursor stays open
    /// until it is drained or the reader is closed.
    ///
    /// # Errors
    ///
    /// - `UnsupportedOperation` unless exactly one predicate is given
    /// - `UnsupportedPredicate` if the predicate's value cannot be indexed
    /// - `Storage` if the seek fails
    pub fn query(&self, predicates: &[IndexQuery]) -> Result<NumberHits, IndexError> {
        let [predicate] = predicates else {
            return Err(IndexError::UnsupportedOperation {
                predicates: predicates.len(),
            });
        };
        let range = self.ranges.for_query(predicate)?;
        let cursor = self.registry.open(self.tree.as_ref(), &range)?;
        tracing::debug!("{} query opened cursor", predicate.kind());
        Ok(NumberHits {
            cursor,
            done: false,
        })
    }

    /// Number of index entries for `entity_id` holding `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` cannot form a key or the seek fails.
    pub fn count_indexed_nodes(
        &self,
        entity_id: EntityId,
        values: &[Value],
    ) -> Result<u64, IndexError> {
        let range = self.ranges.for_entity(entity_id, values)?;
        let count = scoped_seek(self.tree.as_ref(), &range, |cursor| {
            let mut count = 0_u64;
            while cursor.advance()? {
                if cursor
                    .current()
                    .is_some_and(|hit| hit.key.entity_id == entity_id)
                {
                    count += 1;
                }
            }
            Ok(count)
        })?;
        tracing::trace!("counted {count} entries for entity {entity_id}");
        Ok(count)
    }

    /// A sampler over the whole index. Nothing is read until it runs.
    #[must_use]
    pub fn create_sampler(&self) -> IndexSampler<T> {
        IndexSampler::new(Arc::clone(&self.tree), self.everything(), self.sampling)
    }

    /// Close every cursor this reader still has open.
    ///
    /// Safe to call more than once.
    ///
    /// # Errors
    ///
    /// Returns `CloseFailed` listing every cursor that failed to close.
    pub fn close(&self) -> Result<(), IndexError> {
        self.registry.close_all()
    }

    /// Values are stored without loss, so equality results need no
    /// rechecking by the caller.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn has_full_number_precision(&self) -> bool {
        true
    }

    /// Cursors opened by queries and not yet closed.
    #[must_use]
    pub fn open_cursor_count(&self) -> usize {
        self.registry.live_count()
    }

    const fn everything(&self) -> KeyRange {
        self.ranges.everything()
    }
}

impl<T: OrderedTree + ?Sized> Drop for NumberIndexReader<T> {
    fn drop(&mut self) {
        if let Err(e) = self.registry.close_all() {
            tracing::warn!("failed to close cursors on drop: {e}");
        }
    }
}

/// Entity ids yielded by a query.
///
/// Fuses after the range is exhausted or after the first error.
pub struct NumberHits {
    cursor: RegisteredCursor,
    done: bool,
}

impl NumberHits {
    /// Next full key rather than just its entity id.
    ///
    /// # Errors
    ///
    /// Returns the storage error that ended the iteration.
    pub fn next_key(&mut self) -> Result<Option<NumberKey>, IndexError> {
        if self.done {
            return Ok(None);
        }
        match self.cursor.next_key() {
            Ok(Some(key)) => Ok(Some(key)),
            Ok(None) => {
                self.done = true;
                Ok(None)
            }
            Err(e) => {
                self.done = true;
                Err(IndexError::Storage(e))
            }
        }
    }
}

impl Iterator for NumberHits {
    type Item = Result<EntityId, IndexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_key()
            .map(|key| key.map(|key| key.entity_id))
            .transpose()
    }
}

impl FusedIterator for NumberHits {}
