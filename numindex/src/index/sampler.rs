//! Full-scan index sampling.
//!
//! A sampler is created cheaply by the reader and only touches the tree when
//! [`IndexSampler::sample_index`] runs. The scan covers the whole index, so
//! unique layouts are sampled the same way as non-unique ones.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::config::SamplingConfig;
use crate::index::error::IndexError;
use crate::index::range::KeyRange;
use crate::index::registry::scoped_seek;
use crate::storage::OrderedTree;
use crate::values::Number;

/// Result of sampling an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexSample {
    /// Entries in the index.
    pub index_size: u64,
    /// Distinct values seen. Approximate once the scan outgrows the
    /// configured sample size limit.
    pub unique_values: u64,
    /// Entries looked at while sampling.
    pub sample_size: u64,
}

/// A number keyed by cross-representation equality, so `5` and `5.0` land
/// in the same bucket.
struct SampledValue(Number);

impl PartialEq for SampledValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.compare(&other.0) == Ordering::Equal
    }
}

impl Eq for SampledValue {}

impl Hash for SampledValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_code().hash(state);
    }
}

/// Deferred full scan of an index.
pub struct IndexSampler<T: OrderedTree + ?Sized> {
    tree: Arc<T>,
    range: KeyRange,
    config: SamplingConfig,
}

impl<T: OrderedTree + ?Sized> IndexSampler<T> {
    pub(crate) const fn new(tree: Arc<T>, range: KeyRange, config: SamplingConfig) -> Self {
        Self {
            tree,
            range,
            config,
        }
    }

    /// Scan the index and summarize it.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails. The scan's cursor is closed
    /// either way.
    pub fn sample_index(&self) -> Result<IndexSample, IndexError> {
        let limit = self.config.sample_size_limit.get();

        let (entries, unique_values) = scoped_seek(self.tree.as_ref(), &self.range, |cursor| {
            let mut entries = 0_u64;
            let mut flushed = 0_u64;
            let mut values = HashSet::new();
            while cursor.advance()? {
                let Some(hit) = cursor.current() else {
                    break;
                };
                entries += 1;
                values.insert(SampledValue(hit.key.value));
                if values.len() >= limit {
                    flushed += values.len() as u64;
                    values.clear();
                }
            }
            Ok((entries, flushed + values.len() as u64))
        })?;

        let sample = IndexSample {
            index_size: entries,
            unique_values,
            sample_size: entries,
        };
        tracing::info!(
            "sampled {} index entries, {} unique values",
            sample.index_size,
            sample.unique_values
        );
        Ok(sample)
    }
}
