//! Common helpers for end-to-end tests.

use std::sync::Arc;

use crate::index::{IndexError, IndexQuery, NumberIndexReader, NumberLayout};
use crate::storage::MemoryTree;
use crate::testing::{init_tracing, new_test_reader};

/// Entities and values of the shared fixture index.
pub const FIXTURE: [(i64, i64); 3] = [(1, 5), (2, 5), (3, 7)];

/// A non-unique index holding `{1: 5, 2: 5, 3: 7}`.
#[must_use]
pub fn fixture_reader() -> (Arc<MemoryTree>, NumberIndexReader<MemoryTree>) {
    init_tracing();
    new_test_reader(NumberLayout::NonUnique, FIXTURE)
}

/// Run a single predicate and collect the raw entity ids it yields.
#[allow(clippy::expect_used)]
pub fn query_ids(reader: &NumberIndexReader<MemoryTree>, query: IndexQuery) -> Vec<i64> {
    try_query_ids(reader, query).expect("query should succeed")
}

/// Run a single predicate, surfacing the first error.
pub fn try_query_ids(
    reader: &NumberIndexReader<MemoryTree>,
    query: IndexQuery,
) -> Result<Vec<i64>, IndexError> {
    reader
        .query(&[query])?
        .map(|id| id.map(|id| id.as_i64()))
        .collect()
}
