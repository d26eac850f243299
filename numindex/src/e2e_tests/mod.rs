//! End-to-end tests at the reader level.
//!
//! Each test file covers a specific scenario, running predicates against a
//! populated in-memory tree and checking the entity ids and cursor state
//! that come back.

#![cfg(test)]

mod helpers;

mod test_close_failures;
mod test_count_indexed_nodes;
mod test_determinism;
mod test_exact;
mod test_exists;
mod test_sampling;
