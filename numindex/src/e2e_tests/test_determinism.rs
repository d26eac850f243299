//! Test that the same sequence of operations produces identical results.

use crate::e2e_tests::helpers::*;
use crate::index::{IndexQuery, NumberIndexReader, NumberLayout};
use crate::storage::FaultConfig;
use crate::testing::new_faulty_test_tree;

fn run_sequence() -> Vec<Vec<i64>> {
    let (_tree, reader) = fixture_reader();
    vec![
        query_ids(&reader, IndexQuery::exact(5_i64)),
        query_ids(&reader, IndexQuery::range(5_i64, false, 7_i64, true)),
        query_ids(&reader, IndexQuery::Exists),
        query_ids(&reader, IndexQuery::exact(5_i64)),
    ]
}

#[test]
fn test_deterministic_sequence() {
    let run1 = run_sequence();
    let run2 = run_sequence();
    assert_eq!(run1, run2);
    assert_eq!(run1[0], run1[3]);
}

fn run_faulty_sequence(seed: u64) -> Vec<String> {
    let tree = new_faulty_test_tree(
        NumberLayout::NonUnique,
        seed,
        FaultConfig {
            seek_error_rate: 0.3,
            advance_error_rate: 0.3,
            close_error_rate: 0.3,
        },
        FIXTURE,
    );
    let reader = NumberIndexReader::new(tree);
    (0..20)
        .map(|_| match try_query_ids(&reader, IndexQuery::Exists) {
            Ok(ids) => format!("{ids:?}"),
            Err(e) => e.to_string(),
        })
        .collect()
}

#[test]
fn test_same_seed_same_faults() {
    assert_eq!(run_faulty_sequence(99), run_faulty_sequence(99));
}
