//! Test exact-match queries.

use crate::e2e_tests::helpers::*;
use crate::index::{IndexQuery, NumberLayout};
use crate::testing::new_test_reader;
use crate::values::Value;

#[test]
fn test_exact_returns_all_entities_with_value() {
    let (_tree, reader) = fixture_reader();
    assert_eq!(query_ids(&reader, IndexQuery::exact(5_i64)), vec![1, 2]);
    assert_eq!(query_ids(&reader, IndexQuery::exact(7_i64)), vec![3]);
}

#[test]
fn test_exact_missing_value_is_empty() {
    let (_tree, reader) = fixture_reader();
    assert!(query_ids(&reader, IndexQuery::exact(6_i64)).is_empty());
    assert!(query_ids(&reader, IndexQuery::exact(5.5_f64)).is_empty());
    assert_eq!(reader.open_cursor_count(), 0);
}

#[test]
fn test_exact_matches_across_representations() {
    let (_tree, reader) = fixture_reader();
    assert_eq!(query_ids(&reader, IndexQuery::exact(5.0_f64)), vec![1, 2]);
    assert_eq!(query_ids(&reader, IndexQuery::exact(Value::Int8(7))), vec![3]);
    assert_eq!(query_ids(&reader, IndexQuery::exact(Value::Float32(7.0))), vec![3]);
}

#[test]
fn test_exact_large_magnitudes_are_not_rounded() {
    let big = 1_i64 << 53;
    let two_pow_63 = 2.0_f64.powi(63);
    let (_tree, reader) = new_test_reader(
        NumberLayout::NonUnique,
        [
            (1, Value::Int64(big)),
            (2, Value::Int64(big + 1)),
            (3, Value::Int64(i64::MAX)),
            (4, Value::Float64(two_pow_63)),
        ],
    );

    // 2^53 + 1 has no double of its own; only the exact long matches it.
    assert_eq!(query_ids(&reader, IndexQuery::exact(big + 1)), vec![2]);
    #[allow(clippy::cast_precision_loss)]
    let big_double = big as f64;
    assert_eq!(query_ids(&reader, IndexQuery::exact(big_double)), vec![1]);

    // 2^63 as a double is past every long.
    assert_eq!(query_ids(&reader, IndexQuery::exact(i64::MAX)), vec![3]);
    assert_eq!(query_ids(&reader, IndexQuery::exact(two_pow_63)), vec![4]);
}

#[test]
fn test_exact_signed_zero() {
    let (_tree, reader) = new_test_reader(
        NumberLayout::NonUnique,
        [(1, Value::Float64(-0.0)), (2, Value::Int64(0))],
    );
    assert_eq!(query_ids(&reader, IndexQuery::exact(0.0_f64)), vec![1, 2]);
}
