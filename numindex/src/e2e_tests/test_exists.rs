//! Test exists queries.

use crate::e2e_tests::helpers::*;
use crate::index::{IndexQuery, NumberLayout};
use crate::testing::new_test_reader;
use crate::values::Value;

#[test]
fn test_exists_returns_every_entity() {
    let (_tree, reader) = fixture_reader();
    assert_eq!(query_ids(&reader, IndexQuery::Exists), vec![1, 2, 3]);
}

#[test]
fn test_exists_on_empty_index() {
    let (tree, reader) = new_test_reader(NumberLayout::NonUnique, Vec::<(i64, i64)>::new());
    assert!(query_ids(&reader, IndexQuery::Exists).is_empty());
    assert_eq!(tree.stats().open_cursors(), 0);
}

#[test]
fn test_exists_includes_nan_and_infinities() {
    let (_tree, reader) = new_test_reader(
        NumberLayout::NonUnique,
        [
            (1, Value::Float64(f64::NAN)),
            (2, Value::Float64(f64::INFINITY)),
            (3, Value::Float64(f64::NEG_INFINITY)),
            (4, Value::Int64(0)),
        ],
    );
    assert_eq!(query_ids(&reader, IndexQuery::Exists), vec![3, 4, 2, 1]);
}
