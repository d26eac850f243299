//! Test counting the index entries of one entity.

use crate::e2e_tests::helpers::*;
use crate::index::{IndexError, KeyError, NumberLayout};
use crate::testing::new_test_reader;
use crate::types::EntityId;
use crate::values::Value;

#[test]
fn test_count_matching_entry() {
    let (tree, reader) = fixture_reader();
    let count = reader
        .count_indexed_nodes(EntityId(2), &[Value::Int64(5)])
        .expect("count");
    assert_eq!(count, 1);
    assert_eq!(tree.stats().open_cursors(), 0);
    assert_eq!(reader.open_cursor_count(), 0);
}

#[test]
fn test_count_wrong_value_is_zero() {
    let (_tree, reader) = fixture_reader();
    let count = reader
        .count_indexed_nodes(EntityId(2), &[Value::Int64(9)])
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn test_count_unknown_entity_is_zero() {
    let (_tree, reader) = fixture_reader();
    let count = reader
        .count_indexed_nodes(EntityId(42), &[Value::Int64(5)])
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn test_count_matches_other_representation() {
    let (_tree, reader) = fixture_reader();
    let count = reader
        .count_indexed_nodes(EntityId(3), &[Value::Float64(7.0)])
        .expect("count");
    assert_eq!(count, 1);
}

#[test]
fn test_count_unique_layout_checks_entity() {
    // In a unique layout the point range matches the value regardless of
    // entity, so only the entity check keeps other owners out.
    let (_tree, reader) = new_test_reader(NumberLayout::Unique, [(1, 5_i64), (3, 7)]);
    assert_eq!(
        reader
            .count_indexed_nodes(EntityId(1), &[Value::Int64(5)])
            .expect("count"),
        1
    );
    assert_eq!(
        reader
            .count_indexed_nodes(EntityId(2), &[Value::Int64(5)])
            .expect("count"),
        0
    );
}

#[test]
fn test_count_nan_value() {
    let (_tree, reader) = new_test_reader(NumberLayout::NonUnique, [(1, Value::Float64(f64::NAN))]);
    assert_eq!(
        reader
            .count_indexed_nodes(EntityId(1), &[Value::Float64(f64::NAN)])
            .expect("count"),
        1
    );
}

#[test]
fn test_count_rejects_bad_values() {
    let (_tree, reader) = fixture_reader();
    assert!(matches!(
        reader.count_indexed_nodes(EntityId(1), &[]),
        Err(IndexError::Key(KeyError::ValueCount(0)))
    ));
    assert!(matches!(
        reader.count_indexed_nodes(EntityId(1), &[Value::Int64(5), Value::Int64(5)]),
        Err(IndexError::Key(KeyError::ValueCount(2)))
    ));
    assert!(matches!(
        reader.count_indexed_nodes(EntityId(1), &[Value::Text("5".to_string())]),
        Err(IndexError::Key(KeyError::NonNumericValue("text")))
    ));
    assert_eq!(reader.open_cursor_count(), 0);
}
