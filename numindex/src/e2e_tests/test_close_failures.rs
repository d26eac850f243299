//! Test that close failures are aggregated without leaking cursors.

use crate::e2e_tests::helpers::*;
use crate::index::{IndexError, IndexQuery, NumberIndexReader, NumberLayout};
use crate::storage::{FaultConfig, StorageError};
use crate::testing::new_faulty_test_tree;

#[test]
fn test_close_reports_every_failure() {
    let tree = new_faulty_test_tree(
        NumberLayout::NonUnique,
        11,
        FaultConfig::failing_closes(),
        FIXTURE,
    );
    let reader = NumberIndexReader::new(std::sync::Arc::clone(&tree));
    let _a = reader.query(&[IndexQuery::Exists]).expect("query");
    let _b = reader.query(&[IndexQuery::exact(5_i64)]).expect("query");
    let _c = reader.query(&[IndexQuery::exact(7_i64)]).expect("query");

    match reader.close() {
        Err(IndexError::CloseFailed(errors)) => {
            assert_eq!(errors.len(), 3);
            assert!(
                errors
                    .iter()
                    .all(|e| matches!(e, StorageError::InjectedFault(_)))
            );
        }
        other => panic!("expected CloseFailed, got {other:?}"),
    }
    assert_eq!(reader.open_cursor_count(), 0);
    assert_eq!(tree.stats().open_cursors(), 0);

    reader.close().expect("nothing left to close");
}

#[test]
fn test_exhaustion_surfaces_close_failure() {
    let tree = new_faulty_test_tree(
        NumberLayout::NonUnique,
        11,
        FaultConfig::failing_closes(),
        FIXTURE,
    );
    let reader = NumberIndexReader::new(std::sync::Arc::clone(&tree));
    let results: Vec<_> = reader
        .query(&[IndexQuery::exact(7_i64)])
        .expect("query")
        .collect();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().expect("hit").as_i64(), 3);
    assert!(matches!(
        results[1],
        Err(IndexError::Storage(StorageError::InjectedFault(_)))
    ));
    assert_eq!(reader.open_cursor_count(), 0);
    assert_eq!(tree.stats().open_cursors(), 0);
}

#[test]
fn test_count_surfaces_close_failure() {
    let tree = new_faulty_test_tree(
        NumberLayout::NonUnique,
        11,
        FaultConfig::failing_closes(),
        FIXTURE,
    );
    let reader = NumberIndexReader::new(std::sync::Arc::clone(&tree));
    assert!(matches!(
        reader.count_indexed_nodes(crate::types::EntityId(1), &[5_i64.into()]),
        Err(IndexError::Storage(StorageError::InjectedFault(_)))
    ));
    assert_eq!(tree.stats().open_cursors(), 0);
}
