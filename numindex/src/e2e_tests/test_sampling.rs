//! Test index sampling through the reader.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::config::SamplingConfig;
use crate::e2e_tests::helpers::*;
use crate::index::{IndexSample, NumberIndexReader, NumberLayout};
use crate::testing::{new_test_reader, new_test_tree};
use crate::values::Value;

#[test]
fn test_sample_fixture() {
    let (tree, reader) = fixture_reader();
    let sampler = reader.create_sampler();
    assert_eq!(tree.stats().seeks, 0);

    let sample = sampler.sample_index().expect("sample");
    assert_eq!(
        sample,
        IndexSample {
            index_size: 3,
            unique_values: 2,
            sample_size: 3,
        }
    );
    assert_eq!(tree.stats().open_cursors(), 0);
    assert_eq!(reader.open_cursor_count(), 0);
}

#[test]
fn test_sample_unique_layout() {
    let (_tree, reader) = new_test_reader(NumberLayout::Unique, [(1, 1_i64), (2, 2), (3, 3)]);
    let sample = reader.create_sampler().sample_index().expect("sample");
    assert_eq!(sample.index_size, 3);
    assert_eq!(sample.unique_values, 3);
}

#[test]
fn test_sample_counts_mixed_representations_once() {
    let (_tree, reader) = new_test_reader(
        NumberLayout::NonUnique,
        [
            (1, Value::Int64(2)),
            (2, Value::Float64(2.0)),
            (3, Value::Float32(2.0)),
            (4, Value::Float64(-0.0)),
            (5, Value::Int8(0)),
        ],
    );
    let sample = reader.create_sampler().sample_index().expect("sample");
    assert_eq!(sample.index_size, 5);
    assert_eq!(sample.unique_values, 2);
}

#[test]
fn test_sample_with_configured_limit() {
    let tree = new_test_tree(NumberLayout::NonUnique, (0..100).map(|i| (i, i)));
    let limit = NonZeroUsize::new(1).expect("positive");
    let reader = NumberIndexReader::with_sampling_config(Arc::clone(&tree), SamplingConfig::new(limit));
    let sample = reader.create_sampler().sample_index().expect("sample");
    assert_eq!(sample.index_size, 100);
    assert_eq!(sample.unique_values, 100);
}
