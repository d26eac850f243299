use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::index::{NumberIndexReader, NumberKey, NumberLayout};
use crate::storage::{FaultConfig, MemoryTree};
use crate::types::EntityId;
use crate::values::Value;

/// Install a test subscriber once per process.
///
/// Honors `RUST_LOG` and falls back to `numindex=debug`. Output goes through
/// the test harness so it only shows for failing tests.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("numindex=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Build the key a tree stores for `(entity, value)`.
#[allow(clippy::expect_used)]
pub fn stored_key(entity: i64, value: impl Into<Value>) -> NumberKey {
    let mut key = NumberKey::new();
    key.init_from(EntityId(entity), &[value.into()])
        .expect("numeric scalar value");
    key
}

/// Create a tree holding `entries` with the given layout and no faults.
pub fn new_test_tree<V: Into<Value>>(
    layout: NumberLayout,
    entries: impl IntoIterator<Item = (i64, V)>,
) -> Arc<MemoryTree> {
    new_faulty_test_tree(layout, 0, FaultConfig::no_faults(), entries)
}

/// Create a tree holding `entries` that injects faults from `seed`.
///
/// Faults are applied only after the entries are inserted.
#[allow(clippy::expect_used)]
pub fn new_faulty_test_tree<V: Into<Value>>(
    layout: NumberLayout,
    seed: u64,
    fault_config: FaultConfig,
    entries: impl IntoIterator<Item = (i64, V)>,
) -> Arc<MemoryTree> {
    let tree = MemoryTree::with_faults(layout, seed, FaultConfig::no_faults());
    for (entity, value) in entries {
        tree.insert(stored_key(entity, value), entity.to_le_bytes().to_vec())
            .expect("insert");
    }
    tree.set_fault_config(fault_config);
    Arc::new(tree)
}

/// A reader over a fresh test tree.
pub fn new_test_reader<V: Into<Value>>(
    layout: NumberLayout,
    entries: impl IntoIterator<Item = (i64, V)>,
) -> (Arc<MemoryTree>, NumberIndexReader<MemoryTree>) {
    let tree = new_test_tree(layout, entries);
    let reader = NumberIndexReader::new(Arc::clone(&tree));
    (tree, reader)
}
