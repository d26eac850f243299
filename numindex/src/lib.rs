// Read path of a numeric property index:
// 1. A single predicate (exists, exact, range) comes in
// 2. It is turned into an inclusive key range over (value, entity id)
// 3. The ordered tree is seeked over that range
// 4. Hits are mapped to entity ids lazily as the caller iterates
//
// Components:
//  - Numeric comparison across integral and floating representations
//  - Key range construction with tie-break sentinels
//  - Cursor registry so closing the reader closes every open seek
//  - Full-scan sampler

pub mod config;
pub mod index;
pub mod storage;
pub mod types;
pub mod values;

#[cfg(test)]
mod e2e_tests;
#[cfg(test)]
mod testing;

pub use config::{ConfigError, SamplingConfig};
pub use index::{IndexError, IndexQuery, NumberIndexReader, NumberKey, NumberLayout};
pub use storage::{MemoryTree, OrderedTree, SeekCursor, StorageError};
pub use types::EntityId;
pub use values::{Number, Value};
