//! Ordered-tree storage collaborator.
//!
//! The reader only needs one capability from storage: a bounded seek over
//! keys ordered by a [`NumberLayout`], returning a cursor of hits. This
//! module defines that boundary and ships [`MemoryTree`], an in-memory
//! implementation with fault injection for tests and embedding.
//!
//! # Seek contract
//!
//! - `seek(from, to)` yields every stored key `k` with `from <= k <= to`
//!   under the tree's layout, in ascending key order.
//! - If `from > to` the cursor yields nothing.
//! - A cursor must be closed exactly once; advancing a closed cursor fails
//!   with [`StorageError::CursorClosed`].

mod memory;

use crate::index::key::NumberKey;
use crate::index::layout::NumberLayout;
use crate::types::EntityId;

pub use memory::{FaultConfig, MemoryTree, MemoryTreeStats};

/// A key-value pair yielded by a seek.
///
/// The value is an opaque payload owned by whoever populated the tree.
#[derive(Debug, Clone)]
pub struct Hit {
    pub key: NumberKey,
    pub value: Vec<u8>,
}

/// An open seek over a key range.
pub trait SeekCursor: Send {
    /// Move to the next hit. Returns `false` once the range is exhausted.
    fn advance(&mut self) -> Result<bool, StorageError>;

    /// The hit the last successful `advance` moved to.
    fn current(&self) -> Option<&Hit>;

    /// Release the cursor.
    fn close(&mut self) -> Result<(), StorageError>;
}

/// A sorted key-value store that supports bounded seeks.
pub trait OrderedTree: Send + Sync {
    /// The ordering the tree's keys are sorted by.
    fn layout(&self) -> NumberLayout;

    /// Open a cursor over `[from, to]`.
    fn seek(&self, from: &NumberKey, to: &NumberKey)
    -> Result<Box<dyn SeekCursor>, StorageError>;
}

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error.
    Io(std::io::Error),
    /// Injected fault for simulation.
    InjectedFault(String),
    /// The cursor was already closed.
    CursorClosed,
    /// Stored keys cannot use the ids reserved for range boundaries.
    ReservedEntityId(EntityId),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InjectedFault(msg) => write!(f, "injected fault: {msg}"),
            Self::CursorClosed => write!(f, "cursor already closed"),
            Self::ReservedEntityId(id) => {
                write!(f, "entity id {id} is reserved for range boundaries")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
