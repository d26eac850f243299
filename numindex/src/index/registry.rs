//! Tracking of open seek cursors.
//!
//! Every cursor a reader hands out is registered here so that closing the
//! reader can close whatever the caller left open. A cursor drained to the
//! end closes itself and leaves the registry on its own.
//!
//! # Invariants
//!
//! - Each cursor sits in its own mutex-guarded slot. Closing takes the cursor
//!   out of the slot, so it is closed at most once no matter which path
//!   (exhaustion, explicit close, `close_all`) gets there first.
//! - The map lock and a slot lock are never held together: slots are
//!   released before deregistering, and `close_all` drains the map before
//!   locking any slot.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::index::error::IndexError;
use crate::index::key::NumberKey;
use crate::index::range::KeyRange;
use crate::storage::{OrderedTree, SeekCursor, StorageError};

type CursorCell = Mutex<Option<Box<dyn SeekCursor>>>;
type CursorSlot = Arc<CursorCell>;

fn lock_slot(slot: &CursorCell) -> MutexGuard<'_, Option<Box<dyn SeekCursor>>> {
    slot.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("cursor slot lock was poisoned; recovering");
        poisoned.into_inner()
    })
}

/// The set of live cursors opened through one reader.
pub struct CursorRegistry {
    cursors: Mutex<HashMap<u64, CursorSlot>>,
    next_id: AtomicU64,
}

impl CursorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursors: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    fn lock_cursors(&self) -> MutexGuard<'_, HashMap<u64, CursorSlot>> {
        self.cursors.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("cursor registry lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Take ownership of an open cursor.
    pub fn register(self: &Arc<Self>, cursor: Box<dyn SeekCursor>) -> RegisteredCursor {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let slot: CursorSlot = Arc::new(Mutex::new(Some(cursor)));
        self.lock_cursors().insert(id, Arc::clone(&slot));

        RegisteredCursor {
            id,
            slot,
            registry: Arc::downgrade(self),
            exhausted: false,
        }
    }

    /// Seek `tree` over `range` and register the resulting cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the seek fails. Nothing is registered in that case.
    pub fn open<T: OrderedTree + ?Sized>(
        self: &Arc<Self>,
        tree: &T,
        range: &KeyRange,
    ) -> Result<RegisteredCursor, IndexError> {
        let cursor = tree.seek(&range.from, &range.to)?;
        let registered = self.register(cursor);
        tracing::debug!(
            "opened cursor {} over [{}, {}]",
            registered.id,
            range.from,
            range.to
        );
        Ok(registered)
    }

    /// Close every registered cursor and empty the registry.
    ///
    /// Every cursor is attempted even if some fail. Calling this again with
    /// nothing registered is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CloseFailed` listing every close that failed.
    pub fn close_all(&self) -> Result<(), IndexError> {
        let mut slots: Vec<(u64, CursorSlot)> = self.lock_cursors().drain().collect();
        slots.sort_unstable_by_key(|(id, _)| *id);

        let mut errors = Vec::new();
        let mut closed = 0_usize;
        for (id, slot) in slots {
            let cursor = lock_slot(&slot).take();
            let Some(mut cursor) = cursor else {
                continue;
            };
            closed += 1;
            if let Err(e) = cursor.close() {
                tracing::warn!("failed to close cursor {id}: {e}");
                errors.push(e);
            }
        }

        if closed > 0 {
            tracing::debug!("closed {closed} outstanding cursor(s)");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(IndexError::CloseFailed(errors))
        }
    }

    /// Number of cursors registered and not yet closed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.lock_cursors().len()
    }

    fn deregister(&self, id: u64) {
        self.lock_cursors().remove(&id);
    }
}

impl Default for CursorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A cursor owned by a [`CursorRegistry`].
pub struct RegisteredCursor {
    id: u64,
    slot: CursorSlot,
    registry: Weak<CursorRegistry>,
    exhausted: bool,
}

impl RegisteredCursor {
    /// Key of the next hit, or `None` once the range is exhausted.
    ///
    /// Exhaustion closes the cursor and removes it from the registry.
    ///
    /// # Errors
    ///
    /// Returns `CursorClosed` if the cursor was closed before it was drained,
    /// or whatever storage reports while advancing or closing.
    pub fn next_key(&mut self) -> Result<Option<NumberKey>, StorageError> {
        if self.exhausted {
            return Ok(None);
        }

        let mut slot = lock_slot(&self.slot);
        let Some(cursor) = slot.as_mut() else {
            return Err(StorageError::CursorClosed);
        };
        if cursor.advance()? {
            return Ok(cursor.current().map(|hit| hit.key));
        }

        let cursor = slot.take();
        drop(slot);
        self.exhausted = true;
        self.finish(cursor).map(|()| None)
    }

    /// Close the cursor now. Does nothing if it is already closed.
    ///
    /// # Errors
    ///
    /// Returns the storage error if closing fails. The cursor is released
    /// either way.
    pub fn close(&mut self) -> Result<(), StorageError> {
        let cursor = lock_slot(&self.slot).take();
        self.finish(cursor)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        lock_slot(&self.slot).is_none()
    }

    fn finish(&self, cursor: Option<Box<dyn SeekCursor>>) -> Result<(), StorageError> {
        let Some(mut cursor) = cursor else {
            return Ok(());
        };
        if let Some(registry) = self.registry.upgrade() {
            registry.deregister(self.id);
        }
        let result = cursor.close();
        tracing::debug!("closed cursor {}", self.id);
        result
    }
}

/// Run `f` over a fresh seek of `tree`, closing the cursor before returning.
///
/// The cursor is closed on every path. An error from `f` takes precedence
/// over a close failure, which is then only logged.
///
/// # Errors
///
/// Returns an error if the seek, `f`, or the close fails.
pub fn scoped_seek<T, R, F>(tree: &T, range: &KeyRange, f: F) -> Result<R, IndexError>
where
    T: OrderedTree + ?Sized,
    F: FnOnce(&mut dyn SeekCursor) -> Result<R, IndexError>,
{
    let mut cursor = tree.seek(&range.from, &range.to)?;
    let result = f(cursor.as_mut());
    let closed = cursor.close();

    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(IndexError::Storage(e)),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_error)) => {
            tracing::warn!("failed to close scoped cursor after error: {close_error}");
            Err(e)
        }
    }
}
