//! In-memory ordered tree.
//!
//! Entries live in a single vector kept sorted by the tree's layout. Cursors
//! are lazy: each `advance` takes the lock, binary-searches for the first
//! key after the last one it returned, and releases the lock again. Writers
//! may therefore interleave with open cursors without a cursor skipping or
//! repeating keys.
//!
//! Faults are injected from a seeded RNG so failing runs are reproducible.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::index::key::NumberKey;
use crate::index::layout::NumberLayout;
use crate::storage::{Hit, OrderedTree, SeekCursor, StorageError};

/// Configuration for fault injection.
#[derive(Debug, Clone, Default)]
pub struct FaultConfig {
    /// Probability of a seek failing (0.0 - 1.0).
    pub seek_error_rate: f64,
    /// Probability of an advance failing (0.0 - 1.0).
    pub advance_error_rate: f64,
    /// Probability of a close failing (0.0 - 1.0).
    pub close_error_rate: f64,
}

impl FaultConfig {
    /// Create a fault config with no faults (for baseline testing).
    #[must_use]
    pub fn no_faults() -> Self {
        Self::default()
    }

    /// Every close fails. The cursor is still released.
    #[must_use]
    pub const fn failing_closes() -> Self {
        Self {
            seek_error_rate: 0.0,
            advance_error_rate: 0.0,
            close_error_rate: 1.0,
        }
    }
}

/// Statistics about tree operations.
#[derive(Debug, Default, Clone)]
pub struct MemoryTreeStats {
    /// Number of seeks requested, failed ones included.
    pub seeks: u64,
    /// Number of cursor advances.
    pub advances: u64,
    /// Number of cursors handed out.
    pub cursors_opened: u64,
    /// Number of cursors released.
    pub cursors_closed: u64,
    /// Number of injected seek errors.
    pub injected_seek_errors: u64,
    /// Number of injected advance errors.
    pub injected_advance_errors: u64,
    /// Number of injected close errors.
    pub injected_close_errors: u64,
}

impl MemoryTreeStats {
    /// Cursors handed out and not yet closed.
    #[must_use]
    pub const fn open_cursors(&self) -> u64 {
        self.cursors_opened - self.cursors_closed
    }
}

struct TreeState {
    layout: NumberLayout,
    /// Sorted by `layout`.
    entries: Vec<Hit>,
    fault_config: FaultConfig,
    rng: StdRng,
    stats: MemoryTreeStats,
}

impl TreeState {
    /// Check if a fault should be injected based on the given rate.
    fn should_inject_fault(&mut self, rate: f64) -> bool {
        if rate <= 0.0 {
            return false;
        }
        self.rng.random::<f64>() < rate
    }

    fn find_index(&self, key: &NumberKey) -> Result<usize, usize> {
        let layout = self.layout;
        self.entries
            .binary_search_by(|entry| layout.compare(&entry.key, key))
    }
}

fn lock_state(state: &Mutex<TreeState>) -> MutexGuard<'_, TreeState> {
    state.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("memory tree lock was poisoned by a panicking thread; recovering");
        poisoned.into_inner()
    })
}

/// An ordered tree held entirely in memory.
pub struct MemoryTree {
    state: Arc<Mutex<TreeState>>,
}

impl MemoryTree {
    /// Create an empty tree with no fault injection.
    #[must_use]
    pub fn new(layout: NumberLayout) -> Self {
        Self::with_faults(layout, 0, FaultConfig::no_faults())
    }

    /// Create an empty tree that injects faults.
    ///
    /// The seed makes the fault sequence deterministic.
    #[must_use]
    pub fn with_faults(layout: NumberLayout, seed: u64, fault_config: FaultConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(TreeState {
                layout,
                entries: Vec::new(),
                fault_config,
                rng: StdRng::seed_from_u64(seed),
                stats: MemoryTreeStats::default(),
            })),
        }
    }

    /// Insert or update a key-value pair.
    ///
    /// The key's tie-break flag is cleared: stored keys always name a real
    /// entity. Returns the old value if a key equal under the layout was
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns `ReservedEntityId` if the key uses `EntityId::MIN` or
    /// `EntityId::MAX`. Those ids position range boundaries, and a stored
    /// entity holding one would tie with an exclusive bound.
    pub fn insert(
        &self,
        mut key: NumberKey,
        value: Vec<u8>,
    ) -> Result<Option<Vec<u8>>, StorageError> {
        if key.entity_id.is_sentinel() {
            return Err(StorageError::ReservedEntityId(key.entity_id));
        }
        key.entity_id_is_special_tie_breaker = false;
        let mut state = lock_state(&self.state);
        match state.find_index(&key) {
            Ok(index) => {
                let old = std::mem::replace(&mut state.entries[index], Hit { key, value });
                Ok(Some(old.value))
            }
            Err(index) => {
                state.entries.insert(index, Hit { key, value });
                Ok(None)
            }
        }
    }

    /// Remove a key. Returns the removed value if found.
    pub fn remove(&self, key: &NumberKey) -> Option<Vec<u8>> {
        let mut state = lock_state(&self.state);
        let index = state.find_index(key).ok()?;
        Some(state.entries.remove(index).value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock_state(&self.state).entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a snapshot of the current statistics.
    #[must_use]
    pub fn stats(&self) -> MemoryTreeStats {
        lock_state(&self.state).stats.clone()
    }

    /// Update the fault configuration.
    pub fn set_fault_config(&self, config: FaultConfig) {
        lock_state(&self.state).fault_config = config;
    }
}

impl OrderedTree for MemoryTree {
    fn layout(&self) -> NumberLayout {
        lock_state(&self.state).layout
    }

    fn seek(
        &self,
        from: &NumberKey,
        to: &NumberKey,
    ) -> Result<Box<dyn SeekCursor>, StorageError> {
        let mut state = lock_state(&self.state);
        state.stats.seeks += 1;

        let rate = state.fault_config.seek_error_rate;
        if state.should_inject_fault(rate) {
            state.stats.injected_seek_errors += 1;
            return Err(StorageError::InjectedFault(
                "simulated seek error".to_string(),
            ));
        }

        state.stats.cursors_opened += 1;
        Ok(Box::new(MemoryCursor {
            state: Arc::clone(&self.state),
            from: *from,
            to: *to,
            last: None,
            current: None,
            closed: false,
        }))
    }
}

/// Cursor over a [`MemoryTree`] range.
struct MemoryCursor {
    state: Arc<Mutex<TreeState>>,
    from: NumberKey,
    to: NumberKey,
    /// Key of the last hit returned; the next hit is the first key after it.
    last: Option<NumberKey>,
    current: Option<Hit>,
    closed: bool,
}

impl SeekCursor for MemoryCursor {
    fn advance(&mut self) -> Result<bool, StorageError> {
        if self.closed {
            return Err(StorageError::CursorClosed);
        }

        let mut state = lock_state(&self.state);
        state.stats.advances += 1;

        let rate = state.fault_config.advance_error_rate;
        if state.should_inject_fault(rate) {
            state.stats.injected_advance_errors += 1;
            return Err(StorageError::InjectedFault(
                "simulated advance error".to_string(),
            ));
        }

        let layout = state.layout;
        let start = match &self.last {
            None => state
                .entries
                .partition_point(|entry| layout.compare(&entry.key, &self.from) == Ordering::Less),
            Some(last) => state
                .entries
                .partition_point(|entry| layout.compare(&entry.key, last) != Ordering::Greater),
        };

        match state.entries.get(start) {
            Some(hit) if layout.compare(&hit.key, &self.to) != Ordering::Greater => {
                self.last = Some(hit.key);
                self.current = Some(hit.clone());
                Ok(true)
            }
            _ => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn current(&self) -> Option<&Hit> {
        self.current.as_ref()
    }

    fn close(&mut self) -> Result<(), StorageError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.current = None;

        let mut state = lock_state(&self.state);
        state.stats.cursors_closed += 1;

        let rate = state.fault_config.close_error_rate;
        if state.should_inject_fault(rate) {
            state.stats.injected_close_errors += 1;
            return Err(StorageError::InjectedFault(
                "simulated close error".to_string(),
            ));
        }
        Ok(())
    }
}
