//! The state store: single owner of the current [`InputSnapshot`].
//!
//! Writers never touch fields in place. [`StateStore::apply_update`] merges a
//! partial update over the current snapshot into a fresh `Arc` and swaps the
//! stored pointer, so readers holding the old `Arc` keep a consistent view and
//! new readers see the fully merged one.
//!
//! The store is `Send + Sync`; share it with `Arc<StateStore>` between the event
//! side ([`StoreListener`](crate::eventbus::StoreListener)) and the frame side
//! ([`FrameDriver`](crate::frame::FrameDriver)).

use crate::snapshot::{InputSnapshot, SnapshotUpdate};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct StateStore {
    current: RwLock<Arc<InputSnapshot>>,
    generation: AtomicU64,
}

impl StateStore {
    /// Store starting at the all-zero snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store starting at `initial`.
    pub fn with_snapshot(initial: InputSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            generation: AtomicU64::new(0),
        }
    }

    /// The current snapshot. Cheap: clones an `Arc`.
    pub fn current(&self) -> Arc<InputSnapshot> {
        // A panic while holding the lock cannot leave a half-written snapshot
        // (the swap is a single pointer store), so poisoning is ignored.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Merge `update` over the current snapshot and replace it. Sole write path.
    pub fn apply_update(&self, update: SnapshotUpdate) {
        if update.is_empty() {
            return;
        }
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = guard.merged(&update);
        *guard = Arc::new(next);
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        log::trace!("state store generation {generation}: {next:?}");
    }

    /// Number of non-empty updates applied so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }
}
