use super::backend::{Collection, CollectionLock, StorageBackend};
use crate::error::{DigestError, Result};
use crate::model::EntityKind;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since EduDigest is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    collections: RefCell<HashMap<EntityKind, Collection>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    writes_left: Cell<Option<usize>>,
    simulate_unreachable: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Let `n` more writes succeed, then fail the rest.
    pub fn fail_writes_after(&self, n: usize) {
        self.writes_left.set(Some(n));
    }

    /// Make every call fail as if the store could not be reached.
    pub fn set_simulate_unreachable(&self, simulate: bool) {
        self.simulate_unreachable.set(simulate);
    }

    /// Number of collection writes committed so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Test helper to remove a document behind the store's back, as another
    /// session would.
    pub fn remove_behind(&self, kind: EntityKind, id: &str) -> bool {
        self.collections
            .borrow_mut()
            .get_mut(&kind)
            .and_then(|docs| docs.remove(id))
            .is_some()
    }

    fn check_reachable(&self) -> Result<()> {
        if self.simulate_unreachable.get() {
            return Err(DigestError::StoreUnreachable(
                "Simulated connectivity failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_collection(&self, kind: EntityKind) -> Result<Collection> {
        self.check_reachable()?;
        let collections = self.collections.borrow();
        Ok(collections.get(&kind).cloned().unwrap_or_default())
    }

    fn save_collection(&self, kind: EntityKind, docs: &Collection) -> Result<()> {
        self.check_reachable()?;
        if self.simulate_write_error.get() || self.writes_left.get() == Some(0) {
            return Err(DigestError::Store("Simulated write error".to_string()));
        }
        if let Some(n) = self.writes_left.get() {
            self.writes_left.set(Some(n - 1));
        }
        self.collections.borrow_mut().insert(kind, docs.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn lock_collection(&self, _kind: EntityKind) -> Result<CollectionLock> {
        self.check_reachable()?;
        Ok(CollectionLock::unheld())
    }
}
