use crate::error::Result;
use crate::model::{EntityKind, Fields};
use std::collections::BTreeMap;
use std::fs::File;

/// A whole collection as persisted: document id to fields.
pub type Collection = BTreeMap<String, Fields>;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while DocStore handles the "what" (ids, merges, batch atomicity).
pub trait StorageBackend {
    /// Load every document of a collection.
    /// A collection that was never written is empty, not an error.
    fn load_collection(&self, kind: EntityKind) -> Result<Collection>;

    /// Replace the persisted collection.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_collection(&self, kind: EntityKind, docs: &Collection) -> Result<()>;

    /// Take the writer lock for a collection. Held until the returned guard drops.
    fn lock_collection(&self, kind: EntityKind) -> Result<CollectionLock>;
}

/// Guard for a collection's writer lock.
///
/// File-based backends hold an OS advisory lock on an open lock file. The
/// OS releases it when the handle closes, on drop or when the process dies,
/// so a crashed writer never leaves the collection locked. In-process
/// backends get a guard with nothing to release.
#[derive(Debug)]
pub struct CollectionLock {
    _file: Option<File>,
}

impl CollectionLock {
    pub fn unheld() -> Self {
        Self { _file: None }
    }

    pub fn held_by(file: File) -> Self {
        Self { _file: Some(file) }
    }
}
