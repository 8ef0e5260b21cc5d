use super::doc_store::DocStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;
use std::time::Duration;

pub type FileStore = DocStore<FsBackend>;

impl FileStore {
    /// A store keeping one JSON file per collection under `root`.
    pub fn new_fs(root: PathBuf) -> Self {
        DocStore::with_backend(FsBackend::new(root))
    }

    /// How long writers wait for another session's collection lock.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        DocStore::with_backend(self.backend.with_lock_timeout(timeout))
    }
}
