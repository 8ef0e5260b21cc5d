//! # Storage Layer
//!
//! This module defines the document store abstraction. The [`DataStore`]
//! trait is the whole contract the ordering logic relies on: collection
//! scans, point reads, single-document writes and an all-or-nothing batch
//! update. Anything that can honor it (a hosted document database, a local
//! JSON directory, a `HashMap`) can back EduDigest.
//!
//! ## Split Between Store and Backend
//!
//! - [`backend::StorageBackend`] handles the "how": loading and saving a whole
//!   collection, and locking it against other writers.
//! - [`doc_store::DocStore`] handles the "what": id assignment, partial field
//!   merges, existence checks and batch atomicity. It is written once and runs
//!   over any backend.
//!
//! ## Batch Atomicity
//!
//! `batch_update` validates every id before touching anything. If one id is
//! missing (deleted by another session, say) the whole batch fails with
//! [`DigestError::StaleReference`](crate::error::DigestError::StaleReference)
//! and the collection is left exactly as it was. A successful batch is
//! persisted with a single collection write, which the filesystem backend
//! makes atomic with a tmp-file rename.
//!
//! ## Concurrent Writers
//!
//! Every write takes the collection lock first. The filesystem backend
//! implements it as an OS advisory lock on a per-collection lock file, which
//! the OS drops if the writer dies, and gives up after the configured store
//! timeout with `StoreUnreachable`. There is no conflict detection beyond
//! that: the last batch to land wins.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production store, one JSON file per collection.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── edudigest.toml        # Configuration
//! ├── articles.json         # { "<id>": { "title": ..., "priority": 1, ... } }
//! ├── news_updates.json
//! ├── resource_tabs.json
//! └── sidebar_tabs.json
//! ```

use crate::error::Result;
use crate::model::{Document, EntityKind, Fields};

pub mod backend;
pub mod doc_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

/// Abstract interface for the document store.
///
/// Read operations take `&self`; anything that writes takes `&mut self`.
pub trait DataStore {
    /// All documents of a collection, in no particular order.
    fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Document>>;

    /// Point read of a single document.
    fn get(&self, kind: EntityKind, id: &str) -> Result<Document>;

    /// Store a new document and return its store-assigned id.
    fn create(&mut self, kind: EntityKind, fields: Fields) -> Result<String>;

    /// Merge a partial field map into an existing document.
    fn update(&mut self, kind: EntityKind, id: &str, fields: Fields) -> Result<()>;

    /// Remove a document.
    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()>;

    /// Merge several partial field maps at once. Either every update is
    /// applied or none is.
    fn batch_update(&mut self, kind: EntityKind, updates: Vec<(String, Fields)>) -> Result<()>;
}
