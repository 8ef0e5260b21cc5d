use super::backend::{Collection, CollectionLock, StorageBackend};
use crate::error::{DigestError, Result};
use crate::model::EntityKind;
use chrono::Utc;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(25);

pub struct FsBackend {
    root: PathBuf,
    lock_timeout: Duration,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    fn collection_path(&self, kind: EntityKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.collection()))
    }

    fn lock_path(&self, kind: EntityKind) -> PathBuf {
        self.root.join(format!(".{}.lock", kind.collection()))
    }

    fn ensure_root(&self) -> Result<()> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(DigestError::StoreUnreachable(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| {
                DigestError::StoreUnreachable(format!(
                    "cannot create {}: {}",
                    self.root.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_collection(&self, kind: EntityKind) -> Result<Collection> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(DigestError::StoreUnreachable(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        let path = self.collection_path(kind);
        if !path.exists() {
            return Ok(Collection::new());
        }
        let content = fs::read_to_string(&path).map_err(DigestError::Io)?;
        let docs: Collection = serde_json::from_str(&content).map_err(DigestError::Serialization)?;
        debug!(collection = kind.collection(), count = docs.len(), "loaded collection");
        Ok(docs)
    }

    fn save_collection(&self, kind: EntityKind, docs: &Collection) -> Result<()> {
        self.ensure_root()?;

        let path = self.collection_path(kind);
        let content = serde_json::to_string_pretty(docs).map_err(DigestError::Serialization)?;

        // Atomic write
        let tmp_path = self
            .root
            .join(format!(".{}-{}.tmp", kind.collection(), Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(DigestError::Io)?;
        fs::rename(&tmp_path, &path).map_err(DigestError::Io)?;

        debug!(collection = kind.collection(), count = docs.len(), "saved collection");
        Ok(())
    }

    /// The lock file itself is never removed; holding the lock means holding
    /// an exclusive advisory lock on it. A file left behind by a writer that
    /// died is therefore free to take.
    fn lock_collection(&self, kind: EntityKind) -> Result<CollectionLock> {
        self.ensure_root()?;

        let path = self.lock_path(kind);
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| {
                DigestError::StoreUnreachable(format!("cannot open {}: {}", path.display(), e))
            })?;

        let contended = fs2::lock_contended_error().raw_os_error();
        let started = Instant::now();
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => break,
                Err(e) if e.raw_os_error() == contended => {
                    if started.elapsed() >= self.lock_timeout {
                        return Err(DigestError::StoreUnreachable(format!(
                            "timed out after {}ms waiting for the {} lock ({} is held by another writer)",
                            self.lock_timeout.as_millis(),
                            kind.collection(),
                            path.display()
                        )));
                    }
                    std::thread::sleep(LOCK_RETRY_INTERVAL);
                }
                Err(e) => {
                    return Err(DigestError::StoreUnreachable(format!(
                        "cannot lock {}: {}",
                        kind.collection(),
                        e
                    )))
                }
            }
        }

        // Owner note for whoever finds the file; the lock does not depend on it
        let note = format!("pid {} since {}\n", std::process::id(), Utc::now().to_rfc3339());
        if let Err(e) = file.set_len(0).and_then(|_| file.write_all(note.as_bytes())) {
            debug!(path = %path.display(), error = %e, "could not record lock owner");
        }
        Ok(CollectionLock::held_by(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fields;
    use serde_json::json;

    fn fields(title: &str) -> Fields {
        let mut map = Fields::new();
        map.insert("title".to_string(), json!(title));
        map
    }

    #[test]
    fn missing_collection_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("data"));
        let docs = backend.load_collection(EntityKind::Article).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn save_then_load_collection() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());

        let mut docs = Collection::new();
        docs.insert("a".to_string(), fields("First"));
        backend.save_collection(EntityKind::Article, &docs).unwrap();

        assert!(dir.path().join("articles.json").exists());
        let loaded = backend.load_collection(EntityKind::Article).unwrap();
        assert_eq!(loaded, docs);

        // No tmp files left behind
        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn collections_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());

        let mut docs = Collection::new();
        docs.insert("t".to_string(), fields("Tab"));
        backend.save_collection(EntityKind::SidebarTab, &docs).unwrap();

        assert!(backend
            .load_collection(EntityKind::ResourceTab)
            .unwrap()
            .is_empty());
        assert_eq!(
            backend.load_collection(EntityKind::SidebarTab).unwrap().len(),
            1
        );
    }

    #[test]
    fn lock_is_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let backend =
            FsBackend::new(dir.path().to_path_buf()).with_lock_timeout(Duration::from_millis(60));

        let lock = backend.lock_collection(EntityKind::NewsUpdate).unwrap();
        drop(lock);
        let note = fs::read_to_string(dir.path().join(".news_updates.lock")).unwrap();
        assert!(note.starts_with(&format!("pid {}", std::process::id())));

        // Can be taken again
        let _again = backend.lock_collection(EntityKind::NewsUpdate).unwrap();
    }

    #[test]
    fn leftover_lock_file_does_not_block() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".sidebar_tabs.lock"), "pid 99999 since 2020-01-01\n").unwrap();
        let backend =
            FsBackend::new(dir.path().to_path_buf()).with_lock_timeout(Duration::from_millis(100));

        let first = backend.lock_collection(EntityKind::SidebarTab).unwrap();
        drop(first);
        let _second = backend.lock_collection(EntityKind::SidebarTab).unwrap();
    }

    #[test]
    fn held_lock_times_out_as_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let backend =
            FsBackend::new(dir.path().to_path_buf()).with_lock_timeout(Duration::from_millis(60));

        let _held = backend.lock_collection(EntityKind::Article).unwrap();
        let result = backend.lock_collection(EntityKind::Article);
        assert!(matches!(result, Err(DigestError::StoreUnreachable(_))));
    }

    #[test]
    fn root_that_is_a_file_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        let backend = FsBackend::new(file);
        assert!(matches!(
            backend.load_collection(EntityKind::Article),
            Err(DigestError::StoreUnreachable(_))
        ));
        assert!(matches!(
            backend.lock_collection(EntityKind::Article),
            Err(DigestError::StoreUnreachable(_))
        ));
    }
}
