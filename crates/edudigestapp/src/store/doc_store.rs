use super::backend::StorageBackend;
use super::DataStore;
use crate::error::{DigestError, Result};
use crate::model::{Document, EntityKind, Fields, ID_FIELD};
use tracing::debug;
use uuid::Uuid;

pub struct DocStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> DocStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Read access to the backend (write counters, simulation switches).
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Merge a partial field map into a document. The id is never a field.
fn merge(doc: &mut Fields, fields: Fields) {
    for (key, value) in fields {
        if key == ID_FIELD {
            continue;
        }
        doc.insert(key, value);
    }
}

fn not_found(kind: EntityKind, id: &str) -> DigestError {
    DigestError::NotFound {
        kind,
        id: id.to_string(),
    }
}

impl<B: StorageBackend> DataStore for DocStore<B> {
    fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Document>> {
        let docs = self.backend.load_collection(kind)?;
        Ok(docs
            .into_iter()
            .map(|(id, fields)| Document { id, fields })
            .collect())
    }

    fn get(&self, kind: EntityKind, id: &str) -> Result<Document> {
        let mut docs = self.backend.load_collection(kind)?;
        let fields = docs.remove(id).ok_or_else(|| not_found(kind, id))?;
        Ok(Document::new(id, fields))
    }

    fn create(&mut self, kind: EntityKind, fields: Fields) -> Result<String> {
        let _lock = self.backend.lock_collection(kind)?;
        let mut docs = self.backend.load_collection(kind)?;

        let id = Uuid::new_v4().to_string();
        let mut doc = Fields::new();
        merge(&mut doc, fields);
        docs.insert(id.clone(), doc);
        self.backend.save_collection(kind, &docs)?;

        debug!(collection = kind.collection(), %id, "created document");
        Ok(id)
    }

    fn update(&mut self, kind: EntityKind, id: &str, fields: Fields) -> Result<()> {
        let _lock = self.backend.lock_collection(kind)?;
        let mut docs = self.backend.load_collection(kind)?;

        let doc = docs.get_mut(id).ok_or_else(|| not_found(kind, id))?;
        merge(doc, fields);
        self.backend.save_collection(kind, &docs)?;

        debug!(collection = kind.collection(), %id, "updated document");
        Ok(())
    }

    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()> {
        let _lock = self.backend.lock_collection(kind)?;
        let mut docs = self.backend.load_collection(kind)?;

        if docs.remove(id).is_none() {
            return Err(not_found(kind, id));
        }
        self.backend.save_collection(kind, &docs)?;

        debug!(collection = kind.collection(), %id, "deleted document");
        Ok(())
    }

    fn batch_update(&mut self, kind: EntityKind, updates: Vec<(String, Fields)>) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }

        let _lock = self.backend.lock_collection(kind)?;
        let mut docs = self.backend.load_collection(kind)?;

        // Validate the whole batch before applying any of it
        let missing: Vec<String> = updates
            .iter()
            .filter(|(id, _)| !docs.contains_key(id))
            .map(|(id, _)| id.clone())
            .collect();
        if !missing.is_empty() {
            return Err(DigestError::StaleReference { kind, ids: missing });
        }

        let count = updates.len();
        for (id, fields) in updates {
            if let Some(doc) = docs.get_mut(&id) {
                merge(doc, fields);
            }
        }
        self.backend.save_collection(kind, &docs)?;

        debug!(collection = kind.collection(), count, "committed batch update");
        Ok(())
    }
}
