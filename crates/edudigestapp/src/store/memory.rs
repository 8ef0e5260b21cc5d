use super::doc_store::DocStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = DocStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        DocStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{EntityKind, Fields};
    use crate::store::DataStore;
    use serde_json::json;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        fn titled(kind: EntityKind, title: &str) -> Fields {
            let mut fields = Fields::new();
            fields.insert(kind.title_field().to_string(), json!(title));
            fields.insert("active".to_string(), json!(true));
            fields
        }

        /// Entities already ordered contiguously in the given order.
        pub fn with_ordered(mut self, kind: EntityKind, titles: &[&str]) -> Self {
            for (i, title) in titles.iter().enumerate() {
                let mut fields = Self::titled(kind, title);
                fields.insert(
                    kind.order_field().to_string(),
                    json!(kind.priority_base() + i as u32),
                );
                self.store.create(kind, fields).unwrap();
            }
            self
        }

        /// An entity with an explicit priority, which may break contiguity.
        pub fn with_priority(mut self, kind: EntityKind, title: &str, priority: u32) -> Self {
            let mut fields = Self::titled(kind, title);
            fields.insert(kind.order_field().to_string(), json!(priority));
            self.store.create(kind, fields).unwrap();
            self
        }

        /// A legacy entity with no ordering field.
        pub fn with_unordered(mut self, kind: EntityKind, title: &str) -> Self {
            let fields = Self::titled(kind, title);
            self.store.create(kind, fields).unwrap();
            self
        }

        /// An entity hidden from public listings.
        pub fn with_inactive(mut self, kind: EntityKind, title: &str, priority: u32) -> Self {
            let mut fields = Self::titled(kind, title);
            fields.insert(kind.order_field().to_string(), json!(priority));
            fields.insert("active".to_string(), json!(false));
            self.store.create(kind, fields).unwrap();
            self
        }

        /// Number of collection writes so far, fixture setup included.
        pub fn writes(&self) -> usize {
            self.store.backend().write_count()
        }
    }
}
