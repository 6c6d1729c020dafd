//! In-process metadata store for the persistent list manager.
//!
//! Keeps list metadata in memory only. Useful for tests and for hosts whose
//! lists do not need to survive a restart.

use parking_lot::Mutex;
use tracing::debug;

use plm_protocols::error::PersistenceError;
use plm_protocols::{ListMetadata, MetadataStore};

/// Metadata store backed by a vector in insertion order.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    records: Vec<ListMetadata>,
    last_id: i64,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records. Records without an ID are
    /// assigned one.
    pub fn with_records(records: impl IntoIterator<Item = ListMetadata>) -> Result<Self, PersistenceError> {
        let store = Self::new();
        for record in records {
            store.add_list(record)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn id(&self) -> &str {
        "memory"
    }

    fn lists(&self) -> Result<Vec<ListMetadata>, PersistenceError> {
        Ok(self.state.lock().records.clone())
    }

    fn add_list(&self, mut metadata: ListMetadata) -> Result<ListMetadata, PersistenceError> {
        let mut state = self.state.lock();
        if state.records.iter().any(|r| r.key == metadata.key) {
            return Err(PersistenceError::Duplicate(metadata.key));
        }

        let id = match metadata.id {
            Some(id) => id,
            None => state.last_id + 1,
        };
        state.last_id = state.last_id.max(id);
        metadata.id = Some(id);

        debug!("Stored metadata for list '{}' with id {}", metadata.key, id);
        state.records.push(metadata.clone());
        Ok(metadata)
    }

    fn remove_list(&self, key: &str) -> Result<(), PersistenceError> {
        self.state.lock().records.retain(|r| r.key != key);
        Ok(())
    }
}
