//! List metadata records and their persistence contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Durable storage of list metadata.
///
/// The list service reads every record once at startup and adds or removes
/// single records as lists are created and deleted. Calls are synchronous and
/// are made while the service holds its mutation lock.
pub trait MetadataStore: Send + Sync {
    /// Returns the store ID.
    fn id(&self) -> &str;

    /// All stored records.
    fn lists(&self) -> Result<Vec<ListMetadata>, PersistenceError>;

    /// Store a new record and return it with its assigned ID.
    fn add_list(&self, metadata: ListMetadata) -> Result<ListMetadata, PersistenceError>;

    /// Delete the record with the given key. Deleting an absent key succeeds.
    fn remove_list(&self, key: &str) -> Result<(), PersistenceError>;
}

/// A persisted list definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListMetadata {
    /// Storage-assigned identifier (`None` until saved).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Unique list key.
    pub key: String,

    /// Type name of the provider plugin implementing storage.
    pub provider_type: String,

    /// Type name of the list plugin implementing list semantics.
    pub list_type: String,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the list was created.
    pub created_at: DateTime<Utc>,
}

impl ListMetadata {
    pub fn new(
        key: impl Into<String>,
        provider_type: impl Into<String>,
        list_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            key: key.into(),
            provider_type: provider_type.into(),
            list_type: list_type.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = description.map(Into::into);
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
