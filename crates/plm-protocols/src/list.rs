//! Persistent list protocol definitions.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ListError;
use crate::initializable::Initializable;
use crate::metadata::ListMetadata;
use crate::provider::PersistentListProvider;

/// Core trait for list implementations managed by the list service.
///
/// A list is constructed empty by its plugin factory, then [`load`]ed from
/// its metadata record and wired to a provider before it is published.
/// After that it is shared behind an `Arc`, so content operations take
/// `&self`.
///
/// [`load`]: PersistentList::load
pub trait PersistentList: Send + Sync {
    /// The canonical key of this list.
    fn key(&self) -> &str;

    /// The metadata record the list was loaded from.
    fn metadata(&self) -> Option<&ListMetadata>;

    /// Load list properties from a metadata record.
    fn load(&mut self, metadata: &ListMetadata) -> Result<(), ListError>;

    /// Attach the storage provider.
    fn set_provider(&mut self, provider: Arc<dyn PersistentListProvider>);

    /// The attached storage provider.
    fn provider(&self) -> Option<&Arc<dyn PersistentListProvider>>;

    /// Add items to the list.
    fn add(&self, items: &[ListItem]) -> Result<(), ListError>;

    /// Remove an item from the list. Returns whether the item was present.
    fn remove(&self, item: &ListItem) -> Result<bool, ListError>;

    /// Snapshot of the items in list order.
    fn items(&self) -> Result<Vec<ListItem>, ListError>;

    /// Remove every item from the list.
    fn clear(&self) -> Result<(), ListError>;

    /// Number of items in the list.
    fn len(&self) -> Result<usize, ListError> {
        Ok(self.items()?.len())
    }

    /// Returns the one-time initialization capability, if supported.
    fn as_initializable(&self) -> Option<&dyn Initializable> {
        None
    }
}

/// An item stored in a persistent list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item key.
    pub key: String,

    /// Optional payload carried with the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo: Option<serde_json::Value>,
}

impl ListItem {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cargo: None,
        }
    }

    pub fn with_cargo(mut self, cargo: serde_json::Value) -> Self {
        self.cargo = Some(cargo);
        self
    }
}
