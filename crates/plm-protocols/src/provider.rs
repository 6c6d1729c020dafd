//! Storage provider protocol definitions.

use crate::error::ListError;
use crate::initializable::Initializable;
use crate::list::ListItem;
use crate::metadata::ListMetadata;

/// Storage mechanics consumed by a [`PersistentList`](crate::PersistentList).
///
/// A provider may be a shared, stateless instance serving many lists; every
/// call names the list it operates on.
pub trait PersistentListProvider: Send + Sync {
    /// Load the stored items of a list, in list order.
    fn load_items(&self, list: &ListMetadata) -> Result<Vec<ListItem>, ListError>;

    /// Store an item at the given position.
    fn add_item(&self, list: &ListMetadata, item: &ListItem, index: usize) -> Result<(), ListError>;

    /// Remove a stored item. Returns whether it existed.
    fn remove_item(&self, list: &ListMetadata, item: &ListItem) -> Result<bool, ListError>;

    /// Remove every stored item of a list.
    fn clear(&self, list: &ListMetadata) -> Result<(), ListError>;

    /// Returns the one-time initialization capability, if supported.
    fn as_initializable(&self) -> Option<&dyn Initializable> {
        None
    }
}
