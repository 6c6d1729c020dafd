//! Generic type-name table.
//!
//! Shared by the list and provider sides of [`PluginResolver`](super::PluginResolver).

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use plm_protocols::error::PluginError;

/// Thread-safe table mapping a plugin type name to its factory.
///
/// - Registration rejects duplicate names
/// - Lookups clone the factory handle out so no shard lock is held while the
///   factory runs
pub struct FactoryTable<F: Clone> {
    factories: DashMap<String, F>,
}

impl<F: Clone> FactoryTable<F> {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
        }
    }

    /// Register a factory under a type name.
    ///
    /// Returns an error if the name is already taken.
    pub fn register(&self, type_name: impl Into<String>, factory: F) -> Result<(), PluginError> {
        match self.factories.entry(type_name.into()) {
            Entry::Occupied(entry) => {
                Err(PluginError::AlreadyRegistered(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                entry.insert(factory);
                Ok(())
            }
        }
    }

    /// Remove a factory by type name.
    pub fn unregister(&self, type_name: &str) -> Result<(), PluginError> {
        self.factories
            .remove(type_name)
            .ok_or_else(|| PluginError::UnknownType(type_name.to_string()))?;
        Ok(())
    }

    /// Get the factory registered for a type name.
    pub fn get(&self, type_name: &str) -> Option<F> {
        self.factories.get(type_name).map(|entry| entry.value().clone())
    }

    /// Check if a type name is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// All registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<F: Clone> Default for FactoryTable<F> {
    fn default() -> Self {
        Self::new()
    }
}
