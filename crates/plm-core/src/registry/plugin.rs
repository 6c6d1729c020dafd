//! Plugin resolver: type name to live instance.

use std::sync::Arc;

use tracing::debug;

use plm_protocols::error::{ListError, PluginError};
use plm_protocols::{Initializable, PersistentList, PersistentListProvider};

use super::base::FactoryTable;

/// Factory producing a fresh, unloaded list instance.
pub type ListFactory =
    Arc<dyn Fn() -> Result<Box<dyn PersistentList>, PluginError> + Send + Sync>;

/// Factory producing a provider instance. May hand out a shared instance.
pub type ProviderFactory =
    Arc<dyn Fn() -> Result<Arc<dyn PersistentListProvider>, PluginError> + Send + Sync>;

/// Resolves list and provider type names to live instances.
///
/// Plugin modules register their factories at process startup; the list
/// service resolves the type names stored in list metadata through it.
pub struct PluginResolver {
    lists: FactoryTable<ListFactory>,
    providers: FactoryTable<ProviderFactory>,
}

impl PluginResolver {
    /// Create a resolver with no registered types.
    pub fn new() -> Self {
        Self {
            lists: FactoryTable::new(),
            providers: FactoryTable::new(),
        }
    }

    /// Register a list type.
    pub fn register_list_type<F>(
        &self,
        type_name: impl Into<String>,
        factory: F,
    ) -> Result<(), PluginError>
    where
        F: Fn() -> Result<Box<dyn PersistentList>, PluginError> + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        debug!("Registering list type '{}'", type_name);
        self.lists.register(type_name, Arc::new(factory))
    }

    /// Register a provider type.
    pub fn register_provider_type<F>(
        &self,
        type_name: impl Into<String>,
        factory: F,
    ) -> Result<(), PluginError>
    where
        F: Fn() -> Result<Arc<dyn PersistentListProvider>, PluginError> + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        debug!("Registering provider type '{}'", type_name);
        self.providers.register(type_name, Arc::new(factory))
    }

    pub fn unregister_list_type(&self, type_name: &str) -> Result<(), PluginError> {
        self.lists.unregister(type_name)
    }

    pub fn unregister_provider_type(&self, type_name: &str) -> Result<(), PluginError> {
        self.providers.unregister(type_name)
    }

    pub fn has_list_type(&self, type_name: &str) -> bool {
        self.lists.contains(type_name)
    }

    pub fn has_provider_type(&self, type_name: &str) -> bool {
        self.providers.contains(type_name)
    }

    /// Registered list type names, sorted.
    pub fn list_types(&self) -> Vec<String> {
        self.lists.type_names()
    }

    /// Registered provider type names, sorted.
    pub fn provider_types(&self) -> Vec<String> {
        self.providers.type_names()
    }

    /// Construct a new, unloaded list of the given type.
    ///
    /// The list is not initialized here: initialization must wait until the
    /// caller has loaded it and attached its provider.
    pub fn resolve_list(&self, type_name: &str) -> Result<Box<dyn PersistentList>, PluginError> {
        let factory = self
            .lists
            .get(type_name)
            .ok_or_else(|| PluginError::UnknownType(type_name.to_string()))?;
        factory()
    }

    /// Resolve a provider of the given type and run its initialization hook.
    pub fn resolve_provider(
        &self,
        type_name: &str,
    ) -> Result<Arc<dyn PersistentListProvider>, PluginError> {
        let factory = self
            .providers
            .get(type_name)
            .ok_or_else(|| PluginError::UnknownType(type_name.to_string()))?;
        let provider = factory()?;

        initialize_if_supported(provider.as_initializable()).map_err(|source| {
            PluginError::InitializationFailed {
                type_name: type_name.to_string(),
                source,
            }
        })?;

        Ok(provider)
    }
}

impl Default for PluginResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the initialization hook when the capability is present.
///
/// Returns whether a hook ran.
pub fn initialize_if_supported(capability: Option<&dyn Initializable>) -> Result<bool, ListError> {
    match capability {
        Some(init) => {
            init.initialize()?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
