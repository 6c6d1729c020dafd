//! Build a [`ListService`] from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use plm_config::{Config, ConfigValidator, StoreBackend, StoreConfig};
use plm_core::{ListService, PluginResolver};
use plm_metadata_memory::InMemoryMetadataStore;
use plm_metadata_sqlite::SqliteMetadataStore;
use plm_protocols::MetadataStore;

use crate::error::PlmError;

/// Validate `config`, open its metadata store, and build the service.
///
/// The returned service is not bootstrapped yet. Call
/// [`ListService::bootstrap`] or register it with a
/// [`LifecycleManager`](plm_core::LifecycleManager). With
/// `service.bootstrap = false` it starts loaded and never reads the store.
pub fn assemble(config: &Config, resolver: Arc<PluginResolver>) -> Result<Arc<ListService>, PlmError> {
    let validation = ConfigValidator::validate(config)?;
    for warning in &validation.warnings {
        warn!("Config warning at {}: {}", warning.path, warning.message);
    }
    if let Some(err) = validation.into_error() {
        return Err(err.into());
    }

    let store = open_store(&config.store)?;
    let service = ListService::new(store, resolver, config.service.default_provider.clone());
    let service = if config.service.bootstrap {
        service
    } else {
        service.without_bootstrap()
    };

    info!(
        "List service assembled (store: {}, default provider: {})",
        service.store().id(),
        service.default_provider_type()
    );
    Ok(Arc::new(service))
}

/// Open the metadata store selected by `config`.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn MetadataStore>, PlmError> {
    let store: Arc<dyn MetadataStore> = match config.backend {
        StoreBackend::Sqlite => Arc::new(SqliteMetadataStore::open(&config.path)?),
        StoreBackend::Memory => Arc::new(InMemoryMetadataStore::new()),
    };
    Ok(store)
}
