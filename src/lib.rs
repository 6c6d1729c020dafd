//! # PLM
//!
//! Persistent list manager: a process-wide registry of named lists whose
//! contents live behind pluggable storage providers.
//!
//! A host registers its list and provider types on a [`PluginResolver`],
//! loads a [`Config`], and calls [`assemble`] to get a [`ListService`]:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use plm::{ConfigLoader, PluginResolver};
//!
//! # fn main() -> Result<(), plm::PlmError> {
//! let config = ConfigLoader::load_str("[store]\nbackend = \"memory\"")?;
//! let _guard = plm::telemetry::init_tracing(&config.logging)?;
//!
//! let resolver = Arc::new(PluginResolver::new());
//! // resolver.register_list_type(...), resolver.register_provider_type(...)
//!
//! let service = plm::assemble(&config, resolver)?;
//! service.bootstrap()?;
//! # Ok(())
//! # }
//! ```

mod assemble;
mod error;
pub mod telemetry;

pub use assemble::{assemble, open_store};
pub use error::PlmError;

pub use plm_config::{
    Config, ConfigError, ConfigLoader, ConfigValidator, LogFormat, LoggingConfig, ServiceConfig,
    StoreBackend, StoreConfig,
};
pub use plm_core::{
    BootstrapSummary, EventListenerList, LifecycleManager, ListChange, ListOperation, ListService,
    ListServiceEvent, ListServiceEventListener, PluginResolver, ServiceState,
};
pub use plm_metadata_memory::InMemoryMetadataStore;
pub use plm_metadata_sqlite::SqliteMetadataStore;
pub use plm_protocols::{
    Initializable, LifecycleHook, ListError, ListItem, ListMetadata, ListServiceError,
    ListenerError, MetadataStore, PersistenceError, PersistentList, PersistentListProvider,
    PluginError,
};
