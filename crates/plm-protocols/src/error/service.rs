//! List service errors surfaced to callers of the registry.

use thiserror::Error;

use super::{ListError, PersistenceError, PluginError};

#[derive(Debug, Error)]
pub enum ListServiceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("A list with the key '{0}' has already been added to this service")]
    DuplicateKey(String),

    #[error("Plugin resolution failed: {0}")]
    Resolution(#[from] PluginError),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("List initialization failed: {0}")]
    Initialization(#[from] ListError),

    #[error("Lifecycle error: {0}")]
    Lifecycle(String),
}
