//! Errors raised by list and provider implementations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("List initialization failed: {0}")]
    InitializationFailed(String),

    #[error("List has not been loaded from its metadata")]
    NotLoaded,

    #[error("No provider has been set for list '{0}'")]
    ProviderMissing(String),

    #[error("List storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Custom(String),
}
