//! Facade error type.

use thiserror::Error;

use plm_config::ConfigError;
use plm_protocols::{ListServiceError, PersistenceError};

/// Errors raised while setting up a list service from configuration.
#[derive(Debug, Error)]
pub enum PlmError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Metadata store error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("List service error: {0}")]
    Service(#[from] ListServiceError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
