//! Plugin type resolution errors.

use thiserror::Error;

use super::ListError;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Plugin type not registered: {0}")]
    UnknownType(String),

    #[error("Plugin type already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Could not construct plugin type '{type_name}': {message}")]
    ConstructionFailed { type_name: String, message: String },

    #[error("Plugin type '{type_name}' failed to initialize: {source}")]
    InitializationFailed {
        type_name: String,
        #[source]
        source: ListError,
    },
}

impl PluginError {
    /// The type name the error refers to.
    pub fn type_name(&self) -> &str {
        match self {
            PluginError::UnknownType(name) | PluginError::AlreadyRegistered(name) => name,
            PluginError::ConstructionFailed { type_name, .. }
            | PluginError::InitializationFailed { type_name, .. } => type_name,
        }
    }
}
