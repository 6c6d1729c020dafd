//! Listener callback errors.

use thiserror::Error;

/// Error returned by a list service event listener.
///
/// The event dispatcher logs these and keeps delivering to the remaining
/// listeners.
#[derive(Debug, Error)]
#[error("Listener failed: {0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
