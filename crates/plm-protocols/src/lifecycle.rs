//! Lifecycle participation for host-owned services.

use crate::error::ListServiceError;

/// Lifecycle hook trait for components started and stopped by the host.
pub trait LifecycleHook: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Called during startup.
    fn on_startup(&self) -> Result<(), ListServiceError>;

    /// Called during shutdown.
    fn on_shutdown(&self) -> Result<(), ListServiceError> {
        Ok(())
    }

    /// Priority for startup/shutdown ordering (higher = earlier start, later stop).
    fn priority(&self) -> i32 {
        0
    }
}
