//! Host lifecycle management.
//!
//! Starts registered [`LifecycleHook`]s in priority order and stops them in
//! reverse. A failed startup rolls back the hooks that already started.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info, warn};

use plm_protocols::error::ListServiceError;
use plm_protocols::LifecycleHook;

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ServiceState {
    /// Initial state, not started.
    Created = 0,
    Starting = 1,
    Running = 2,
    ShuttingDown = 3,
    Stopped = 4,
}

impl From<u8> for ServiceState {
    fn from(v: u8) -> Self {
        match v {
            1 => ServiceState::Starting,
            2 => ServiceState::Running,
            3 => ServiceState::ShuttingDown,
            4 => ServiceState::Stopped,
            _ => ServiceState::Created,
        }
    }
}

/// Drives startup and shutdown of host services.
pub struct LifecycleManager {
    state: AtomicU8,
    hooks: RwLock<Vec<Arc<dyn LifecycleHook>>>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(ServiceState::Created as u8),
            hooks: RwLock::new(Vec::new()),
        }
    }

    pub fn state(&self) -> ServiceState {
        ServiceState::from(self.state.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.state() == ServiceState::Running
    }

    /// Register a hook. Hooks with equal priority keep registration order.
    pub fn register_hook(&self, hook: Arc<dyn LifecycleHook>) {
        let mut hooks = self.hooks.write();
        hooks.push(hook);
        hooks.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    pub fn hook_names(&self) -> Vec<String> {
        self.hooks.read().iter().map(|h| h.name().to_string()).collect()
    }

    /// Start every hook, highest priority first.
    pub fn start(&self) -> Result<(), ListServiceError> {
        self.transition(ServiceState::Created, ServiceState::Starting)?;
        info!("Starting services...");

        let hooks = self.hooks.read().clone();
        for (i, hook) in hooks.iter().enumerate() {
            if let Err(e) = hook.on_startup() {
                error!("Failed to start '{}': {}", hook.name(), e);
                for started in hooks.iter().take(i).rev() {
                    if let Err(stop_err) = started.on_shutdown() {
                        warn!("Rollback of '{}' failed: {}", started.name(), stop_err);
                    }
                }
                self.state.store(ServiceState::Stopped as u8, Ordering::SeqCst);
                return Err(e);
            }
        }

        self.state.store(ServiceState::Running as u8, Ordering::SeqCst);
        info!("Services started");
        Ok(())
    }

    /// Stop every hook in reverse startup order.
    ///
    /// All hooks are stopped even if some fail; the failures are reported
    /// together.
    pub fn stop(&self) -> Result<(), ListServiceError> {
        self.transition(ServiceState::Running, ServiceState::ShuttingDown)?;
        info!("Stopping services...");

        let hooks = self.hooks.read().clone();
        let mut failed = Vec::new();
        for hook in hooks.iter().rev() {
            if let Err(e) = hook.on_shutdown() {
                warn!("Failed to stop '{}': {}", hook.name(), e);
                failed.push(hook.name().to_string());
            }
        }

        self.state.store(ServiceState::Stopped as u8, Ordering::SeqCst);
        info!("Services stopped");

        if failed.is_empty() {
            Ok(())
        } else {
            Err(ListServiceError::Lifecycle(format!(
                "{} hooks failed during shutdown: {}",
                failed.len(),
                failed.join(", ")
            )))
        }
    }

    fn transition(&self, from: ServiceState, to: ServiceState) -> Result<(), ListServiceError> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|current| {
                ListServiceError::Lifecycle(format!(
                    "Cannot move to {:?} from state: {:?}",
                    to,
                    ServiceState::from(current)
                ))
            })
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Priority levels for lifecycle hooks (higher = starts earlier, stops later).
pub mod priority {
    pub const STORAGE: i32 = 1000;
    pub const LIST_SERVICE: i32 = 500;
    pub const DEFAULT: i32 = 0;
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
