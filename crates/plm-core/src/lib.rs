//! # PLM Core
//!
//! Registry and factory for named persistent lists.
//!
//! ## Components
//!
//! - [`ListService`] - Holds one live instance per list key, creates lists on
//!   demand, and rebuilds itself from stored metadata at startup
//! - [`PluginResolver`] - Type-name registration tables for list and provider
//!   plugins
//! - [`EventListenerList`] - Synchronous fan-out of list added/removed events
//! - [`LifecycleManager`] - Ordered startup and shutdown of host services

pub mod events;
pub mod lifecycle;
pub mod registry;
pub mod service;

#[cfg(test)]
mod test_support;

pub use events::{EventListenerList, ListChange, ListOperation, ListServiceEvent, ListServiceEventListener};
pub use lifecycle::{LifecycleManager, ServiceState};
pub use registry::{ListFactory, PluginResolver, ProviderFactory};
pub use service::{BootstrapSummary, ListService};
