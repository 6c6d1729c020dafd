//! # PLM Protocols
//!
//! Core protocol definitions (traits) for the persistent list manager.
//! Contains only interface definitions and the shared data model.
//!
//! ## Core Traits
//!
//! - [`PersistentList`] - A live, named list instance
//! - [`PersistentListProvider`] - Storage mechanics behind a list
//! - [`Initializable`] - Optional one-time initialization capability
//! - [`MetadataStore`] - Durable storage of list metadata records
//! - [`LifecycleHook`] - Startup/shutdown participation

pub mod error;
pub mod initializable;
pub mod lifecycle;
pub mod list;
pub mod metadata;
pub mod provider;

pub use error::{
    ListError, ListServiceError, ListenerError, PersistenceError, PluginError,
};
pub use initializable::Initializable;
pub use lifecycle::LifecycleHook;
pub use list::{ListItem, PersistentList};
pub use metadata::{ListMetadata, MetadataStore};
pub use provider::PersistentListProvider;
