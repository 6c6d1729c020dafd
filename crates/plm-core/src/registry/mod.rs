//! Plugin type registration.

mod base;
mod plugin;

pub use base::FactoryTable;
pub use plugin::{initialize_if_supported, ListFactory, PluginResolver, ProviderFactory};
