//! Error types for the persistent list manager protocol layer.

mod list;
mod listener;
mod persistence;
mod plugin;
mod service;

pub use list::*;
pub use listener::*;
pub use persistence::*;
pub use plugin::*;
pub use service::*;
