//! SQLite metadata store for the persistent list manager.
//!
//! Persists list definitions (key, plugin type names, description, creation
//! time) so the list service can rebuild its registry at startup.

mod schema;
mod store;

pub use store::SqliteMetadataStore;
