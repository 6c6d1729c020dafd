//! SQLite metadata store implementation.

use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, ErrorCode};
use tracing::debug;

use plm_protocols::error::PersistenceError;
use plm_protocols::{ListMetadata, MetadataStore};

use crate::schema::init_schema;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// SQLite-based list metadata store.
///
/// The connection sits behind a mutex; calls block the caller, which is what
/// the list service expects of its store.
pub struct SqliteMetadataStore {
    conn: Mutex<Connection>,
}

impl SqliteMetadataStore {
    /// Create a new in-memory database.
    pub fn in_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PersistenceError::ConnectionError(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Open (or create) a file-backed database. Missing parent directories
    /// are created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::ConnectionError(e.to_string()))?;
        }

        debug!("Opening list metadata database at {}", path.display());
        let conn = Connection::open(path)
            .map_err(|e| PersistenceError::ConnectionError(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, PersistenceError> {
        init_schema(&conn).map_err(|e| PersistenceError::QueryError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl MetadataStore for SqliteMetadataStore {
    fn id(&self) -> &str {
        "sqlite"
    }

    fn lists(&self) -> Result<Vec<ListMetadata>, PersistenceError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, key, provider_type, list_type, description, created_at
                 FROM persistent_lists ORDER BY id",
            )
            .map_err(|e| PersistenceError::QueryError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })
            .map_err(|e| PersistenceError::QueryError(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            let (id, key, provider_type, list_type, description, created_str) =
                row.map_err(|e| PersistenceError::QueryError(e.to_string()))?;

            let created_at = DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    PersistenceError::SerializationError(format!(
                        "invalid created_at for list '{}': {}",
                        key, e
                    ))
                })?;

            records.push(ListMetadata {
                id: Some(id),
                key,
                provider_type,
                list_type,
                description,
                created_at,
            });
        }

        Ok(records)
    }

    fn add_list(&self, mut metadata: ListMetadata) -> Result<ListMetadata, PersistenceError> {
        let conn = self.conn.lock();
        let result = conn.execute(
            "INSERT INTO persistent_lists (id, key, provider_type, list_type, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                metadata.id,
                metadata.key,
                metadata.provider_type,
                metadata.list_type,
                metadata.description,
                metadata.created_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                return Err(PersistenceError::Duplicate(metadata.key));
            }
            Err(e) => return Err(PersistenceError::StorageError(e.to_string())),
        }

        let id = conn.last_insert_rowid();
        metadata.id = Some(id);
        debug!("Stored metadata for list '{}' with id {}", metadata.key, id);

        Ok(metadata)
    }

    fn remove_list(&self, key: &str) -> Result<(), PersistenceError> {
        let conn = self.conn.lock();
        let removed = conn
            .execute("DELETE FROM persistent_lists WHERE key = ?1", [key])
            .map_err(|e| PersistenceError::StorageError(e.to_string()))?;

        debug!("Removed {} metadata rows for list '{}'", removed, key);
        Ok(())
    }
}
