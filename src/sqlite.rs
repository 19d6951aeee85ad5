//! SQLite backend for the key-value storage collaborator.

use std::path::{Component, Path};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::Error;
use crate::storage::KeyValueStore;

/// SQLite database holding one JSON document per key.
pub struct Database {
    pub(crate) conn: Connection,
}

/// Initialize database schema.
fn create_schema(conn: &Connection) -> Result<(), Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

impl Database {
    /// Open or create a SQLite database at the given path.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The path contains `..` components
    /// - The database cannot be opened or the schema cannot be created
    pub fn open(path: &Path) -> Result<Self, Error> {
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(Error::Config(
                "Invalid database path: contains '..' which may escape the intended directory"
                    .to_string(),
            ));
        }

        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), Error> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, &now],
        )?;
        Ok(())
    }
}
