//! SQLite bootstrap for the todo store.
//!
//! Runtime defaults are intentionally conservative:
//! - `journal_mode = WAL` so the single-process server never trips over its
//!   own readers
//! - `busy_timeout = 5s` to reduce transient lock failures
//! - `foreign_keys = ON` even though the current schema has no references
//!
//! There is no schema versioning: the single `todos` table is created with
//! `IF NOT EXISTS` on every open.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

/// Busy timeout applied to every connection.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Failures in the storage layer. Handlers map these to 500; they are never
/// retried and never leak into response bodies.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Could not create the directory that should hold the database file.
    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Any SQLite-level failure, including an id-uniqueness violation on
    /// insert.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    createdAt INTEGER NOT NULL
);
";

/// Open (or create) the todo database at `path`, apply runtime pragmas, and
/// ensure the schema exists. Parent directories are created as needed.
pub fn open(path: &Path) -> Result<Connection, StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    let conn = Connection::open(path)?;
    configure(&conn)?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(conn)
}

/// Open a private in-memory database with the same pragmas and schema.
/// Useful for tests and embedding.
pub fn open_in_memory() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    // In-memory databases report "memory" here; the value is irrelevant.
    let _journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
    Ok(())
}
