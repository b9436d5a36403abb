//! Database layer for the time tracker.

pub mod error;
pub mod tasks;
pub mod users;

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Type;
use rusqlite::Connection;

use crate::error::{TrackerError, TrackerResult};
use crate::timestamp;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Database handle wrapping a SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at the given path and apply pending migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Self::open_unmigrated(path, DEFAULT_BUSY_TIMEOUT_MS)?;
        db.migrate()?;
        Ok(db)
    }

    /// Open the database without touching its schema.
    pub fn open_unmigrated<P: AsRef<Path>>(path: P, busy_timeout_ms: u64) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL lets readers proceed while a write is in flight
        conn.execute_batch(&format!(
            "PRAGMA journal_mode=WAL;
             PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout={busy_timeout_ms};"
        ))?;
        register_functions(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a migrated in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        register_functions(&conn)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;

        Ok(db)
    }

    /// Apply pending migrations, returning how many ran.
    pub fn migrate(&self) -> Result<usize> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection mutex poisoned"))?;
        let report = embedded::migrations::runner().run(&mut *conn)?;
        Ok(report.applied_migrations().len())
    }

    /// Execute a function with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> TrackerResult<T>
    where
        F: FnOnce(&Connection) -> TrackerResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| TrackerError::internal(anyhow::anyhow!("database connection mutex poisoned")))?;
        f(&conn)
    }
}

/// `casefold(text)` lowercases with full Unicode rules; SQLite's built-in
/// `lower()` and `LIKE` only fold ASCII.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|s| s.to_lowercase()))
        },
    )
}

/// Read a storage-format timestamp column.
pub(crate) fn timestamp_column(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    timestamp::from_storage(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
