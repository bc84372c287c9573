//! `SQLite` storage implementation
//!
//! All methods are synchronous; the async store traits in `crate::traits`
//! run them on the blocking pool.

// SQLite uses i64 for counts/limits, Rust uses usize - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod backend;
mod models;
mod prompts;
mod results;
mod settings;
mod stats;

use std::path::Path;
use std::sync::Arc;

use chatlist_core::constants::{DB_BUSY_TIMEOUT_MS, DB_POOL_SIZE_ENV, DEFAULT_DB_POOL_SIZE};
use chatlist_core::env_config::env_parse_with_default;
use chatlist_core::{Clock, SystemClock, parse_timestamp};
use chrono::NaiveDateTime;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use rusqlite::types::Type;

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping the `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
    pub(crate) clock: Arc<dyn Clock>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Read a persisted `YYYY-MM-DD HH:MM:SS` column
pub(crate) fn timestamp_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Escape special characters for LIKE pattern matching
pub(crate) fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Clamp a caller-supplied page size into `1..=MAX_QUERY_LIMIT`
pub(crate) fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, chatlist_core::constants::MAX_QUERY_LIMIT)
}

/// Per-connection settings: referential integrity and concurrency
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.pragma_update(None, "busy_timeout", DB_BUSY_TIMEOUT_MS)?;
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(())
}

fn db_pool_size() -> u32 {
    env_parse_with_default(DB_POOL_SIZE_ENV, DEFAULT_DB_POOL_SIZE).max(1)
}

impl Storage {
    /// Open (creating if absent) the database at `db_path` using the system clock.
    ///
    /// # Errors
    /// Returns error if the directory, pool or migrations fail.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        Self::with_clock(db_path, Arc::new(SystemClock))
    }

    /// Open the database with an explicit timestamp source.
    ///
    /// # Errors
    /// Returns error if the directory, pool or migrations fail.
    pub fn with_clock(db_path: &Path, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = db_pool_size();
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        // Run migrations on first connection
        let conn = pool.get()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(path = %db_path.display(), pool_size, "Storage initialized with connection pool");

        Ok(Self { pool, clock })
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}
