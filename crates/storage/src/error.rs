//! Typed error enum for the storage layer.
//!
//! Callers match on the failure mode (validation, conflict, not found) instead
//! of inspecting message strings. Engine-level failures keep their source.

use chatlist_core::CoreError;
use rusqlite::ErrorCode;
use rusqlite::ffi;
use thiserror::Error;

/// Storage-layer error covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Malformed or missing input, including references to absent prompts.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Uniqueness violation (model name, setting key).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Target row does not exist.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// SQL / lock / I/O failure inside SQLite.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Connection pool failure (exhausted, timed out).
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Blocking task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Stored data could not be decoded into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Database directory could not be created.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    /// Whether this error is likely transient (worth retrying by the caller).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => {
                matches!(err.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
            },
            Self::Pool(_) => true,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Custom `From<rusqlite::Error>`, not a blanket `#[from]`.
///
/// - UNIQUE / PRIMARY KEY constraint → `Conflict`
/// - FOREIGN KEY constraint → `Validation`
/// - column that does not decode into its Rust type → `DataCorruption`
/// - `QueryReturnedNoRows` → `NotFound` (generic; callers remap with entity context)
/// - everything else → `Database`
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
                let detail = msg.clone().unwrap_or_else(|| e.to_string());
                match e.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        Self::Conflict(detail)
                    },
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Self::Validation(detail),
                    _ => Self::Database(rusqlite::Error::SqliteFailure(e, msg)),
                }
            },
            err @ (rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)) => Self::DataCorruption {
                context: format!("undecodable row: {err}"),
                source: Box::new(err),
            },
            rusqlite::Error::QueryReturnedNoRows => Self::NotFound { entity: "row", id: "unknown".into() },
            other => Self::Database(other),
        }
    }
}

impl From<CoreError> for StorageError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Serialization(e) => e.into(),
            other => Self::Validation(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}
