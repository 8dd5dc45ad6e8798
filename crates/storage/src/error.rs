//! Typed error enum for the storage layer.
//!
//! Callers match on the failure mode (not found, duplicate, dangling
//! reference, store down) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation (duplicate rep email).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Foreign key violation: the row references a prospect, rep or meeting that does not exist.
    #[error("dangling reference: {0}")]
    ForeignKey(String),

    /// The store could not be reached in time (pool timeout, IO, closed pool, call timeout).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other SQL failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Row data could not be deserialized into domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Whether this error is a unique-constraint violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Custom `From<sqlx::Error>`, not a blanket `#[from]`.
///
/// - `RowNotFound` → `NotFound` (generic; callers remap with entity context)
/// - SQLSTATE 23505 → `Duplicate`
/// - SQLSTATE 23503 → `ForeignKey`
/// - pool timeout / closed pool / IO → `Unavailable`
/// - everything else → `Database`
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Duplicate(db_err.message().to_owned())
            },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23503") => {
                Self::ForeignKey(db_err.message().to_owned())
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err.to_string())
            },
            _ => Self::Database(err),
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
