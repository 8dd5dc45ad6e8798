//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod chats;
mod events;
mod meetings;
mod prospects;
mod sales_reps;
mod stats;

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use prepdesk_core::{PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS};
use serde::de::DeserializeOwned;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
    /// Upper bound for a single store call, on top of the pool acquire timeout.
    timeout: Duration,
}

impl PgStorage {
    /// Connect, then create the schema if it is missing.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await?;
        tracing::info!(max_connections, timeout_secs = timeout.as_secs(), "PgStorage initialized");
        Ok(Self { pool, timeout })
    }

    /// Wrap an existing pool without touching the schema.
    pub fn from_pool(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Drain and close the pool. Later calls fail with `Unavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PgStorage pool closed");
    }

    /// Run one store call under the configured deadline.
    pub(crate) async fn timed<T, E, F>(&self, op: &'static str, fut: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, E>> + Send,
        StorageError: From<E>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(StorageError::from),
            Err(_) => {
                tracing::warn!(op, timeout_ms = self.timeout.as_millis(), "store call timed out");
                Err(StorageError::Unavailable(format!("{op} timed out after {:?}", self.timeout)))
            },
        }
    }
}

/// Decode a JSONB column strictly. A malformed value is corruption, not an empty list.
pub(crate) fn json_column<T: DeserializeOwned>(
    row: &PgRow,
    column: &str,
) -> Result<T, StorageError> {
    let value: serde_json::Value = row.try_get(column)?;
    serde_json::from_value(value).map_err(|e| StorageError::DataCorruption {
        context: format!("column {column} holds malformed JSON"),
        source: Box::new(e),
    })
}

/// Parse a text column into an enum.
pub(crate) fn parsed_column<T>(row: &PgRow, column: &str) -> Result<T, StorageError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(|e| {
        tracing::error!(column, value = %raw, "unparsable enum value in database");
        StorageError::DataCorruption { context: format!("column {column} = {raw:?}"), source: Box::new(e) }
    })
}
