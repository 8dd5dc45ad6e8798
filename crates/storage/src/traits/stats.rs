use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prepdesk_core::AdminStats;

use crate::error::StorageError;

/// Aggregate statistics.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Dashboard counters. "Upcoming" is scheduled and dated at or after `now`.
    async fn admin_stats(&self, now: DateTime<Utc>) -> Result<AdminStats, StorageError>;
}
