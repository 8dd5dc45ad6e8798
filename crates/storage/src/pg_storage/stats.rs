//! StatsStore implementation for PgStorage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prepdesk_core::AdminStats;
use sqlx::Row;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::StatsStore;

#[async_trait]
impl StatsStore for PgStorage {
    async fn admin_stats(&self, now: DateTime<Utc>) -> Result<AdminStats, StorageError> {
        let row = self
            .timed(
                "admin_stats",
                sqlx::query(
                    "SELECT
                       (SELECT COUNT(*) FROM meetings) AS total_meetings,
                       (SELECT COUNT(*) FROM meetings
                          WHERE status = 'scheduled' AND meeting_date >= $1) AS upcoming_meetings,
                       (SELECT COUNT(*) FROM meetings WHERE status = 'completed') AS completed_meetings,
                       (SELECT COUNT(*) FROM prospects) AS total_prospects",
                )
                .bind(now)
                .fetch_one(&self.pool),
            )
            .await?;
        Ok(AdminStats {
            total_meetings: row.try_get("total_meetings")?,
            upcoming_meetings: row.try_get("upcoming_meetings")?,
            completed_meetings: row.try_get("completed_meetings")?,
            total_prospects: row.try_get("total_prospects")?,
        })
    }
}
