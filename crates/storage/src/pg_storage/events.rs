//! EventStore implementation for PgStorage.

use async_trait::async_trait;
use prepdesk_core::{Event, EventId, EventQuery, EventUser, NewEvent};
use sqlx::Row;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::EventStore;

#[async_trait]
impl EventStore for PgStorage {
    async fn record_event(&self, event: &NewEvent) -> Result<EventId, StorageError> {
        let row = self
            .timed(
                "record_event",
                sqlx::query(
                    "INSERT INTO events (user_kind, user_id, event_type, event_name)
                     VALUES ($1, $2, $3, $4) RETURNING id",
                )
                .bind(event.user.kind())
                .bind(event.user.raw_id())
                .bind(&event.event_type)
                .bind(&event.event_name)
                .fetch_one(&self.pool),
            )
            .await?;
        Ok(EventId(row.try_get("id")?))
    }

    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, StorageError> {
        let rows = self
            .timed(
                "list_events",
                sqlx::query(
                    "SELECT id, user_kind, user_id, event_type, event_name, created_at
                     FROM events
                     WHERE user_kind = $1 AND user_id = $2
                       AND ($3::text IS NULL OR event_type = $3)
                       AND ($4::text IS NULL OR event_name = $4)",
                )
                .bind(query.user.kind())
                .bind(query.user.raw_id())
                .bind(query.event_type.as_deref())
                .bind(query.event_name.as_deref())
                .fetch_all(&self.pool),
            )
            .await?;
        rows.iter()
            .map(|r| -> Result<Event, StorageError> {
                let kind: String = r.try_get("user_kind")?;
                let raw_id: String = r.try_get("user_id")?;
                Ok(Event {
                    id: EventId(r.try_get("id")?),
                    user: EventUser::from_parts(&kind, &raw_id),
                    event_type: r.try_get("event_type")?,
                    event_name: r.try_get("event_name")?,
                    created_at: r.try_get("created_at")?,
                })
            })
            .collect()
    }
}
