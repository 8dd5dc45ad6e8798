use async_trait::async_trait;
use prepdesk_core::{Event, EventId, EventQuery, NewEvent};

use crate::error::StorageError;

/// Append-only analytics events.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn record_event(&self, event: &NewEvent) -> Result<EventId, StorageError>;

    /// Events matching `query`. Order is unspecified.
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, StorageError>;
}
