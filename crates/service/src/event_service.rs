use std::sync::Arc;

use prepdesk_core::{Event, EventId, EventQuery, EventUser, NewEvent};
use prepdesk_storage::StorageBackend;
use prepdesk_storage::traits::EventStore;

use crate::ServiceError;

/// Append-only analytics sink.
pub struct EventService {
    storage: Arc<StorageBackend>,
}

impl EventService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn record_event(
        &self,
        user: EventUser,
        event_type: Option<String>,
        event_name: Option<String>,
    ) -> Result<EventId, ServiceError> {
        let event = NewEvent::new(user, event_type, event_name)?;
        let id = self.storage.record_event(&event).await?;
        tracing::debug!(event_id = %id, kind = event.user.kind(), event_type = %event.event_type, "event recorded");
        Ok(id)
    }

    /// Filters are bound as parameters, never spliced into SQL. Blank
    /// filter values are treated as absent.
    pub async fn list_events(
        &self,
        user: EventUser,
        event_type: Option<String>,
        event_name: Option<String>,
    ) -> Result<Vec<Event>, ServiceError> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let query = EventQuery {
            user,
            event_type: non_blank(event_type),
            event_name: non_blank(event_name),
        };
        Ok(self.storage.list_events(&query).await?)
    }
}
