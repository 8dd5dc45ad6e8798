use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prepdesk_core::{Meeting, MeetingFilter, MeetingId, MeetingStatus, MeetingView, NewMeeting};

use crate::error::StorageError;

/// The meeting ledger.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Record a booking with status `scheduled`.
    ///
    /// A prospect or rep id with no matching row yields `ForeignKey`.
    async fn create_meeting(&self, meeting: &NewMeeting) -> Result<Meeting, StorageError>;

    /// Meetings dated at or after `now`, shaped by `filter`.
    async fn list_meetings(
        &self,
        filter: MeetingFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingView>, StorageError>;

    async fn get_meeting(&self, id: MeetingId) -> Result<Option<MeetingView>, StorageError>;

    /// Overwrite the status. `None` when the meeting does not exist.
    async fn update_meeting_status(
        &self,
        id: MeetingId,
        status: MeetingStatus,
    ) -> Result<Option<Meeting>, StorageError>;
}
