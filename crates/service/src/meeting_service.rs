use std::sync::Arc;

use chrono::Utc;
use prepdesk_core::{
    BookingRequest, Meeting, MeetingFilter, MeetingId, MeetingStatus, MeetingView, ProspectId,
    SalesRepId,
};
use prepdesk_storage::traits::{MeetingStore, ProspectStore};
use prepdesk_storage::{StorageBackend, StorageError};

use crate::ServiceError;

/// The meeting ledger: bookings, listings and status changes.
pub struct MeetingService {
    storage: Arc<StorageBackend>,
}

impl MeetingService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Book a meeting. All three fields are required; nothing is written on
    /// a validation failure.
    pub async fn create_meeting(&self, request: BookingRequest) -> Result<Meeting, ServiceError> {
        let booking = request.validate()?;
        match self.storage.create_meeting(&booking).await {
            Ok(meeting) => {
                tracing::info!(
                    meeting_id = %meeting.id,
                    prospect_id = %meeting.prospect_id,
                    sales_rep_id = %meeting.sales_rep_id,
                    meeting_date = %meeting.meeting_date,
                    "meeting booked"
                );
                Ok(meeting)
            },
            Err(StorageError::ForeignKey(_)) => {
                Err(self.missing_party(booking.prospect_id, booking.sales_rep_id).await)
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Name the side of a rejected booking that does not exist.
    async fn missing_party(&self, prospect_id: ProspectId, sales_rep_id: SalesRepId) -> ServiceError {
        match self.storage.get_prospect(prospect_id).await {
            Ok(Some(_)) => ServiceError::not_found("sales rep", sales_rep_id),
            Ok(None) => ServiceError::not_found("prospect", prospect_id),
            Err(e) => e.into(),
        }
    }

    /// Future meetings, shaped by at most one of the two filters.
    pub async fn list_meetings(
        &self,
        sales_rep_id: Option<SalesRepId>,
        prospect_id: Option<ProspectId>,
    ) -> Result<Vec<MeetingView>, ServiceError> {
        let filter = MeetingFilter::from_params(sales_rep_id, prospect_id)?;
        Ok(self.storage.list_meetings(filter, Utc::now()).await?)
    }

    pub async fn get_meeting(&self, id: MeetingId) -> Result<MeetingView, ServiceError> {
        self.storage.get_meeting(id).await?.ok_or_else(|| ServiceError::not_found("meeting", id))
    }

    /// Overwrite a meeting's status. Any transition is allowed; leaving a
    /// terminal state is logged so odd edits stay visible.
    pub async fn update_status(
        &self,
        id: MeetingId,
        status: MeetingStatus,
    ) -> Result<Meeting, ServiceError> {
        let before = self.get_meeting(id).await?;
        if before.status.is_terminal() && before.status != status {
            tracing::warn!(meeting_id = %id, from = %before.status, to = %status, "meeting leaves terminal status");
        }
        let meeting = self
            .storage
            .update_meeting_status(id, status)
            .await?
            .ok_or_else(|| ServiceError::not_found("meeting", id))?;
        tracing::info!(meeting_id = %id, status = %meeting.status, "meeting status updated");
        Ok(meeting)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration};

    use super::*;
    use crate::test_support::{memory_storage, seed_prospect, seed_rep};

    fn request(
        prospect_id: Option<ProspectId>,
        sales_rep_id: Option<SalesRepId>,
        meeting_date: Option<DateTime<Utc>>,
    ) -> BookingRequest {
        BookingRequest { prospect_id, sales_rep_id, meeting_date }
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_without_writes() {
        let storage = memory_storage();
        let prospect = seed_prospect(&storage, "p@example.com").await;
        let rep = seed_rep(&storage, "Ana").await;
        let service = MeetingService::new(Arc::clone(&storage));
        let date = Some(Utc::now() + Duration::days(1));

        for bad in [
            request(None, Some(rep.id), date),
            request(Some(prospect.id), None, date),
            request(Some(prospect.id), Some(rep.id), None),
        ] {
            let err = service.create_meeting(bad).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{err}");
        }
        assert!(service.list_meetings(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_parties_are_not_found() {
        let storage = memory_storage();
        let prospect = seed_prospect(&storage, "p@example.com").await;
        let rep = seed_rep(&storage, "Ana").await;
        let service = MeetingService::new(storage);
        let date = Some(Utc::now() + Duration::days(1));

        let err = service
            .create_meeting(request(Some(ProspectId(999)), Some(rep.id), date))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "prospect", .. }));

        let err = service
            .create_meeting(request(Some(prospect.id), Some(SalesRepId(999)), date))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "sales rep", .. }));
    }

    #[tokio::test]
    async fn booked_meeting_shows_up_for_rep_and_prospect() {
        let storage = memory_storage();
        let prospect = seed_prospect(&storage, "p@example.com").await;
        let rep = seed_rep(&storage, "Ana").await;
        let service = MeetingService::new(storage);

        let meeting = service
            .create_meeting(request(
                Some(prospect.id),
                Some(rep.id),
                Some(Utc::now() + Duration::hours(5)),
            ))
            .await
            .unwrap();
        assert_eq!(meeting.status, MeetingStatus::Scheduled);

        let for_rep = service.list_meetings(Some(rep.id), None).await.unwrap();
        assert_eq!(for_rep.len(), 1);
        assert_eq!(for_rep[0].prospect_email, "p@example.com");

        let for_prospect = service.list_meetings(None, Some(prospect.id)).await.unwrap();
        assert_eq!(for_prospect[0].id, meeting.id);
        assert_eq!(for_prospect[0].sales_rep_name, "Ana");
    }

    #[tokio::test]
    async fn both_filters_is_a_validation_error() {
        let service = MeetingService::new(memory_storage());
        let err = service
            .list_meetings(Some(SalesRepId(1)), Some(ProspectId(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn status_updates_and_unknown_meeting() {
        let storage = memory_storage();
        let prospect = seed_prospect(&storage, "p@example.com").await;
        let rep = seed_rep(&storage, "Ana").await;
        let service = MeetingService::new(storage);
        let meeting = service
            .create_meeting(request(Some(prospect.id), Some(rep.id), Some(Utc::now())))
            .await
            .unwrap();

        let done = service.update_status(meeting.id, MeetingStatus::Completed).await.unwrap();
        assert_eq!(done.status, MeetingStatus::Completed);
        let view = service.get_meeting(meeting.id).await.unwrap();
        assert_eq!(view.status, MeetingStatus::Completed);

        assert!(service.get_meeting(MeetingId(500)).await.unwrap_err().is_not_found());
        assert!(
            service
                .update_status(MeetingId(500), MeetingStatus::Cancelled)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }
}
