use std::sync::Arc;

use prepdesk_core::{ProspectId, SalesRep};
use prepdesk_storage::StorageBackend;
use prepdesk_storage::traits::{ProspectStore, SalesRepStore};

use crate::ServiceError;

/// Picks the rep who should take the next meeting.
///
/// This is a read only. Two bookings racing for the same least-loaded rep can
/// both be handed that rep; the imbalance is accepted rather than reserving
/// capacity.
pub struct AssignmentService {
    storage: Arc<StorageBackend>,
}

impl AssignmentService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// The rep with the fewest meetings of any status, lowest id on ties.
    pub async fn assign_rep(&self) -> Result<SalesRep, ServiceError> {
        let load = self
            .storage
            .least_loaded_rep()
            .await?
            .ok_or_else(|| ServiceError::not_found("sales rep", "any (roster is empty)"))?;
        tracing::debug!(rep_id = %load.rep.id, meeting_count = load.meeting_count, "rep assigned");
        Ok(load.rep)
    }

    /// Same as [`Self::assign_rep`] but refuses unknown prospects.
    pub async fn assign_rep_for_prospect(
        &self,
        prospect_id: ProspectId,
    ) -> Result<SalesRep, ServiceError> {
        if self.storage.get_prospect(prospect_id).await?.is_none() {
            return Err(ServiceError::not_found("prospect", prospect_id));
        }
        self.assign_rep().await
    }
}
