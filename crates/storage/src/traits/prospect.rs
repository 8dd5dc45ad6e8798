use async_trait::async_trait;
use prepdesk_core::{CompletionOutcome, FormSubmission, IntakeOutcome, Prospect, ProspectId};

use crate::error::StorageError;

/// Prospect records keyed by id, upserted by email.
#[async_trait]
pub trait ProspectStore: Send + Sync {
    /// Insert a prospect or, when the email is already known, overwrite its
    /// form fields in place. Resource lists are left alone on update.
    async fn upsert_prospect(
        &self,
        submission: &FormSubmission,
    ) -> Result<IntakeOutcome, StorageError>;

    async fn get_prospect(&self, id: ProspectId) -> Result<Option<Prospect>, StorageError>;

    /// Add `resource_id` to the completed set.
    ///
    /// Returns `NotFound` for an unknown prospect. The append and the
    /// membership check happen in one step so concurrent calls never
    /// produce a duplicate entry.
    async fn complete_resource(
        &self,
        id: ProspectId,
        resource_id: &str,
    ) -> Result<CompletionOutcome, StorageError>;

    /// Replace the recommended resource list. Returns the updated prospect.
    async fn set_ai_resources(
        &self,
        id: ProspectId,
        resources: &[String],
    ) -> Result<Prospect, StorageError>;
}
