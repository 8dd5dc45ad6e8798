use std::sync::Arc;

use prepdesk_core::{
    CompletionOutcome, IntakeOutcome, IntakeRequest, Prospect, ProspectId, ResourceCatalog,
    required_text,
};
use prepdesk_llm::SalesAssistant;
use prepdesk_storage::StorageBackend;
use prepdesk_storage::traits::ProspectStore;

use crate::ServiceError;
use crate::webhook::EnrichmentNotifier;

/// Prospect intake, resource recommendations and the completion tracker.
pub struct ProspectService {
    storage: Arc<StorageBackend>,
    catalog: Arc<ResourceCatalog>,
    assistant: Option<Arc<dyn SalesAssistant>>,
    notifier: Option<EnrichmentNotifier>,
}

impl ProspectService {
    #[must_use]
    pub fn new(
        storage: Arc<StorageBackend>,
        catalog: Arc<ResourceCatalog>,
        assistant: Option<Arc<dyn SalesAssistant>>,
        notifier: Option<EnrichmentNotifier>,
    ) -> Self {
        Self { storage, catalog, assistant, notifier }
    }

    /// Upsert the prospect by email, then notify the enrichment workflow.
    pub async fn submit_intake(&self, request: IntakeRequest) -> Result<IntakeOutcome, ServiceError> {
        let submission = request.validate()?;
        let outcome = self.storage.upsert_prospect(&submission).await?;
        tracing::info!(
            prospect_id = %outcome.prospect.id,
            created = outcome.created,
            product_interest = %outcome.prospect.product_interest,
            "intake stored"
        );
        if let Some(notifier) = &self.notifier {
            drop(notifier.notify(&outcome));
        }
        Ok(outcome)
    }

    pub async fn get_prospect(&self, id: ProspectId) -> Result<Prospect, ServiceError> {
        self.storage.get_prospect(id).await?.ok_or_else(|| ServiceError::not_found("prospect", id))
    }

    /// Mark a resource as read. Repeating the call is harmless and reported.
    pub async fn complete_resource(
        &self,
        prospect_id: Option<ProspectId>,
        resource_id: Option<String>,
    ) -> Result<CompletionOutcome, ServiceError> {
        let prospect_id =
            prospect_id.ok_or_else(|| ServiceError::Validation("missing required field: prospectId".to_owned()))?;
        let resource_id = required_text("resourceId", resource_id)?;
        let outcome = self.storage.complete_resource(prospect_id, &resource_id).await?;
        tracing::debug!(prospect_id = %prospect_id, resource_id = %resource_id, ?outcome, "resource completion");
        Ok(outcome)
    }

    /// Ask the assistant for resources and store them on the prospect.
    ///
    /// The answer must be exactly the expected number of distinct catalog ids;
    /// anything else is a generation failure and nothing is stored.
    pub async fn recommend_resources(
        &self,
        prospect_id: ProspectId,
        enrichment: serde_json::Value,
    ) -> Result<Vec<String>, ServiceError> {
        let prospect = self.get_prospect(prospect_id).await?;
        let assistant = self
            .assistant
            .as_ref()
            .ok_or_else(|| ServiceError::NotConfigured("LLM API key is not set".to_owned()))?;

        let picked = assistant
            .recommend_resources(&prospect.submission(), &enrichment, &self.catalog)
            .await
            .inspect_err(|e| {
                tracing::warn!(prospect_id = %prospect_id, error = %e, "resource recommendation failed");
            })?;
        let resources = self.catalog.validate_selection(&picked).map_err(|e| {
            tracing::warn!(prospect_id = %prospect_id, ?picked, "model picked invalid resources");
            ServiceError::GenerationFailure(e.to_string())
        })?;

        self.storage.set_ai_resources(prospect_id, &resources).await?;
        tracing::info!(prospect_id = %prospect_id, ?resources, "resources recommended");
        Ok(resources)
    }

    #[must_use]
    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }
}
