//! The seam between the service layer and whatever writes text for it.

use async_trait::async_trait;
use prepdesk_core::{ChatMessage, FormSubmission, ResourceCatalog};

use crate::error::LlmError;

/// Text generation needed by the sales workflow.
///
/// `LlmClient` is the production implementation; tests substitute stubs.
#[async_trait]
pub trait SalesAssistant: Send + Sync {
    /// Markdown briefing for the rep, built only from the transcript and the
    /// prospect's own form answers.
    async fn game_plan(
        &self,
        submission: &FormSubmission,
        transcript: &[ChatMessage],
    ) -> Result<String, LlmError>;

    /// Resource ids picked from `catalog` for a waiting prospect. The answer
    /// is returned as given; callers validate it against the catalog.
    async fn recommend_resources(
        &self,
        submission: &FormSubmission,
        enrichment: &serde_json::Value,
        catalog: &ResourceCatalog,
    ) -> Result<Vec<String>, LlmError>;
}
