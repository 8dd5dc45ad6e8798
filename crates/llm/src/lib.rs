//! LLM client for sales game plans and resource recommendations

mod ai_types;
mod assistant;
mod client;
pub mod error;
mod game_plan;
mod resources;

#[cfg(test)]
mod retry_tests;
#[cfg(test)]
mod tests;

use async_trait::async_trait;
use prepdesk_core::{ChatMessage, FormSubmission, ResourceCatalog};

pub use assistant::SalesAssistant;
pub use client::{LlmClient, strip_markdown_json, truncate};
pub use error::LlmError;

#[async_trait]
impl SalesAssistant for LlmClient {
    async fn game_plan(
        &self,
        submission: &FormSubmission,
        transcript: &[ChatMessage],
    ) -> Result<String, LlmError> {
        self.generate_game_plan(submission, transcript).await
    }

    async fn recommend_resources(
        &self,
        submission: &FormSubmission,
        enrichment: &serde_json::Value,
        catalog: &ResourceCatalog,
    ) -> Result<Vec<String>, LlmError> {
        self.pick_resources(submission, enrichment, catalog).await
    }
}
