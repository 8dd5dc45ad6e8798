use prepdesk_core::{FormSubmission, ProductInterest, RECOMMENDED_RESOURCE_COUNT, ResourceCatalog};

use crate::ai_types::{ChatRequest, Message, RecommendationJson, ResponseFormat};
use crate::client::{LlmClient, strip_markdown_json, truncate};
use crate::error::LlmError;

impl LlmClient {
    /// Ask the model which catalog resources a waiting prospect should read.
    ///
    /// # Errors
    /// Returns `LlmError` if the API call fails or the answer is not the
    /// expected JSON shape. Catalog membership is not checked here.
    pub async fn pick_resources(
        &self,
        submission: &FormSubmission,
        enrichment: &serde_json::Value,
        catalog: &ResourceCatalog,
    ) -> Result<Vec<String>, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(recommendation_system(catalog, submission.product_interest)?),
                Message::user(recommendation_prompt(submission, enrichment)?),
            ],
            response_format: Some(ResponseFormat::json_object()),
        };
        let content = self.chat_completion(&request).await?;
        parse_recommendation(&content)
    }
}

fn to_pretty<T: serde::Serialize + ?Sized>(value: &T, context: &str) -> Result<String, LlmError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| LlmError::JsonParse { context: context.to_owned(), source: e })
}

/// Lists only the resources matching `interest`, unless too few of them remain
/// to pick from.
pub(crate) fn recommendation_system(
    catalog: &ResourceCatalog,
    interest: ProductInterest,
) -> Result<String, LlmError> {
    let relevant = catalog.for_interest(interest);
    let resources = if relevant.len() >= RECOMMENDED_RESOURCE_COUNT {
        to_pretty(&relevant, "resource catalog")?
    } else {
        to_pretty(catalog, "resource catalog")?
    };
    Ok(format!(
        "Pick the {RECOMMENDED_RESOURCE_COUNT} resources most relevant to a prospect who is \
waiting for a meeting with a sales rep.

Each resource has a name and description. Its type is blog (high level, for \
non-technical readers), documentation (hands-on detail) or prompt (for technical \
readers interested in v0). Its product is vercel, v0 or vercel_and_v0 and should \
line up with the prospect's stated interest. Tags hint at the industries and roles \
it suits.

Answer with JSON only: {{\"resources\": [\"<id>\", \"<id>\", \"<id>\"]}} using \
{RECOMMENDED_RESOURCE_COUNT} distinct ids from this list:
{resources}"
    ))
}

pub(crate) fn recommendation_prompt(
    submission: &FormSubmission,
    enrichment: &serde_json::Value,
) -> Result<String, LlmError> {
    Ok(format!(
        "Form submission:\n{}\n\nThird-party enrichment for the email and its domain:\n{}",
        to_pretty(submission, "form submission")?,
        to_pretty(enrichment, "enrichment data")?,
    ))
}

pub(crate) fn parse_recommendation(content: &str) -> Result<Vec<String>, LlmError> {
    let json = strip_markdown_json(content);
    // Some models answer with the bare array despite the instructions.
    if json.starts_with('[') {
        return serde_json::from_str(json).map_err(|e| LlmError::JsonParse {
            context: format!("resource list: {}", truncate(json, 200)),
            source: e,
        });
    }
    let parsed: RecommendationJson = serde_json::from_str(json).map_err(|e| LlmError::JsonParse {
        context: format!("resource recommendation: {}", truncate(json, 200)),
        source: e,
    })?;
    Ok(parsed.resources)
}
