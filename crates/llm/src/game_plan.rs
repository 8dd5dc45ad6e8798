use prepdesk_core::{ChatMessage, FormSubmission, render_transcript};

use crate::ai_types::{ChatRequest, Message};
use crate::client::LlmClient;
use crate::error::LlmError;

const GAME_PLAN_SYSTEM: &str = "You are a fact-based assistant for sales reps. \
You summarise everything a prospect has told us before an intro call.

Only use information present in the prompt. Never invent company details, \
budgets, timelines or names.

You receive two inputs: the chat between the prospect and the product chatbot, \
which was told to note open questions for the rep, and the form the prospect \
filled in when booking (email, country, product interest and an optional free-text note).

The reps are experienced. Do not script the meeting or write an agenda. \
Surface what they need to know about this prospect and their needs, and call out \
every open question from the chat that the rep should be ready to answer.

Respond in Markdown.";

impl LlmClient {
    /// Generate a Markdown game plan for an upcoming meeting.
    ///
    /// # Errors
    /// Returns `LlmError` if the API call fails or the model returns nothing.
    pub async fn generate_game_plan(
        &self,
        submission: &FormSubmission,
        transcript: &[ChatMessage],
    ) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(GAME_PLAN_SYSTEM),
                Message::user(game_plan_prompt(submission, transcript)?),
            ],
            response_format: None,
        };
        let plan = self.chat_completion(&request).await?;
        tracing::debug!(chars = plan.len(), messages = transcript.len(), "game plan generated");
        Ok(plan.trim().to_owned())
    }
}

pub(crate) fn game_plan_prompt(
    submission: &FormSubmission,
    transcript: &[ChatMessage],
) -> Result<String, LlmError> {
    let form = serde_json::to_string_pretty(submission)
        .map_err(|e| LlmError::JsonParse { context: "form submission".to_owned(), source: e })?;
    let chat = if transcript.is_empty() {
        "(the prospect did not chat before booking)".to_owned()
    } else {
        render_transcript(transcript)
    };
    Ok(format!(
        "Write a short, concise game plan so the rep walks into the intro call \
fully prepared. Focus on what the chat history adds beyond the form.

Chat history (read it thoroughly):
{chat}

Form submission:
{form}"
    ))
}

#[cfg(test)]
mod tests {
    use prepdesk_core::{ChatRole, ProductInterest};

    use super::*;

    fn submission() -> FormSubmission {
        FormSubmission {
            email: "cto@shop.example".to_owned(),
            country: "Japan".to_owned(),
            product_interest: ProductInterest::V0,
            message: Some("Need faster prototyping".to_owned()),
        }
    }

    #[test]
    fn prompt_contains_transcript_and_form() {
        let transcript = vec![
            ChatMessage::new(ChatRole::User, "Do you support SSO?"),
            ChatMessage::new(ChatRole::Assistant, "I'll note that for your rep."),
        ];
        let prompt = game_plan_prompt(&submission(), &transcript).unwrap();
        assert!(prompt.contains("prospect: Do you support SSO?"));
        assert!(prompt.contains("assistant: I'll note that"));
        assert!(prompt.contains("cto@shop.example"));
        assert!(prompt.contains("Need faster prototyping"));
    }

    #[test]
    fn empty_transcript_is_stated_explicitly() {
        let prompt = game_plan_prompt(&submission(), &[]).unwrap();
        assert!(prompt.contains("did not chat"));
    }
}
