use std::sync::Arc;

use prepdesk_core::{ChatMessage, MAX_TRANSCRIPT_MESSAGES, MeetingId, MeetingView};
use prepdesk_llm::SalesAssistant;
use prepdesk_storage::StorageBackend;
use prepdesk_storage::traits::{MeetingChatStore, MeetingStore};

use crate::ServiceError;

/// Where a returned game plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Cached,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePlan {
    pub meeting_id: MeetingId,
    pub markdown: String,
    pub source: PlanSource,
}

/// The per-meeting chat annex: transcript storage and the game plan cache.
pub struct GamePlanService {
    storage: Arc<StorageBackend>,
    assistant: Option<Arc<dyn SalesAssistant>>,
}

impl GamePlanService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, assistant: Option<Arc<dyn SalesAssistant>>) -> Self {
        Self { storage, assistant }
    }

    async fn meeting(&self, id: MeetingId) -> Result<MeetingView, ServiceError> {
        self.storage.get_meeting(id).await?.ok_or_else(|| ServiceError::not_found("meeting", id))
    }

    /// Replace the stored transcript. Concurrent writers race; the last one wins.
    pub async fn append_transcript(
        &self,
        meeting_id: MeetingId,
        messages: Vec<ChatMessage>,
    ) -> Result<(), ServiceError> {
        if messages.len() > MAX_TRANSCRIPT_MESSAGES {
            return Err(ServiceError::Validation(format!(
                "transcript has {} messages, limit is {MAX_TRANSCRIPT_MESSAGES}",
                messages.len()
            )));
        }
        self.meeting(meeting_id).await?;
        self.storage.save_transcript(meeting_id, &messages).await?;
        tracing::debug!(meeting_id = %meeting_id, messages = messages.len(), "transcript saved");
        Ok(())
    }

    /// Stored messages, empty when the prospect never chatted.
    pub async fn get_transcript(
        &self,
        meeting_id: MeetingId,
    ) -> Result<Vec<ChatMessage>, ServiceError> {
        self.meeting(meeting_id).await?;
        Ok(self
            .storage
            .get_meeting_chat(meeting_id)
            .await?
            .map(|chat| chat.messages)
            .unwrap_or_default())
    }

    /// Return the cached plan unless `force`, otherwise synthesize a new one.
    ///
    /// A failed or blank generation leaves any earlier plan in place.
    pub async fn get_game_plan(
        &self,
        meeting_id: MeetingId,
        force: bool,
    ) -> Result<GamePlan, ServiceError> {
        let meeting = self.meeting(meeting_id).await?;
        let chat = self.storage.get_meeting_chat(meeting_id).await?;

        if !force
            && let Some(markdown) = chat.as_ref().and_then(|c| c.game_plan.clone())
            && !markdown.is_empty()
        {
            return Ok(GamePlan { meeting_id, markdown, source: PlanSource::Cached });
        }

        let assistant = self
            .assistant
            .as_ref()
            .ok_or_else(|| ServiceError::NotConfigured("LLM API key is not set".to_owned()))?;
        let transcript = chat.map(|c| c.messages).unwrap_or_default();

        let markdown = match assistant.game_plan(&meeting.submission(), &transcript).await {
            Ok(plan) if !plan.trim().is_empty() => plan,
            Ok(_) => {
                tracing::warn!(meeting_id = %meeting_id, "game plan generation returned nothing");
                return Err(ServiceError::GenerationFailure("model returned an empty plan".to_owned()));
            },
            Err(e) => {
                tracing::warn!(meeting_id = %meeting_id, error = %e, "game plan generation failed");
                return Err(e.into());
            },
        };

        self.storage.save_game_plan(meeting_id, &markdown).await?;
        tracing::info!(meeting_id = %meeting_id, force, chars = markdown.len(), "game plan generated");
        Ok(GamePlan { meeting_id, markdown, source: PlanSource::Generated })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::{Duration, Utc};
    use prepdesk_core::ChatRole;

    use super::*;
    use crate::test_support::{StubAssistant, book, memory_storage, seed_prospect, seed_rep};

    async fn meeting_fixture(storage: &StorageBackend) -> MeetingId {
        let prospect = seed_prospect(storage, "p@example.com").await;
        let rep = seed_rep(storage, "Ana").await;
        book(storage, prospect.id, rep.id, Utc::now() + Duration::days(1)).await.id
    }

    #[tokio::test]
    async fn cached_plan_is_returned_without_generation() {
        let storage = memory_storage();
        let id = meeting_fixture(&storage).await;
        let stub = StubAssistant::with_plans(vec![Ok("# First".to_owned()), Ok("# Second".to_owned())]);
        let service = GamePlanService::new(storage, Some(stub.clone()));

        let first = service.get_game_plan(id, false).await.unwrap();
        let second = service.get_game_plan(id, false).await.unwrap();

        assert_eq!(first.source, PlanSource::Generated);
        assert_eq!(second.source, PlanSource::Cached);
        assert_eq!(second.markdown, "# First");
        assert_eq!(stub.plan_calls(), 1);
    }

    #[tokio::test]
    async fn force_regenerates_and_overwrites() {
        let storage = memory_storage();
        let id = meeting_fixture(&storage).await;
        let stub = StubAssistant::with_plans(vec![Ok("# First".to_owned()), Ok("# Second".to_owned())]);
        let service = GamePlanService::new(storage, Some(stub.clone()));

        service.get_game_plan(id, false).await.unwrap();
        let forced = service.get_game_plan(id, true).await.unwrap();
        let cached = service.get_game_plan(id, false).await.unwrap();

        assert_eq!(forced.markdown, "# Second");
        assert_eq!(cached.markdown, "# Second");
        assert_eq!(stub.plan_calls(), 2);
    }

    #[tokio::test]
    async fn failed_regeneration_keeps_previous_plan() {
        let storage = memory_storage();
        let id = meeting_fixture(&storage).await;
        let stub =
            StubAssistant::with_plans(vec![Ok("# Keep me".to_owned()), Err("provider down".to_owned())]);
        let service = GamePlanService::new(storage, Some(stub));

        service.get_game_plan(id, false).await.unwrap();
        let err = service.get_game_plan(id, true).await.unwrap_err();
        assert!(matches!(err, ServiceError::GenerationFailure(_)));

        let cached = service.get_game_plan(id, false).await.unwrap();
        assert_eq!(cached.markdown, "# Keep me");
    }

    #[tokio::test]
    async fn blank_output_is_a_generation_failure_and_not_cached() {
        let storage = memory_storage();
        let id = meeting_fixture(&storage).await;
        let stub = StubAssistant::with_plans(vec![Ok("  \n".to_owned())]);
        let service = GamePlanService::new(Arc::clone(&storage), Some(stub));

        let err = service.get_game_plan(id, false).await.unwrap_err();
        assert!(matches!(err, ServiceError::GenerationFailure(_)));
        let chat = storage.get_meeting_chat(id).await.unwrap();
        assert!(chat.and_then(|c| c.game_plan).is_none());
    }

    #[tokio::test]
    async fn empty_transcript_still_generates() {
        let storage = memory_storage();
        let id = meeting_fixture(&storage).await;
        let stub = StubAssistant::with_plans(vec![Ok("# Form only".to_owned())]);
        let service = GamePlanService::new(storage, Some(stub.clone()));

        let plan = service.get_game_plan(id, false).await.unwrap();
        assert_eq!(plan.markdown, "# Form only");
        assert_eq!(stub.last_transcript_len.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn generation_sees_the_full_transcript() {
        let storage = memory_storage();
        let id = meeting_fixture(&storage).await;
        let stub = StubAssistant::with_plans(vec![Ok("# Plan".to_owned())]);
        let service = GamePlanService::new(storage, Some(stub.clone()));

        let messages = vec![
            ChatMessage::new(ChatRole::User, "Do you support SAML?"),
            ChatMessage::new(ChatRole::Assistant, "Noted for your rep."),
            ChatMessage::new(ChatRole::User, "Also EU data residency."),
        ];
        service.append_transcript(id, messages.clone()).await.unwrap();
        assert_eq!(service.get_transcript(id).await.unwrap(), messages);

        service.get_game_plan(id, false).await.unwrap();
        assert_eq!(stub.last_transcript_len.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn unknown_meeting_is_not_found_everywhere() {
        let storage = memory_storage();
        let stub = StubAssistant::with_plans(vec![Ok("# Plan".to_owned())]);
        let service = GamePlanService::new(storage, Some(stub.clone()));
        let missing = MeetingId(12345);

        assert!(service.get_game_plan(missing, false).await.unwrap_err().is_not_found());
        assert!(service.append_transcript(missing, Vec::new()).await.unwrap_err().is_not_found());
        assert!(service.get_transcript(missing).await.unwrap_err().is_not_found());
        assert_eq!(stub.plan_calls(), 0);
    }

    #[tokio::test]
    async fn missing_assistant_is_not_configured() {
        let storage = memory_storage();
        let id = meeting_fixture(&storage).await;
        let service = GamePlanService::new(storage, None);
        let err = service.get_game_plan(id, false).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn transcript_without_chat_is_empty() {
        let storage = memory_storage();
        let id = meeting_fixture(&storage).await;
        let service = GamePlanService::new(storage, None);
        assert!(service.get_transcript(id).await.unwrap().is_empty());
    }
}
