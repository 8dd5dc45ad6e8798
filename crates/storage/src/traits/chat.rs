use async_trait::async_trait;
use prepdesk_core::{ChatMessage, MeetingChat, MeetingId};

use crate::error::StorageError;

/// Per-meeting chat transcript and cached game plan.
#[async_trait]
pub trait MeetingChatStore: Send + Sync {
    /// Replace the whole transcript. Last writer wins; the game plan is kept.
    /// An unknown meeting yields `ForeignKey`.
    async fn save_transcript(
        &self,
        meeting_id: MeetingId,
        messages: &[ChatMessage],
    ) -> Result<(), StorageError>;

    async fn get_meeting_chat(
        &self,
        meeting_id: MeetingId,
    ) -> Result<Option<MeetingChat>, StorageError>;

    /// Store a freshly generated plan, creating the chat record if needed.
    async fn save_game_plan(&self, meeting_id: MeetingId, plan: &str) -> Result<(), StorageError>;
}
