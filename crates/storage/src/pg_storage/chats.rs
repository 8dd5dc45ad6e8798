//! MeetingChatStore implementation for PgStorage.

use async_trait::async_trait;
use prepdesk_core::{ChatMessage, MeetingChat, MeetingId};
use sqlx::Row;

use super::{PgStorage, json_column};
use crate::error::StorageError;
use crate::traits::MeetingChatStore;

#[async_trait]
impl MeetingChatStore for PgStorage {
    async fn save_transcript(
        &self,
        meeting_id: MeetingId,
        messages: &[ChatMessage],
    ) -> Result<(), StorageError> {
        let payload = serde_json::to_value(messages)?;
        self.timed(
            "save_transcript",
            sqlx::query(
                "INSERT INTO meeting_ai_chat (meeting_id, messages, updated_at)
                 VALUES ($1, $2, NOW())
                 ON CONFLICT (meeting_id) DO UPDATE SET
                   messages = EXCLUDED.messages,
                   updated_at = NOW()",
            )
            .bind(meeting_id.get())
            .bind(payload)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn get_meeting_chat(
        &self,
        meeting_id: MeetingId,
    ) -> Result<Option<MeetingChat>, StorageError> {
        let row = self
            .timed(
                "get_meeting_chat",
                sqlx::query(
                    "SELECT meeting_id, messages, game_plan, updated_at
                     FROM meeting_ai_chat WHERE meeting_id = $1",
                )
                .bind(meeting_id.get())
                .fetch_optional(&self.pool),
            )
            .await?;
        row.map(|r| -> Result<MeetingChat, StorageError> {
            Ok(MeetingChat {
                meeting_id: MeetingId(r.try_get("meeting_id")?),
                messages: json_column(&r, "messages")?,
                game_plan: r.try_get("game_plan")?,
                updated_at: r.try_get("updated_at")?,
            })
        })
        .transpose()
    }

    async fn save_game_plan(&self, meeting_id: MeetingId, plan: &str) -> Result<(), StorageError> {
        self.timed(
            "save_game_plan",
            sqlx::query(
                "INSERT INTO meeting_ai_chat (meeting_id, game_plan, updated_at)
                 VALUES ($1, $2, NOW())
                 ON CONFLICT (meeting_id) DO UPDATE SET
                   game_plan = EXCLUDED.game_plan,
                   updated_at = NOW()",
            )
            .bind(meeting_id.get())
            .bind(plan)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }
}
