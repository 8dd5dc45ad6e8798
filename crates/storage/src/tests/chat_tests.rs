use prepdesk_core::{ChatMessage, ChatRole, MeetingId};

use super::{book, create_test_storage, in_days, seed_prospect, seed_rep};
use crate::StorageError;
use crate::traits::MeetingChatStore;

#[tokio::test]
async fn transcript_is_replaced_and_plan_survives() {
    let storage = create_test_storage();
    let prospect = seed_prospect(&storage, "p@example.com").await;
    let rep = seed_rep(&storage, "Alice").await;
    let meeting = book(&storage, &prospect, &rep, in_days(1)).await;

    storage
        .save_transcript(meeting.id, &[ChatMessage::new(ChatRole::User, "hi")])
        .await
        .unwrap();
    storage.save_game_plan(meeting.id, "## Plan").await.unwrap();
    let replacement = vec![
        ChatMessage::new(ChatRole::User, "hello again"),
        ChatMessage::new(ChatRole::Assistant, "welcome back"),
    ];
    storage.save_transcript(meeting.id, &replacement).await.unwrap();

    let chat = storage.get_meeting_chat(meeting.id).await.unwrap().unwrap();
    assert_eq!(chat.messages, replacement);
    assert_eq!(chat.game_plan.as_deref(), Some("## Plan"));
}

#[tokio::test]
async fn game_plan_can_precede_any_transcript() {
    let storage = create_test_storage();
    let prospect = seed_prospect(&storage, "p@example.com").await;
    let rep = seed_rep(&storage, "Alice").await;
    let meeting = book(&storage, &prospect, &rep, in_days(1)).await;

    storage.save_game_plan(meeting.id, "plan").await.unwrap();
    let chat = storage.get_meeting_chat(meeting.id).await.unwrap().unwrap();
    assert!(chat.messages.is_empty());
}

#[tokio::test]
async fn unknown_meeting_is_rejected() {
    let storage = create_test_storage();
    let err = storage.save_transcript(MeetingId(77), &[]).await.unwrap_err();
    assert!(matches!(err, StorageError::ForeignKey(_)));
    assert!(storage.get_meeting_chat(MeetingId(77)).await.unwrap().is_none());
}
