//! Response types (Serialize)

use prepdesk_core::{ChatMessage, CompletionOutcome, Event, EventId, MeetingId, ProspectId};
use prepdesk_service::{GamePlan, PlanSource};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    pub prospect_id: ProspectId,
    pub created: bool,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub message: &'static str,
    pub outcome: CompletionOutcome,
}

impl From<CompletionOutcome> for CompletionResponse {
    fn from(outcome: CompletionOutcome) -> Self {
        let message = match outcome {
            CompletionOutcome::Completed => "Resource completed",
            CompletionOutcome::AlreadyCompleted => "Resource already completed",
        };
        Self { message, outcome }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub meeting_id: MeetingId,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlanResponse {
    pub meeting_id: MeetingId,
    pub game_plan: String,
    pub cached: bool,
}

impl From<GamePlan> for GamePlanResponse {
    fn from(plan: GamePlan) -> Self {
        Self {
            meeting_id: plan.meeting_id,
            cached: plan.source == PlanSource::Cached,
            game_plan: plan.markdown,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub resources: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EventCreatedResponse {
    pub success: bool,
    pub id: EventId,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}
