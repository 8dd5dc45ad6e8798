use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use prepdesk_core::MeetingId;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::TranscriptRequest;
use crate::response_types::{GamePlanResponse, TranscriptResponse};

/// Replace the transcript of a meeting. Last writer wins.
pub async fn save_transcript(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let Json(request) = payload?;
    let meeting_id = request
        .meeting_id
        .ok_or_else(|| ApiError::BadRequest("missing required field: meetingId".to_owned()))?;
    let messages = request.messages.unwrap_or_default();
    state.game_plan_service.append_transcript(meeting_id, messages.clone()).await?;
    Ok(Json(TranscriptResponse { meeting_id, messages }))
}

pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let meeting_id = id.parse::<MeetingId>()?;
    let messages = state.game_plan_service.get_transcript(meeting_id).await?;
    Ok(Json(TranscriptResponse { meeting_id, messages }))
}

/// Cached plan if there is one, otherwise generated on the spot.
pub async fn get_game_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GamePlanResponse>, ApiError> {
    let meeting_id = id.parse::<MeetingId>()?;
    let plan = state.game_plan_service.get_game_plan(meeting_id, false).await?;
    Ok(Json(plan.into()))
}

pub async fn regenerate_game_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GamePlanResponse>, ApiError> {
    let meeting_id = id.parse::<MeetingId>()?;
    let plan = state.game_plan_service.get_game_plan(meeting_id, true).await?;
    Ok(Json(plan.into()))
}
