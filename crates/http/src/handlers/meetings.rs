use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use prepdesk_core::{BookingRequest, Meeting, MeetingId, MeetingStatus, MeetingView, required_text};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{MeetingListQuery, StatusUpdateRequest};

pub async fn create_meeting(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Meeting>), ApiError> {
    let Json(request) = payload?;
    let meeting = state.meeting_service.create_meeting(request).await?;
    Ok((StatusCode::CREATED, Json(meeting)))
}

/// `?salesRepId=` for a rep's calendar, `?prospectId=` for a prospect's next
/// meeting, neither for everything upcoming.
pub async fn list_meetings(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MeetingListQuery>, QueryRejection>,
) -> Result<Json<Vec<MeetingView>>, ApiError> {
    let Query(query) = query?;
    let meetings = state
        .meeting_service
        .list_meetings(query.sales_rep_id(), query.prospect_id())
        .await?;
    Ok(Json(meetings))
}

pub async fn get_meeting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MeetingView>, ApiError> {
    let id = id.parse::<MeetingId>()?;
    Ok(Json(state.meeting_service.get_meeting(id).await?))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<Meeting>, ApiError> {
    let id = id.parse::<MeetingId>()?;
    let Json(request) = payload?;
    let status = required_text("status", request.status)?.parse::<MeetingStatus>()?;
    Ok(Json(state.meeting_service.update_status(id, status).await?))
}
