use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use prepdesk_core::EventUser;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{EventListQuery, RecordEventRequest};
use crate::response_types::{EventCreatedResponse, EventsResponse};

pub async fn record_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecordEventRequest>, JsonRejection>,
) -> Result<Json<EventCreatedResponse>, ApiError> {
    let Json(request) = payload?;
    let user = request.user()?;
    let id = state
        .event_service
        .record_event(user, request.event_type, request.event_name)
        .await?;
    Ok(Json(EventCreatedResponse { success: true, id }))
}

/// `kind` is `prospect`, `sales_rep` or `unknown`. Rows come back in storage
/// order; callers sort.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Path((kind, user_id)): Path<(String, String)>,
    query: Result<Query<EventListQuery>, QueryRejection>,
) -> Result<Json<EventsResponse>, ApiError> {
    let user = EventUser::parse(Some(&kind), &user_id)?;
    let Query(query) = query?;
    let events = state
        .event_service
        .list_events(user, query.event_type, query.event_name)
        .await?;
    Ok(Json(EventsResponse { events }))
}
