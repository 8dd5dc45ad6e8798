use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use prepdesk_core::{IntakeRequest, Prospect, ProspectId, ResourceCatalog, SalesRep};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{CompleteResourceRequest, RecommendRequest};
use crate::response_types::{CompletionResponse, IntakeResponse, RecommendationResponse};

/// Upsert by email. 201 for a new prospect, 200 when an existing one was updated.
pub async fn submit_intake(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IntakeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IntakeResponse>), ApiError> {
    let Json(request) = payload?;
    let outcome = state.prospect_service.submit_intake(request).await?;
    let status = if outcome.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(IntakeResponse { prospect_id: outcome.prospect.id, created: outcome.created })))
}

pub async fn get_prospect(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Prospect>, ApiError> {
    let id = id.parse::<ProspectId>()?;
    Ok(Json(state.prospect_service.get_prospect(id).await?))
}

pub async fn assign_rep_for_prospect(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SalesRep>, ApiError> {
    let id = id.parse::<ProspectId>()?;
    Ok(Json(state.assignment_service.assign_rep_for_prospect(id).await?))
}

pub async fn assign_rep(State(state): State<Arc<AppState>>) -> Result<Json<SalesRep>, ApiError> {
    Ok(Json(state.assignment_service.assign_rep().await?))
}

pub async fn complete_resource(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompleteResourceRequest>, JsonRejection>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let Json(request) = payload?;
    let outcome = state
        .prospect_service
        .complete_resource(request.prospect_id, request.resource_id)
        .await?;
    Ok(Json(outcome.into()))
}

pub async fn recommend_resources(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let id = id.parse::<ProspectId>()?;
    let Json(request) = payload?;
    let resources = state.prospect_service.recommend_resources(id, request.enriched_data).await?;
    Ok(Json(RecommendationResponse { resources }))
}

pub async fn list_resources(State(state): State<Arc<AppState>>) -> Json<ResourceCatalog> {
    Json(state.prospect_service.catalog().clone())
}
