use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use prepdesk_core::{AdminStats, SalesRep};

use crate::AppState;
use crate::api_error::ApiError;

pub async fn list_sales_reps(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SalesRep>>, ApiError> {
    Ok(Json(state.directory_service.list_sales_reps().await?))
}

pub async fn admin_stats(State(state): State<Arc<AppState>>) -> Result<Json<AdminStats>, ApiError> {
    Ok(Json(state.directory_service.admin_stats().await?))
}
