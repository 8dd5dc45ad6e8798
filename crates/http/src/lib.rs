//! HTTP API server for prepdesk.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};

use prepdesk_service::{
    AssignmentService, DirectoryService, EventService, GamePlanService, MeetingService,
    ProspectService,
};

pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
///
/// Every service holds the same `Arc<StorageBackend>`; the state itself is
/// wrapped in `Arc` and cloned per request by axum.
pub struct AppState {
    /// Intake, recommendations and resource completion
    pub prospect_service: Arc<ProspectService>,
    /// Least-loaded rep selection
    pub assignment_service: Arc<AssignmentService>,
    /// The meeting ledger
    pub meeting_service: Arc<MeetingService>,
    /// Transcripts and game plans
    pub game_plan_service: Arc<GamePlanService>,
    pub event_service: Arc<EventService>,
    /// Rep roster and admin counters
    pub directory_service: Arc<DirectoryService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/prospects", post(handlers::prospects::submit_intake))
        .route("/api/prospects/get-rep", post(handlers::prospects::assign_rep))
        .route("/api/prospects/complete-resource", post(handlers::prospects::complete_resource))
        .route("/api/prospects/{id}", get(handlers::prospects::get_prospect))
        .route("/api/prospects/{id}/assign-rep", get(handlers::prospects::assign_rep_for_prospect))
        .route("/api/resources", get(handlers::prospects::list_resources))
        .route("/api/resources-ai/{id}", post(handlers::prospects::recommend_resources))
        .route("/api/sales-reps", get(handlers::admin::list_sales_reps))
        .route(
            "/api/meetings",
            get(handlers::meetings::list_meetings).post(handlers::meetings::create_meeting),
        )
        .route("/api/meetings/{id}", get(handlers::meetings::get_meeting))
        .route("/api/meetings/{id}/status", put(handlers::meetings::update_status))
        .route("/api/meeting-chat", post(handlers::meeting_chat::save_transcript))
        .route("/api/meeting-chat/{id}", get(handlers::meeting_chat::get_transcript))
        .route(
            "/api/game-plan/{id}",
            get(handlers::meeting_chat::get_game_plan)
                .post(handlers::meeting_chat::regenerate_game_plan),
        )
        .route("/api/events", post(handlers::events::record_event))
        .route("/api/events/{kind}/{user_id}", get(handlers::events::list_events))
        .route("/api/admin/stats", get(handlers::admin::admin_stats))
        .layer(cors)
        .with_state(state)
}

/// Resolves on Ctrl-C or SIGTERM. Pass to `axum::serve(..).with_graceful_shutdown`.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
