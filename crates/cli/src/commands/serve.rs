use std::sync::Arc;

use anyhow::Result;
use prepdesk_core::{DEFAULT_PORT, ResourceCatalog, ServiceConfig, env_parse_with_default};
use prepdesk_http::{AppState, create_router, shutdown_signal};
use prepdesk_llm::{LlmClient, SalesAssistant};
use prepdesk_service::{
    AssignmentService, DirectoryService, EnrichmentNotifier, EventService, GamePlanService,
    MeetingService, ProspectService,
};

pub(crate) async fn run(
    config: ServiceConfig,
    host: String,
    port: Option<u16>,
    in_memory: bool,
) -> Result<()> {
    tracing::debug!(?config, "configuration loaded");
    let storage = Arc::new(crate::open_storage(&config, in_memory).await?);

    let catalog = match &config.resource_catalog {
        Some(path) => ResourceCatalog::from_path(path)?,
        None => ResourceCatalog::bundled()?,
    };
    tracing::info!(resources = catalog.resources().len(), "resource catalog loaded");

    let assistant: Option<Arc<dyn SalesAssistant>> = match config.llm_api_key.clone() {
        Some(key) => {
            let client = LlmClient::new(key, &config.llm_api_url, config.llm_model.clone())?;
            tracing::info!(model = %client.model(), url = %client.base_url(), "LLM client ready");
            Some(Arc::new(client) as Arc<dyn SalesAssistant>)
        },
        None => {
            tracing::warn!("PREPDESK_LLM_API_KEY not set, game plans and recommendations disabled");
            None
        },
    };

    let notifier = match config.webhook_url.clone() {
        Some(url) => EnrichmentNotifier::new(url, config.webhook_token.clone()),
        None => {
            tracing::info!("ENRICHMENT_WEBHOOK_URL not set, enrichment webhook disabled");
            None
        },
    };

    let state = Arc::new(AppState {
        prospect_service: Arc::new(ProspectService::new(
            Arc::clone(&storage),
            Arc::new(catalog),
            assistant.clone(),
            notifier,
        )),
        assignment_service: Arc::new(AssignmentService::new(Arc::clone(&storage))),
        meeting_service: Arc::new(MeetingService::new(Arc::clone(&storage))),
        game_plan_service: Arc::new(GamePlanService::new(Arc::clone(&storage), assistant)),
        event_service: Arc::new(EventService::new(Arc::clone(&storage))),
        directory_service: Arc::new(DirectoryService::new(Arc::clone(&storage))),
    });

    let router = create_router(state);
    let port = port.unwrap_or_else(|| env_parse_with_default("PREPDESK_PORT", DEFAULT_PORT));
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, backend = storage.kind(), "Starting HTTP server");
    let served = axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await;

    storage.close().await;
    tracing::info!("store closed");
    served?;
    Ok(())
}
