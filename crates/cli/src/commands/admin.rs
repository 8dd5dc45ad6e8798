//! Roster and reporting commands. Output is pretty JSON on stdout.

use std::sync::Arc;

use anyhow::Result;
use prepdesk_core::ServiceConfig;
use prepdesk_service::DirectoryService;
use prepdesk_storage::StorageBackend;

/// The store is closed by each caller once its single query is done.
async fn directory(config: &ServiceConfig) -> Result<(Arc<StorageBackend>, DirectoryService)> {
    let storage = Arc::new(crate::open_storage(config, false).await?);
    let service = DirectoryService::new(Arc::clone(&storage));
    Ok((storage, service))
}

pub(crate) async fn seed_rep(config: &ServiceConfig, name: String, email: String) -> Result<()> {
    let (storage, service) = directory(config).await?;
    let result = service.add_sales_rep(Some(name), Some(email)).await;
    storage.close().await;
    let rep = result?;
    tracing::info!(rep_id = %rep.id, email = %rep.email, "sales rep added");
    println!("{}", serde_json::to_string_pretty(&rep)?);
    Ok(())
}

pub(crate) async fn list_reps(config: &ServiceConfig) -> Result<()> {
    let (storage, service) = directory(config).await?;
    let result = service.list_sales_reps().await;
    storage.close().await;
    println!("{}", serde_json::to_string_pretty(&result?)?);
    Ok(())
}

pub(crate) async fn stats(config: &ServiceConfig) -> Result<()> {
    let (storage, service) = directory(config).await?;
    let result = service.admin_stats().await;
    storage.close().await;
    println!("{}", serde_json::to_string_pretty(&result?)?);
    Ok(())
}
