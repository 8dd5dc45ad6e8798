//! Schema setup against `DATABASE_URL`.
//!
//! Connecting already applies the idempotent migrations; this command exists
//! so deploys can run them before the server starts.

use anyhow::Result;
use prepdesk_core::ServiceConfig;

pub(crate) async fn run(config: &ServiceConfig) -> Result<()> {
    let storage = crate::open_storage(config, false).await?;
    storage.close().await;
    println!("migrations applied");
    Ok(())
}
