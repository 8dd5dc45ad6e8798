use std::sync::Arc;

use chrono::Utc;
use prepdesk_core::{AdminStats, NewSalesRep, SalesRep};
use prepdesk_storage::StorageBackend;
use prepdesk_storage::traits::{SalesRepStore, StatsStore};

use crate::ServiceError;

/// Sales rep roster and dashboard counters.
pub struct DirectoryService {
    storage: Arc<StorageBackend>,
}

impl DirectoryService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn list_sales_reps(&self) -> Result<Vec<SalesRep>, ServiceError> {
        Ok(self.storage.list_sales_reps().await?)
    }

    pub async fn add_sales_rep(
        &self,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<SalesRep, ServiceError> {
        let rep = NewSalesRep::new(name, email)?;
        let stored = self.storage.add_sales_rep(&rep).await?;
        tracing::info!(rep_id = %stored.id, email = %stored.email, "sales rep added");
        Ok(stored)
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, ServiceError> {
        Ok(self.storage.admin_stats(Utc::now()).await?)
    }
}
