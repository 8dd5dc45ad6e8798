use async_trait::async_trait;
use prepdesk_core::{NewSalesRep, RepLoad, SalesRep};

use crate::error::StorageError;

/// The sales rep roster.
#[async_trait]
pub trait SalesRepStore: Send + Sync {
    /// Add a rep. A known email yields `Duplicate`.
    async fn add_sales_rep(&self, rep: &NewSalesRep) -> Result<SalesRep, StorageError>;

    /// All reps ordered by name.
    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>, StorageError>;

    /// The rep with the fewest meetings of any status, ties broken by lowest id.
    /// `None` when the roster is empty.
    async fn least_loaded_rep(&self) -> Result<Option<RepLoad>, StorageError>;
}
