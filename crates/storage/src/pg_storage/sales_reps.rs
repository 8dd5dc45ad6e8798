//! SalesRepStore implementation for PgStorage.

use async_trait::async_trait;
use prepdesk_core::{NewSalesRep, RepLoad, SalesRep, SalesRepId};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::SalesRepStore;

const REP_COLUMNS: &str = "id, name, email, created_at";

fn row_to_rep(row: &PgRow) -> Result<SalesRep, StorageError> {
    Ok(SalesRep {
        id: SalesRepId(row.try_get("id")?),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl SalesRepStore for PgStorage {
    async fn add_sales_rep(&self, rep: &NewSalesRep) -> Result<SalesRep, StorageError> {
        let row = self
            .timed(
                "add_sales_rep",
                sqlx::query(&format!(
                    "INSERT INTO sales_reps (name, email) VALUES ($1, $2) RETURNING {REP_COLUMNS}"
                ))
                .bind(&rep.name)
                .bind(&rep.email)
                .fetch_one(&self.pool),
            )
            .await?;
        row_to_rep(&row)
    }

    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>, StorageError> {
        let rows = self
            .timed(
                "list_sales_reps",
                sqlx::query(&format!("SELECT {REP_COLUMNS} FROM sales_reps ORDER BY name ASC, id ASC"))
                    .fetch_all(&self.pool),
            )
            .await?;
        rows.iter().map(row_to_rep).collect()
    }

    async fn least_loaded_rep(&self) -> Result<Option<RepLoad>, StorageError> {
        let row = self
            .timed(
                "least_loaded_rep",
                sqlx::query(
                    "SELECT sr.id, sr.name, sr.email, sr.created_at, COUNT(m.id) AS meeting_count
                     FROM sales_reps sr
                     LEFT JOIN meetings m ON m.sales_rep_id = sr.id
                     GROUP BY sr.id
                     ORDER BY meeting_count ASC, sr.id ASC
                     LIMIT 1",
                )
                .fetch_optional(&self.pool),
            )
            .await?;
        row.map(|r| -> Result<RepLoad, StorageError> {
            Ok(RepLoad { rep: row_to_rep(&r)?, meeting_count: r.try_get("meeting_count")? })
        })
        .transpose()
    }
}
