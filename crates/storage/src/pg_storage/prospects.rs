//! ProspectStore implementation for PgStorage.

use async_trait::async_trait;
use prepdesk_core::{CompletionOutcome, FormSubmission, IntakeOutcome, Prospect, ProspectId};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{PgStorage, json_column, parsed_column};
use crate::error::StorageError;
use crate::traits::ProspectStore;

pub(crate) const PROSPECT_COLUMNS: &str = "id, email, country, product_interest, message, \
     ai_resources, resources_completed, created_at, updated_at";

pub(crate) fn row_to_prospect(row: &PgRow) -> Result<Prospect, StorageError> {
    Ok(Prospect {
        id: ProspectId(row.try_get("id")?),
        email: row.try_get("email")?,
        country: row.try_get("country")?,
        product_interest: parsed_column(row, "product_interest")?,
        message: row.try_get("message")?,
        ai_resources: json_column(row, "ai_resources")?,
        resources_completed: json_column(row, "resources_completed")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl ProspectStore for PgStorage {
    async fn upsert_prospect(
        &self,
        submission: &FormSubmission,
    ) -> Result<IntakeOutcome, StorageError> {
        let row = self
            .timed(
                "upsert_prospect",
                sqlx::query(&format!(
                    "INSERT INTO prospects (email, country, product_interest, message)
                     VALUES ($1, $2, $3, $4)
                     ON CONFLICT (email) DO UPDATE SET
                       country = EXCLUDED.country,
                       product_interest = EXCLUDED.product_interest,
                       message = EXCLUDED.message,
                       updated_at = NOW()
                     RETURNING {PROSPECT_COLUMNS}, (xmax = 0) AS inserted"
                ))
                .bind(&submission.email)
                .bind(&submission.country)
                .bind(submission.product_interest.as_str())
                .bind(&submission.message)
                .fetch_one(&self.pool),
            )
            .await?;
        let created: bool = row.try_get("inserted")?;
        Ok(IntakeOutcome { prospect: row_to_prospect(&row)?, created })
    }

    async fn get_prospect(&self, id: ProspectId) -> Result<Option<Prospect>, StorageError> {
        let row = self
            .timed(
                "get_prospect",
                sqlx::query(&format!("SELECT {PROSPECT_COLUMNS} FROM prospects WHERE id = $1"))
                    .bind(id.get())
                    .fetch_optional(&self.pool),
            )
            .await?;
        row.map(|r| row_to_prospect(&r)).transpose()
    }

    async fn complete_resource(
        &self,
        id: ProspectId,
        resource_id: &str,
    ) -> Result<CompletionOutcome, StorageError> {
        // The membership test sits in the UPDATE's own WHERE clause so a
        // concurrent writer holding the row lock is re-checked after it commits.
        let row = self
            .timed(
                "complete_resource",
                sqlx::query(
                    "WITH appended AS (
                       UPDATE prospects
                       SET resources_completed = resources_completed || jsonb_build_array($2::text),
                           updated_at = NOW()
                       WHERE id = $1 AND NOT (resources_completed ? $2)
                       RETURNING id
                     )
                     SELECT EXISTS (SELECT 1 FROM appended) AS appended,
                            EXISTS (SELECT 1 FROM prospects WHERE id = $1) AS known",
                )
                .bind(id.get())
                .bind(resource_id)
                .fetch_one(&self.pool),
            )
            .await?;
        let appended: bool = row.try_get("appended")?;
        let known: bool = row.try_get("known")?;
        match (appended, known) {
            (true, _) => Ok(CompletionOutcome::Completed),
            (false, true) => Ok(CompletionOutcome::AlreadyCompleted),
            (false, false) => Err(StorageError::not_found("prospect", id)),
        }
    }

    async fn set_ai_resources(
        &self,
        id: ProspectId,
        resources: &[String],
    ) -> Result<Prospect, StorageError> {
        let row = self
            .timed(
                "set_ai_resources",
                sqlx::query(&format!(
                    "UPDATE prospects SET ai_resources = $2, updated_at = NOW()
                     WHERE id = $1 RETURNING {PROSPECT_COLUMNS}"
                ))
                .bind(id.get())
                .bind(serde_json::to_value(resources)?)
                .fetch_optional(&self.pool),
            )
            .await?;
        match row {
            Some(r) => row_to_prospect(&r),
            None => Err(StorageError::not_found("prospect", id)),
        }
    }
}
