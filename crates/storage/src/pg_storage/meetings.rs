//! MeetingStore implementation for PgStorage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prepdesk_core::{
    Meeting, MeetingFilter, MeetingId, MeetingStatus, MeetingView, NewMeeting, ProspectId,
    SalesRepId,
};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{PgStorage, json_column, parsed_column};
use crate::error::StorageError;
use crate::traits::MeetingStore;

const MEETING_COLUMNS: &str =
    "id, prospect_id, sales_rep_id, meeting_date, status, created_at, updated_at";

const VIEW_SELECT: &str = "SELECT m.id, m.prospect_id, m.sales_rep_id, m.meeting_date, m.status,
            m.created_at, m.updated_at,
            p.email AS prospect_email, p.country AS prospect_country, p.product_interest,
            p.message AS prospect_message, p.ai_resources, p.resources_completed,
            sr.name AS sales_rep_name, sr.email AS sales_rep_email
     FROM meetings m
     JOIN prospects p ON p.id = m.prospect_id
     JOIN sales_reps sr ON sr.id = m.sales_rep_id";

fn row_to_meeting(row: &PgRow) -> Result<Meeting, StorageError> {
    Ok(Meeting {
        id: MeetingId(row.try_get("id")?),
        prospect_id: ProspectId(row.try_get("prospect_id")?),
        sales_rep_id: SalesRepId(row.try_get("sales_rep_id")?),
        meeting_date: row.try_get("meeting_date")?,
        status: parsed_column(row, "status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn row_to_view(row: &PgRow) -> Result<MeetingView, StorageError> {
    let meeting = row_to_meeting(row)?;
    Ok(MeetingView {
        id: meeting.id,
        prospect_id: meeting.prospect_id,
        sales_rep_id: meeting.sales_rep_id,
        meeting_date: meeting.meeting_date,
        status: meeting.status,
        created_at: meeting.created_at,
        updated_at: meeting.updated_at,
        prospect_email: row.try_get("prospect_email")?,
        prospect_country: row.try_get("prospect_country")?,
        product_interest: parsed_column(row, "product_interest")?,
        prospect_message: row.try_get("prospect_message")?,
        ai_resources: json_column(row, "ai_resources")?,
        resources_completed: json_column(row, "resources_completed")?,
        sales_rep_name: row.try_get("sales_rep_name")?,
        sales_rep_email: row.try_get("sales_rep_email")?,
    })
}

#[async_trait]
impl MeetingStore for PgStorage {
    async fn create_meeting(&self, meeting: &NewMeeting) -> Result<Meeting, StorageError> {
        let row = self
            .timed(
                "create_meeting",
                sqlx::query(&format!(
                    "INSERT INTO meetings (prospect_id, sales_rep_id, meeting_date, status)
                     VALUES ($1, $2, $3, $4) RETURNING {MEETING_COLUMNS}"
                ))
                .bind(meeting.prospect_id.get())
                .bind(meeting.sales_rep_id.get())
                .bind(meeting.meeting_date)
                .bind(MeetingStatus::Scheduled.as_str())
                .fetch_one(&self.pool),
            )
            .await?;
        row_to_meeting(&row)
    }

    async fn list_meetings(
        &self,
        filter: MeetingFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingView>, StorageError> {
        let (clause, id) = match filter {
            MeetingFilter::ByRep(rep) => (
                "AND m.sales_rep_id = $2 ORDER BY m.meeting_date ASC, m.id ASC",
                Some(rep.get()),
            ),
            MeetingFilter::ByProspect(prospect) => (
                "AND m.prospect_id = $2 ORDER BY m.meeting_date DESC, m.id DESC LIMIT 1",
                Some(prospect.get()),
            ),
            MeetingFilter::Upcoming => ("ORDER BY m.meeting_date ASC, m.id ASC", None),
        };
        let sql = format!("{VIEW_SELECT} WHERE m.meeting_date >= $1 {clause}");
        let mut query = sqlx::query(&sql).bind(now);
        if let Some(id) = id {
            query = query.bind(id);
        }
        let rows = self.timed("list_meetings", query.fetch_all(&self.pool)).await?;
        rows.iter().map(row_to_view).collect()
    }

    async fn get_meeting(&self, id: MeetingId) -> Result<Option<MeetingView>, StorageError> {
        let row = self
            .timed(
                "get_meeting",
                sqlx::query(&format!("{VIEW_SELECT} WHERE m.id = $1"))
                    .bind(id.get())
                    .fetch_optional(&self.pool),
            )
            .await?;
        row.map(|r| row_to_view(&r)).transpose()
    }

    async fn update_meeting_status(
        &self,
        id: MeetingId,
        status: MeetingStatus,
    ) -> Result<Option<Meeting>, StorageError> {
        let row = self
            .timed(
                "update_meeting_status",
                sqlx::query(&format!(
                    "UPDATE meetings SET status = $2, updated_at = NOW()
                     WHERE id = $1 RETURNING {MEETING_COLUMNS}"
                ))
                .bind(id.get())
                .bind(status.as_str())
                .fetch_optional(&self.pool),
            )
            .await?;
        row.map(|r| row_to_meeting(&r)).transpose()
    }
}
