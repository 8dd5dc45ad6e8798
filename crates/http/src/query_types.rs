//! Request/query types (Deserialize)
//!
//! Every field is optional so a missing value reaches the service layer and
//! comes back as a validation error instead of an extractor rejection.

use prepdesk_core::{ChatMessage, EventUser, MeetingId, ProspectId, SalesRepId};
use serde::{Deserialize, Deserializer};

/// Query ids where `?salesRepId=` counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingListQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sales_rep_id: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub prospect_id: Option<i64>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl MeetingListQuery {
    pub fn sales_rep_id(&self) -> Option<SalesRepId> {
        self.sales_rep_id.map(SalesRepId)
    }

    pub fn prospect_id(&self) -> Option<ProspectId> {
        self.prospect_id.map(ProspectId)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteResourceRequest {
    #[serde(alias = "prospect_id")]
    pub prospect_id: Option<ProspectId>,
    #[serde(alias = "resource_id")]
    pub resource_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRequest {
    #[serde(alias = "meeting_id")]
    pub meeting_id: Option<MeetingId>,
    pub messages: Option<Vec<ChatMessage>>,
}

/// Body of `POST /api/resources-ai/{id}`. The stored prospect supplies the
/// form answers, so only the enrichment blob is read.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default, alias = "enriched_data")]
    pub enriched_data: serde_json::Value,
}

/// Event user ids arrive as numbers from the app and as strings from trackers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawUserId {
    Number(i64),
    Text(String),
}

impl RawUserId {
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordEventRequest {
    pub user_kind: Option<String>,
    pub user_id: Option<RawUserId>,
    pub event_type: Option<String>,
    pub event_name: Option<String>,
}

impl RecordEventRequest {
    pub fn user(&self) -> prepdesk_core::Result<EventUser> {
        let raw = self.user_id.as_ref().map(RawUserId::as_text).unwrap_or_default();
        EventUser::parse(self.user_kind.as_deref(), &raw)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EventListQuery {
    pub event_type: Option<String>,
    pub event_name: Option<String>,
}
