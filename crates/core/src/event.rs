//! Append-only analytics events.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, required_text};
use crate::ids::{EventId, ProspectId, SalesRepId};

/// Who an event is about.
///
/// Not a foreign key: events may arrive before a visitor is identified, so
/// anything that is not a known prospect or rep id is kept as `Unknown`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EventUser {
    Prospect(ProspectId),
    SalesRep(SalesRepId),
    Unknown(String),
}

impl EventUser {
    /// Value stored in the `user_kind` column.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match *self {
            Self::Prospect(_) => "prospect",
            Self::SalesRep(_) => "sales_rep",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Value stored in the `user_id` column.
    #[must_use]
    pub fn raw_id(&self) -> String {
        match self {
            Self::Prospect(id) => id.to_string(),
            Self::SalesRep(id) => id.to_string(),
            Self::Unknown(raw) => raw.clone(),
        }
    }

    /// Rebuild from the two stored columns.
    ///
    /// A typed kind whose id does not parse degrades to `Unknown` instead of
    /// failing, so one odd row never poisons a listing.
    #[must_use]
    pub fn from_parts(kind: &str, raw_id: &str) -> Self {
        match kind {
            "prospect" => raw_id
                .parse::<ProspectId>()
                .map_or_else(|_| Self::Unknown(raw_id.to_owned()), Self::Prospect),
            "sales_rep" => raw_id
                .parse::<SalesRepId>()
                .map_or_else(|_| Self::Unknown(raw_id.to_owned()), Self::SalesRep),
            _ => Self::Unknown(raw_id.to_owned()),
        }
    }

    /// Strict parse used on the request path: an explicit typed kind must carry a numeric id.
    pub fn parse(kind: Option<&str>, raw_id: &str) -> Result<Self> {
        let raw_id = raw_id.trim();
        if raw_id.is_empty() {
            return Err(CoreError::MissingField("user_id"));
        }
        match kind.map(str::trim).filter(|k| !k.is_empty()) {
            None | Some("unknown") => Ok(Self::Unknown(raw_id.to_owned())),
            Some("prospect") => Ok(Self::Prospect(ProspectId::from_str(raw_id)?)),
            Some("sales_rep") => Ok(Self::SalesRep(SalesRepId::from_str(raw_id)?)),
            Some(other) => Err(CoreError::UnknownVariant {
                kind: "event user kind",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub user: EventUser,
    pub event_type: String,
    pub event_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewEvent {
    pub user: EventUser,
    pub event_type: String,
    pub event_name: String,
}

impl NewEvent {
    pub fn new(user: EventUser, event_type: Option<String>, event_name: Option<String>) -> Result<Self> {
        Ok(Self {
            user,
            event_type: required_text("event_type", event_type)?,
            event_name: required_text("event_name", event_name)?,
        })
    }
}

/// Listing filter. `None` fields match anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub user: EventUser,
    pub event_type: Option<String>,
    pub event_name: Option<String>,
}

impl EventQuery {
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        event.user == self.user
            && self.event_type.as_ref().is_none_or(|t| *t == event.event_type)
            && self.event_name.as_ref().is_none_or(|n| *n == event.event_name)
    }
}
