use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::ids::{MeetingId, ProspectId, SalesRepId};
use crate::prospect::{FormSubmission, ProductInterest};

/// Lifecycle of a booked meeting.
///
/// Nothing in the service moves a meeting out of `Scheduled` on its own;
/// transitions come from an operator through `update_status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl MeetingStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Scheduled)
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "no_show" | "no-show" => Ok(Self::NoShow),
            other => Err(CoreError::UnknownVariant {
                kind: "meeting status",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meeting {
    pub id: MeetingId,
    pub prospect_id: ProspectId,
    pub sales_rep_id: SalesRepId,
    pub meeting_date: DateTime<Utc>,
    pub status: MeetingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    /// Scheduled and not yet in the past relative to `now`.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == MeetingStatus::Scheduled && self.meeting_date >= now
    }
}

/// A validated booking, ready to insert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewMeeting {
    pub prospect_id: ProspectId,
    pub sales_rep_id: SalesRepId,
    pub meeting_date: DateTime<Utc>,
}

/// Raw booking payload as sent by the calendar widget.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub prospect_id: Option<ProspectId>,
    pub sales_rep_id: Option<SalesRepId>,
    pub meeting_date: Option<DateTime<Utc>>,
}

impl BookingRequest {
    pub fn validate(self) -> Result<NewMeeting> {
        Ok(NewMeeting {
            prospect_id: self.prospect_id.ok_or(CoreError::MissingField("prospectId"))?,
            sales_rep_id: self.sales_rep_id.ok_or(CoreError::MissingField("salesRepId"))?,
            meeting_date: self.meeting_date.ok_or(CoreError::MissingField("meetingDate"))?,
        })
    }
}

/// Which slice of the ledger to list. Only future meetings are ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingFilter {
    /// Every future meeting of one rep, soonest first.
    ByRep(SalesRepId),
    /// The single latest future meeting of one prospect.
    ByProspect(ProspectId),
    /// Every future meeting, soonest first.
    Upcoming,
}

impl MeetingFilter {
    /// Build a filter from optional query parameters. Both set is rejected.
    pub fn from_params(
        sales_rep_id: Option<SalesRepId>,
        prospect_id: Option<ProspectId>,
    ) -> Result<Self> {
        match (sales_rep_id, prospect_id) {
            (Some(_), Some(_)) => Err(CoreError::InvalidField {
                field: "filter",
                reason: "salesRepId and prospectId are mutually exclusive".to_owned(),
            }),
            (Some(rep), None) => Ok(Self::ByRep(rep)),
            (None, Some(p)) => Ok(Self::ByProspect(p)),
            (None, None) => Ok(Self::Upcoming),
        }
    }
}

/// Meeting joined with its prospect and rep, as shown on dashboards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetingView {
    pub id: MeetingId,
    pub prospect_id: ProspectId,
    pub sales_rep_id: SalesRepId,
    pub meeting_date: DateTime<Utc>,
    pub status: MeetingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub prospect_email: String,
    pub prospect_country: String,
    pub product_interest: ProductInterest,
    pub prospect_message: Option<String>,
    pub ai_resources: Vec<String>,
    pub resources_completed: Vec<String>,
    pub sales_rep_name: String,
    pub sales_rep_email: String,
}

impl MeetingView {
    #[must_use]
    pub fn submission(&self) -> FormSubmission {
        FormSubmission {
            email: self.prospect_email.clone(),
            country: self.prospect_country.clone(),
            product_interest: self.product_interest,
            message: self.prospect_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn booking_requires_every_field() {
        let full = BookingRequest {
            prospect_id: Some(ProspectId(1)),
            sales_rep_id: Some(SalesRepId(2)),
            meeting_date: Some(Utc::now()),
        };
        assert!(full.validate().is_ok());

        let mut missing = full;
        missing.prospect_id = None;
        assert_eq!(missing.validate().unwrap_err(), CoreError::MissingField("prospectId"));

        let mut missing = full;
        missing.sales_rep_id = None;
        assert_eq!(missing.validate().unwrap_err(), CoreError::MissingField("salesRepId"));

        let mut missing = full;
        missing.meeting_date = None;
        assert_eq!(missing.validate().unwrap_err(), CoreError::MissingField("meetingDate"));
    }

    #[test]
    fn booking_request_reads_camel_case() {
        let req: BookingRequest = serde_json::from_str(
            r#"{"prospectId": 1, "salesRepId": 2, "meetingDate": "2030-01-02T10:00:00Z"}"#,
        )
        .unwrap();
        let m = req.validate().unwrap();
        assert_eq!(m.prospect_id, ProspectId(1));
        assert_eq!(m.sales_rep_id, SalesRepId(2));
    }

    #[test]
    fn filter_modes_are_exclusive() {
        assert_eq!(MeetingFilter::from_params(None, None).unwrap(), MeetingFilter::Upcoming);
        assert_eq!(
            MeetingFilter::from_params(Some(SalesRepId(1)), None).unwrap(),
            MeetingFilter::ByRep(SalesRepId(1))
        );
        assert!(MeetingFilter::from_params(Some(SalesRepId(1)), Some(ProspectId(1))).is_err());
    }

    #[test]
    fn upcoming_needs_scheduled_and_future() {
        let now = Utc::now();
        let mut m = Meeting {
            id: MeetingId(1),
            prospect_id: ProspectId(1),
            sales_rep_id: SalesRepId(1),
            meeting_date: now + Duration::hours(1),
            status: MeetingStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };
        assert!(m.is_upcoming(now));
        m.status = MeetingStatus::Cancelled;
        assert!(!m.is_upcoming(now));
        m.status = MeetingStatus::Scheduled;
        m.meeting_date = now - Duration::minutes(1);
        assert!(!m.is_upcoming(now));
    }

    #[test]
    fn status_strings() {
        assert_eq!(MeetingStatus::NoShow.as_str(), "no_show");
        assert_eq!("no_show".parse::<MeetingStatus>().unwrap(), MeetingStatus::NoShow);
        assert!(MeetingStatus::Completed.is_terminal());
        assert!(!MeetingStatus::default().is_terminal());
        assert!("rescheduled".parse::<MeetingStatus>().is_err());
    }
}
