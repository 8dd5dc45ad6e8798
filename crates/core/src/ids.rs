//! Newtype identifiers for persisted entities.
//!
//! All ids are database-generated `BIGSERIAL` values. Wrapping them keeps a
//! `MeetingId` from being passed where a `ProspectId` is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self).map_err(|e| CoreError::InvalidField {
                    field: $label,
                    reason: e.to_string(),
                })
            }
        }

        impl From<i64> for $name {
            fn from(v: i64) -> Self {
                Self(v)
            }
        }
    };
}

entity_id!(
    /// Primary key of a row in `prospects`.
    ProspectId,
    "prospect id"
);
entity_id!(
    /// Primary key of a row in `sales_reps`.
    SalesRepId,
    "sales rep id"
);
entity_id!(
    /// Primary key of a row in `meetings`.
    MeetingId,
    "meeting id"
);
entity_id!(
    /// Primary key of a row in `events`.
    EventId,
    "event id"
);
