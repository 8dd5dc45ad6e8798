use serde::{Deserialize, Serialize};

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_meetings: i64,
    /// Scheduled meetings whose date has not passed.
    pub upcoming_meetings: i64,
    pub completed_meetings: i64,
    pub total_prospects: i64,
}
