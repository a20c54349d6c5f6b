//! DTOs for the summary and chart-series endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::shift::SummaryStats;

/// Optional date-range bounds shared by the summary and range endpoints.
///
/// Both bounds must be supplied together or both omitted.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RangeParams {
    /// Inclusive lower bound on `shift_start` (e.g. `2024-01-01T00:00:00`).
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    /// Inclusive upper bound on `shift_end`.
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
}

/// Response body for `GET /summary`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryResponse {
    /// Sum of tips across the set.
    pub total_tips: i64,
    /// Number of shifts in the set.
    pub total_shifts: i64,
    /// Earliest shift start, `null` when the set is empty.
    pub first_shift: Option<NaiveDateTime>,
    /// Latest shift end, `null` when the set is empty.
    pub last_shift: Option<NaiveDateTime>,
}

impl From<SummaryStats> for SummaryResponse {
    fn from(stats: SummaryStats) -> Self {
        Self {
            total_tips: stats.total_tips,
            total_shifts: stats.total_shifts,
            first_shift: stats.first_shift,
            last_shift: stats.last_shift,
        }
    }
}
