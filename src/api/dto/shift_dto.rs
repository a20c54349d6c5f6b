//! Shift-related DTOs for create, get, update, and list operations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PageMeta;
use crate::domain::ShiftForm;
use crate::domain::shift::Shift;
use crate::domain::time::extract_time_string;

/// Request body for `POST /shifts`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateShiftRequest {
    /// Calendar date the shift started on.
    pub shift_date: NaiveDate,
    /// Start time-of-day, 24-hour `"HH:MM"`.
    pub shift_start_time: String,
    /// End time-of-day, 24-hour `"HH:MM"`. Earlier than the start means the
    /// shift ends on the next calendar day.
    pub shift_end_time: String,
    /// Tips earned; defaults to 0 when omitted.
    #[serde(default)]
    pub tips: Option<i32>,
}

impl From<CreateShiftRequest> for ShiftForm {
    fn from(req: CreateShiftRequest) -> Self {
        Self {
            shift_date: req.shift_date,
            shift_start_time: req.shift_start_time,
            shift_end_time: req.shift_end_time,
            tips: req.tips,
        }
    }
}

/// Request body for `PUT /shifts/:id` — a whole-record replace of the
/// start/end/tips fields.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateShiftRequest {
    /// Calendar date the shift started on.
    pub shift_date: NaiveDate,
    /// Start time-of-day, 24-hour `"HH:MM"`.
    pub shift_start_time: String,
    /// End time-of-day, 24-hour `"HH:MM"`.
    pub shift_end_time: String,
    /// Tips earned; defaults to 0 when omitted.
    #[serde(default)]
    pub tips: Option<i32>,
}

impl From<UpdateShiftRequest> for ShiftForm {
    fn from(req: UpdateShiftRequest) -> Self {
        Self {
            shift_date: req.shift_date,
            shift_start_time: req.shift_start_time,
            shift_end_time: req.shift_end_time,
            tips: req.tips,
        }
    }
}

/// A stored shift as returned by the API.
///
/// Carries the `"HH:MM"` projections of both timestamps so edit forms can
/// be pre-filled without re-deriving them client-side.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShiftDto {
    /// Shift identifier.
    pub id: i64,
    /// When the shift began (wall-clock).
    pub shift_start: NaiveDateTime,
    /// When the shift ended (wall-clock).
    pub shift_end: NaiveDateTime,
    /// Start time-of-day as `"HH:MM"`.
    pub shift_start_time: String,
    /// End time-of-day as `"HH:MM"`.
    pub shift_end_time: String,
    /// Tips earned over the shift.
    pub tips: i32,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Shift> for ShiftDto {
    fn from(shift: Shift) -> Self {
        Self {
            id: shift.id,
            shift_start_time: extract_time_string(shift.shift_start),
            shift_end_time: extract_time_string(shift.shift_end),
            shift_start: shift.shift_start,
            shift_end: shift.shift_end,
            tips: shift.tips,
            created_at: shift.created_at,
            updated_at: shift.updated_at,
        }
    }
}

/// Query parameters for `GET /shifts`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ShiftListParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// When set, returns all shifts with at least this many tips instead of
    /// a paginated listing.
    #[serde(default)]
    pub min_tips: Option<i32>,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl ShiftListParams {
    /// Clamps `per_page` to the allowed maximum of 100.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
            min_tips: self.min_tips,
        }
    }
}

/// Query parameters for `GET /shifts/recent`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RecentParams {
    /// Number of shifts to return. Defaults to the configured dashboard
    /// limit.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Paginated list response for `GET /shifts`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShiftListResponse {
    /// Shifts in this page.
    pub data: Vec<ShiftDto>,
    /// Page metadata.
    pub pagination: PageMeta,
}
