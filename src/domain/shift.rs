//! Shift entity and the value objects that move through the repository.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded work session: a start time, an end time, and tips earned.
///
/// Shift times are wall-clock timestamps without timezone; the audit columns
/// are assigned by the storage layer in UTC. Row invariants (`tips >= 0`,
/// duration between 30 minutes and 24 hours) are enforced by CHECK
/// constraints on the `shifts` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// Auto-increment row ID, assigned at creation, immutable.
    pub id: i64,
    /// When the shift began.
    pub shift_start: NaiveDateTime,
    /// When the shift ended. Always strictly after `shift_start`.
    pub shift_end: NaiveDateTime,
    /// Tips earned over the shift, in whole currency units.
    pub tips: i32,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Refreshed by the storage layer on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Shift {
    /// Elapsed shift length in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.shift_end - self.shift_start).num_minutes()
    }

    /// Elapsed shift length in hours, fractional.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let seconds = (self.shift_end - self.shift_start).num_seconds() as f64;
        seconds / 3600.0
    }
}

/// Fields for a row about to be inserted. IDs and audit timestamps are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShift {
    /// When the shift began.
    pub shift_start: NaiveDateTime,
    /// When the shift ended.
    pub shift_end: NaiveDateTime,
    /// Tips earned over the shift.
    pub tips: i32,
}

/// Partial update merged onto an existing row. `None` fields keep their
/// stored value; `updated_at` is refreshed regardless.
#[derive(Debug, Clone, Default)]
pub struct ShiftChanges {
    /// Replacement start timestamp.
    pub shift_start: Option<NaiveDateTime>,
    /// Replacement end timestamp.
    pub shift_end: Option<NaiveDateTime>,
    /// Replacement tips amount.
    pub tips: Option<i32>,
}

impl From<NewShift> for ShiftChanges {
    fn from(new: NewShift) -> Self {
        Self {
            shift_start: Some(new.shift_start),
            shift_end: Some(new.shift_end),
            tips: Some(new.tips),
        }
    }
}

/// Aggregate totals over a shift set, recomputed on demand and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    /// Sum of tips across the set.
    pub total_tips: i64,
    /// Number of shifts in the set.
    pub total_shifts: i64,
    /// Earliest shift start, `None` when the set is empty.
    pub first_shift: Option<NaiveDateTime>,
    /// Latest shift end, `None` when the set is empty.
    pub last_shift: Option<NaiveDateTime>,
}

impl SummaryStats {
    /// The summary of an empty shift set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_tips: 0,
            total_shifts: 0,
            first_shift: None,
            last_shift: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(d: u32, h: u32, m: u32) -> NaiveDateTime {
        let Some(date) = NaiveDate::from_ymd_opt(2024, 1, d) else {
            panic!("valid date");
        };
        let Some(ts) = date.and_hms_opt(h, m, 0) else {
            panic!("valid time");
        };
        ts
    }

    fn shift(start: NaiveDateTime, end: NaiveDateTime, tips: i32) -> Shift {
        Shift {
            id: 1,
            shift_start: start,
            shift_end: end,
            tips,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn duration_of_midnight_crossing_shift() {
        let s = shift(timestamp(15, 23, 30), timestamp(16, 0, 15), 10);
        assert_eq!(s.duration_minutes(), 45);
        assert!((s.duration_hours() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn duration_is_negative_when_end_precedes_start() {
        let s = shift(timestamp(16, 9, 0), timestamp(15, 9, 0), 0);
        assert!(s.duration_hours() < 0.0);
    }

    #[test]
    fn empty_summary_has_zeros_and_no_span() {
        let stats = SummaryStats::empty();
        assert_eq!(stats.total_tips, 0);
        assert_eq!(stats.total_shifts, 0);
        assert_eq!(stats.first_shift, None);
        assert_eq!(stats.last_shift, None);
    }
}
