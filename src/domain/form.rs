//! Shift form input and its resolution into concrete timestamps.
//!
//! [`ShiftForm`] is the transient shape a caller submits: a calendar date,
//! two wall-clock time strings, and an optional tips amount. It exists only
//! to be converted into a [`NewShift`] before reaching the repository.
//! Resolution applies the form-level validation rules; the storage layer
//! re-enforces its own constraints on the combined timestamps and remains
//! the authoritative gate.

use chrono::NaiveDate;
use serde::Deserialize;

use super::shift::NewShift;
use super::time::{
    MIN_SHIFT_MINUTES, calculate_end_date, clock_duration_minutes, combine_date_and_time,
};
use crate::error::ApiError;

/// Raw shift fields as submitted by the add/edit form.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftForm {
    /// Calendar date the shift started on.
    pub shift_date: NaiveDate,
    /// Start time-of-day, 24-hour `"HH:MM"`.
    pub shift_start_time: String,
    /// End time-of-day, 24-hour `"HH:MM"`. May be earlier than the start
    /// time, in which case the shift ends on the next calendar day.
    pub shift_end_time: String,
    /// Tips earned; defaults to 0 when omitted.
    pub tips: Option<i32>,
}

impl ShiftForm {
    /// Resolves the form into a [`NewShift`] with concrete start/end
    /// timestamps, applying the form-level validation rules.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidRequest`] when tips are negative.
    /// - [`ApiError::InvalidTimeFormat`] when a time string is malformed.
    /// - [`ApiError::DurationOutOfRange`] when the minute-of-day duration
    ///   (rollover assumed) is under 30 minutes.
    /// - [`ApiError::EndBeforeStart`] when the combined end timestamp is not
    ///   strictly after the start.
    pub fn resolve(&self) -> Result<NewShift, ApiError> {
        let tips = self.tips.unwrap_or(0);
        if tips < 0 {
            return Err(ApiError::InvalidRequest(
                "tips cannot be negative".to_string(),
            ));
        }

        let minutes = clock_duration_minutes(&self.shift_start_time, &self.shift_end_time)?;
        if minutes < MIN_SHIFT_MINUTES {
            return Err(ApiError::DurationOutOfRange { minutes });
        }

        let shift_start = combine_date_and_time(self.shift_date, &self.shift_start_time)?;
        let shift_end =
            calculate_end_date(self.shift_date, &self.shift_start_time, &self.shift_end_time)?;

        if shift_end <= shift_start {
            return Err(ApiError::EndBeforeStart);
        }

        Ok(NewShift {
            shift_start,
            shift_end,
            tips,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn form(start: &str, end: &str, tips: Option<i32>) -> ShiftForm {
        let Some(shift_date) = NaiveDate::from_ymd_opt(2024, 1, 15) else {
            panic!("valid date");
        };
        ShiftForm {
            shift_date,
            shift_start_time: start.to_string(),
            shift_end_time: end.to_string(),
            tips,
        }
    }

    #[test]
    fn resolves_plain_day_shift() {
        let Ok(new) = form("09:00", "17:00", Some(120)).resolve() else {
            panic!("valid form");
        };
        assert_eq!(new.shift_start.to_string(), "2024-01-15 09:00:00");
        assert_eq!(new.shift_end.to_string(), "2024-01-15 17:00:00");
        assert_eq!(new.tips, 120);
    }

    #[test]
    fn resolves_midnight_crossing_shift_to_next_day() {
        let Ok(new) = form("23:30", "00:15", Some(10)).resolve() else {
            panic!("valid form");
        };
        assert_eq!(new.shift_end.to_string(), "2024-01-16 00:15:00");
        assert_eq!((new.shift_end - new.shift_start).num_minutes(), 45);
    }

    #[test]
    fn omitted_tips_default_to_zero() {
        let Ok(new) = form("10:00", "14:00", None).resolve() else {
            panic!("valid form");
        };
        assert_eq!(new.tips, 0);
    }

    #[test]
    fn rejects_negative_tips() {
        let result = form("09:00", "17:00", Some(-5)).resolve();
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn rejects_shift_under_thirty_minutes() {
        let result = form("09:00", "09:20", Some(5)).resolve();
        assert!(matches!(
            result,
            Err(ApiError::DurationOutOfRange { minutes: 20 })
        ));
    }

    #[test]
    fn rejects_zero_duration() {
        let result = form("09:00", "09:00", None).resolve();
        assert!(matches!(
            result,
            Err(ApiError::DurationOutOfRange { minutes: 0 })
        ));
    }

    #[test]
    fn rejects_malformed_time() {
        let result = form("9am", "17:00", None).resolve();
        assert!(matches!(result, Err(ApiError::InvalidTimeFormat(_))));
    }

    #[test]
    fn accepts_exactly_thirty_minutes() {
        let Ok(new) = form("23:45", "00:15", None).resolve() else {
            panic!("valid form");
        };
        assert_eq!((new.shift_end - new.shift_start).num_minutes(), 30);
    }
}
