//! Shift-time arithmetic: combining calendar dates with wall-clock times.
//!
//! Shift times are wall-clock values with no timezone attached. A shift is
//! entered as a calendar date plus two `"HH:MM"` strings; an end time-of-day
//! that is numerically earlier than the start belongs to the next calendar
//! day (midnight rollover). No other rollover is applied, so a shift entered
//! through this path can never span more than 24 hours.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::ApiError;

/// Minimum accepted shift length, in minutes.
pub const MIN_SHIFT_MINUTES: i64 = 30;

/// Maximum accepted shift length, in minutes.
pub const MAX_SHIFT_MINUTES: i64 = 24 * 60;

/// Parses a 24-hour `"HH:MM"` string into `(hours, minutes)`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidTimeFormat`] unless the string splits into
/// two integers in `[0,23]` and `[0,59]`.
pub fn parse_clock(value: &str) -> Result<(u32, u32), ApiError> {
    let invalid = || ApiError::InvalidTimeFormat(value.to_string());

    let (hours_part, minutes_part) = value.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours_part.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes_part.parse().map_err(|_| invalid())?;

    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok((hours, minutes))
}

/// Converts an `"HH:MM"` string into minutes since midnight.
///
/// # Errors
///
/// Returns [`ApiError::InvalidTimeFormat`] on malformed input.
pub fn minutes_of_day(value: &str) -> Result<i64, ApiError> {
    let (hours, minutes) = parse_clock(value)?;
    Ok(i64::from(hours) * 60 + i64::from(minutes))
}

/// Combines the calendar portion of `date` with the hour and minute parsed
/// from `time`, truncating seconds to zero.
///
/// # Errors
///
/// Returns [`ApiError::InvalidTimeFormat`] on malformed input.
pub fn combine_date_and_time(date: NaiveDate, time: &str) -> Result<NaiveDateTime, ApiError> {
    let (hours, minutes) = parse_clock(time)?;
    let clock = NaiveTime::from_hms_opt(hours, minutes, 0)
        .ok_or_else(|| ApiError::InvalidTimeFormat(time.to_string()))?;
    Ok(date.and_time(clock))
}

/// Computes the end timestamp of a shift, rolling the date forward one
/// calendar day when the end time-of-day is earlier than the start
/// time-of-day (a shift crossing midnight).
///
/// # Errors
///
/// Returns [`ApiError::InvalidTimeFormat`] when either time string is
/// malformed, or [`ApiError::InvalidRequest`] when the rolled date would
/// overflow the calendar.
pub fn calculate_end_date(
    start_date: NaiveDate,
    start_time: &str,
    end_time: &str,
) -> Result<NaiveDateTime, ApiError> {
    let start_total = minutes_of_day(start_time)?;
    let end_total = minutes_of_day(end_time)?;

    let end_date = if end_total < start_total {
        start_date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| ApiError::InvalidRequest("shift date out of range".to_string()))?
    } else {
        start_date
    };

    combine_date_and_time(end_date, end_time)
}

/// Projects a stored timestamp back into its `"HH:MM"` wall-clock string,
/// as used to pre-fill edit forms.
#[must_use]
pub fn extract_time_string(timestamp: NaiveDateTime) -> String {
    format!("{:02}:{:02}", timestamp.hour(), timestamp.minute())
}

/// Shift length in minutes computed purely from the two time-of-day strings,
/// assuming midnight rollover when the end is earlier than the start.
///
/// This is the form-level pre-check; the authoritative duration check uses
/// the concrete combined timestamps.
///
/// # Errors
///
/// Returns [`ApiError::InvalidTimeFormat`] on malformed input.
pub fn clock_duration_minutes(start_time: &str, end_time: &str) -> Result<i64, ApiError> {
    let start_total = minutes_of_day(start_time)?;
    let end_total = minutes_of_day(end_time)?;

    if end_total >= start_total {
        Ok(end_total - start_total)
    } else {
        Ok(24 * 60 - start_total + end_total)
    }
}
