//! Derived-metric aggregation over shift sets.
//!
//! Every function here recomputes from the full shift list it is given; no
//! incremental state is kept, so a fresh call after a mutation always
//! reflects the stored data. Ratios are rounded half-up to two decimal
//! places independently; intermediate sums are never rounded.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use super::shift::Shift;

/// Hourly rate for one shift, keyed by its start date.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HourlyRatePoint {
    /// Start date of the shift (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Tips divided by duration hours, rounded to 2 decimals.
    pub hourly_rate: f64,
    /// Originating shift.
    pub shift_id: i64,
}

/// Tips earned on one shift, keyed by its start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TipsPerShiftPoint {
    /// Start date of the shift (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Tips earned on the shift.
    pub tips: i32,
    /// Originating shift.
    pub shift_id: i64,
}

/// Average performance for one weekday across all shifts falling on it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayOfWeekStats {
    /// Weekday index, Sunday = 0 through Saturday = 6.
    pub day_of_week: u8,
    /// English weekday name.
    pub day_name: &'static str,
    /// Average tips per shift on this weekday, rounded to 2 decimals.
    pub tips_per_shift: f64,
    /// Total tips divided by total hours worked on this weekday, rounded
    /// to 2 decimals.
    pub tips_per_hour: f64,
}

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Rounds half-up to two decimal places, the display rounding applied to
/// every derived ratio.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Hourly rate per shift, ascending by start date.
///
/// Shifts with non-positive duration are silently excluded; a rate over a
/// zero or negative span is meaningless and such rows cannot normally exist
/// under the storage constraints.
#[must_use]
pub fn hourly_rate_series(shifts: &[Shift]) -> Vec<HourlyRatePoint> {
    let mut points: Vec<HourlyRatePoint> = shifts
        .iter()
        .filter_map(|shift| {
            let hours = shift.duration_hours();
            if hours <= 0.0 {
                return None;
            }
            Some(HourlyRatePoint {
                date: shift.shift_start.date(),
                hourly_rate: round2(f64::from(shift.tips) / hours),
                shift_id: shift.id,
            })
        })
        .collect();

    points.sort_by_key(|point| point.date);
    points
}

/// Tips per shift, ascending by start date. No filtering: only the tips
/// amount is read, so zero-duration rows are still included.
#[must_use]
pub fn tips_per_shift_series(shifts: &[Shift]) -> Vec<TipsPerShiftPoint> {
    let mut points: Vec<TipsPerShiftPoint> = shifts
        .iter()
        .map(|shift| TipsPerShiftPoint {
            date: shift.shift_start.date(),
            tips: shift.tips,
            shift_id: shift.id,
        })
        .collect();

    points.sort_by_key(|point| point.date);
    points
}

/// Per-weekday tip averages, ascending by weekday index (Sunday = 0).
///
/// Shifts are bucketed by their start timestamp's weekday. Shifts with
/// non-positive duration are skipped entirely, and weekdays with no
/// contributing shifts are omitted rather than zero-filled.
#[must_use]
pub fn day_of_week_breakdown(shifts: &[Shift]) -> Vec<DayOfWeekStats> {
    struct Bucket {
        total_tips: i64,
        total_hours: f64,
        count: i64,
    }

    let mut buckets: BTreeMap<u8, Bucket> = BTreeMap::new();

    for shift in shifts {
        let hours = shift.duration_hours();
        if hours <= 0.0 {
            continue;
        }

        #[allow(clippy::cast_possible_truncation)]
        let day_of_week = shift.shift_start.weekday().num_days_from_sunday() as u8;

        let bucket = buckets.entry(day_of_week).or_insert(Bucket {
            total_tips: 0,
            total_hours: 0.0,
            count: 0,
        });
        bucket.total_tips += i64::from(shift.tips);
        bucket.total_hours += hours;
        bucket.count += 1;
    }

    buckets
        .into_iter()
        .map(|(day_of_week, bucket)| {
            #[allow(clippy::cast_precision_loss)]
            let (tips, count, hours) = (
                bucket.total_tips as f64,
                bucket.count as f64,
                bucket.total_hours,
            );
            DayOfWeekStats {
                day_of_week,
                day_name: DAY_NAMES
                    .get(day_of_week as usize)
                    .copied()
                    .unwrap_or("Unknown"),
                tips_per_shift: round2(tips / count),
                tips_per_hour: round2(tips / hours),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Utc};

    fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("valid date");
        };
        let Some(ts) = date.and_hms_opt(h, min, 0) else {
            panic!("valid time");
        };
        ts
    }

    fn shift(id: i64, start: NaiveDateTime, end: NaiveDateTime, tips: i32) -> Shift {
        Shift {
            id,
            shift_start: start,
            shift_end: end,
            tips,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn round2_rounds_half_up() {
        assert!((round2(13.333_333) - 13.33).abs() < 1e-9);
        assert!((round2(13.335) - 13.34).abs() < 1e-9);
        assert!((round2(10.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn hourly_rate_for_midnight_crossing_shift() {
        // 45-minute shift with 10 in tips: 10 / 0.75 = 13.33.
        let shifts = vec![shift(
            1,
            timestamp(2024, 1, 15, 23, 30),
            timestamp(2024, 1, 16, 0, 15),
            10,
        )];
        let series = hourly_rate_series(&shifts);
        assert_eq!(series.len(), 1);
        let Some(point) = series.first() else {
            panic!("one point");
        };
        assert!((point.hourly_rate - 13.33).abs() < 1e-9);
    }

    #[test]
    fn hourly_rate_excludes_non_positive_durations() {
        let shifts = vec![
            shift(
                1,
                timestamp(2024, 1, 15, 9, 0),
                timestamp(2024, 1, 15, 9, 0),
                50,
            ),
            shift(
                2,
                timestamp(2024, 1, 16, 9, 0),
                timestamp(2024, 1, 15, 9, 0),
                50,
            ),
            shift(
                3,
                timestamp(2024, 1, 17, 9, 0),
                timestamp(2024, 1, 17, 17, 0),
                80,
            ),
        ];
        let series = hourly_rate_series(&shifts);
        assert_eq!(series.len(), 1);
        let Some(point) = series.first() else {
            panic!("one point");
        };
        assert_eq!(point.shift_id, 3);
        assert!((point.hourly_rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn hourly_rate_series_ascends_by_date() {
        let shifts = vec![
            shift(
                2,
                timestamp(2024, 2, 10, 9, 0),
                timestamp(2024, 2, 10, 17, 0),
                80,
            ),
            shift(
                1,
                timestamp(2024, 1, 5, 9, 0),
                timestamp(2024, 1, 5, 17, 0),
                40,
            ),
        ];
        let dates: Vec<NaiveDate> = hourly_rate_series(&shifts)
            .into_iter()
            .map(|p| p.date)
            .collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap_or_default(),
                NaiveDate::from_ymd_opt(2024, 2, 10).unwrap_or_default(),
            ]
        );
    }

    #[test]
    fn tips_series_keeps_zero_duration_shifts() {
        let shifts = vec![shift(
            1,
            timestamp(2024, 1, 15, 9, 0),
            timestamp(2024, 1, 15, 9, 0),
            25,
        )];
        let series = tips_per_shift_series(&shifts);
        assert_eq!(series.len(), 1);
        let Some(point) = series.first() else {
            panic!("one point");
        };
        assert_eq!(point.tips, 25);
    }

    #[test]
    fn day_of_week_buckets_and_averages() {
        // 2024-01-15 and 2024-01-22 are Mondays; 2024-01-16 is a Tuesday.
        let shifts = vec![
            shift(
                1,
                timestamp(2024, 1, 15, 9, 0),
                timestamp(2024, 1, 15, 13, 0),
                40,
            ),
            shift(
                2,
                timestamp(2024, 1, 22, 9, 0),
                timestamp(2024, 1, 22, 17, 0),
                80,
            ),
            shift(
                3,
                timestamp(2024, 1, 16, 9, 0),
                timestamp(2024, 1, 16, 17, 0),
                100,
            ),
        ];
        let breakdown = day_of_week_breakdown(&shifts);
        assert_eq!(breakdown.len(), 2);

        let Some(monday) = breakdown.first() else {
            panic!("monday bucket");
        };
        assert_eq!(monday.day_of_week, 1);
        assert_eq!(monday.day_name, "Monday");
        // (40 + 80) / 2 shifts, (40 + 80) / 12 hours.
        assert!((monday.tips_per_shift - 60.0).abs() < 1e-9);
        assert!((monday.tips_per_hour - 10.0).abs() < 1e-9);

        let Some(tuesday) = breakdown.get(1) else {
            panic!("tuesday bucket");
        };
        assert_eq!(tuesday.day_of_week, 2);
        assert!((tuesday.tips_per_shift - 100.0).abs() < 1e-9);
        assert!((tuesday.tips_per_hour - 12.5).abs() < 1e-9);
    }

    #[test]
    fn day_of_week_omits_empty_buckets() {
        // A single Sunday shift: exactly one bucket, index 0.
        let shifts = vec![shift(
            1,
            timestamp(2024, 1, 14, 10, 0),
            timestamp(2024, 1, 14, 16, 0),
            60,
        )];
        let breakdown = day_of_week_breakdown(&shifts);
        assert_eq!(breakdown.len(), 1);
        let Some(sunday) = breakdown.first() else {
            panic!("sunday bucket");
        };
        assert_eq!(sunday.day_of_week, 0);
        assert_eq!(sunday.day_name, "Sunday");
    }

    #[test]
    fn day_of_week_skips_invalid_durations() {
        let shifts = vec![shift(
            1,
            timestamp(2024, 1, 14, 10, 0),
            timestamp(2024, 1, 14, 10, 0),
            60,
        )];
        assert!(day_of_week_breakdown(&shifts).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(hourly_rate_series(&[]).is_empty());
        assert!(tips_per_shift_series(&[]).is_empty());
        assert!(day_of_week_breakdown(&[]).is_empty());
    }
}
