//! PostgreSQL-backed shift repository.
//!
//! [`ShiftRepository`] is a stateless service bound to the `shifts` table:
//! a single struct holding only the pool handle. Row invariants are
//! re-checked here before every write so the storage boundary rejects
//! malformed input even when the form layer was bypassed; the table's CHECK
//! constraints remain the final gate and their violations are mapped to
//! [`ApiError::ConstraintViolation`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::PgPool;
use sqlx::error::ErrorKind;

use crate::domain::shift::{NewShift, Shift, ShiftChanges, SummaryStats};
use crate::domain::time::{MAX_SHIFT_MINUTES, MIN_SHIFT_MINUTES};
use crate::error::ApiError;

/// Row tuple as selected from the `shifts` table.
type ShiftRow = (
    i64,
    NaiveDateTime,
    NaiveDateTime,
    i32,
    DateTime<Utc>,
    DateTime<Utc>,
);

const SHIFT_COLUMNS: &str = "id, shift_start, shift_end, tips, created_at, updated_at";

/// Shift storage bound to one PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct ShiftRepository {
    pool: PgPool,
}

impl ShiftRepository {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new shift and returns the committed row.
    ///
    /// Follows the insert-then-refetch idiom: the id is committed by the
    /// INSERT, so the follow-up read only collects the store-assigned
    /// columns and is tolerant of not being atomic with it.
    ///
    /// # Errors
    ///
    /// [`ApiError::ConstraintViolation`] or [`ApiError::DurationOutOfRange`]
    /// when a row invariant fails, [`ApiError::StorageFailure`] on transport
    /// error.
    pub async fn create(&self, new: &NewShift) -> Result<Shift, ApiError> {
        check_row_invariants(new.shift_start, new.shift_end, new.tips)?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO shifts (shift_start, shift_end, tips) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new.shift_start)
        .bind(new.shift_end)
        .bind(new.tips)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::Internal(format!("created shift {id} missing on re-fetch")))
    }

    /// Looks up a shift by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] on database failure.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Shift>, ApiError> {
        let row = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(row_into_shift))
    }

    /// Returns all shifts, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] on database failure.
    pub async fn find_all(&self) -> Result<Vec<Shift>, ApiError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(row_into_shift).collect())
    }

    /// Returns one page of shifts, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] on database failure.
    pub async fn find_with_pagination(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Shift>, ApiError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(row_into_shift).collect())
    }

    /// Merges the supplied fields onto an existing row, refreshing
    /// `updated_at`, and returns the updated row. `Ok(None)` when no row
    /// with the given id exists.
    ///
    /// The merged record is re-validated against the same constraints as
    /// [`Self::create`].
    ///
    /// # Errors
    ///
    /// [`ApiError::ConstraintViolation`] or [`ApiError::DurationOutOfRange`]
    /// when the merged row violates an invariant,
    /// [`ApiError::StorageFailure`] on transport error.
    pub async fn update(
        &self,
        id: i64,
        changes: &ShiftChanges,
    ) -> Result<Option<Shift>, ApiError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let shift_start = changes.shift_start.unwrap_or(existing.shift_start);
        let shift_end = changes.shift_end.unwrap_or(existing.shift_end);
        let tips = changes.tips.unwrap_or(existing.tips);
        check_row_invariants(shift_start, shift_end, tips)?;

        sqlx::query(
            "UPDATE shifts SET shift_start = $1, shift_end = $2, tips = $3, updated_at = now() \
             WHERE id = $4",
        )
        .bind(shift_start)
        .bind(shift_end)
        .bind(tips)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.find_by_id(id).await
    }

    /// Deletes a shift. Returns `false` when no row with the given id
    /// existed; a missing row is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] on database failure.
    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns shifts fully contained in `[start, end]`, ascending by start.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] on database failure.
    pub async fn find_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Shift>, ApiError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts \
             WHERE shift_start >= $1 AND shift_end <= $2 ORDER BY shift_start ASC"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(row_into_shift).collect())
    }

    /// Returns shifts contained in the 00:00:00–23:59:59.999 window of the
    /// given calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] on database failure.
    pub async fn find_by_day(&self, date: NaiveDate) -> Result<Vec<Shift>, ApiError> {
        let start = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ApiError::Internal("invalid day window start".to_string()))?;
        let end = date
            .and_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| ApiError::Internal("invalid day window end".to_string()))?;

        self.find_by_date_range(start, end).await
    }

    /// Returns shifts with tips of at least `min_tips`, highest tips first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] on database failure.
    pub async fn find_by_min_tips(&self, min_tips: i32) -> Result<Vec<Shift>, ApiError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts WHERE tips >= $1 ORDER BY tips DESC"
        ))
        .bind(min_tips)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(row_into_shift).collect())
    }

    /// Returns the `limit` most recently created shifts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] on database failure.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Shift>, ApiError> {
        self.find_with_pagination(limit, 0).await
    }

    /// Aggregates tips, shift count, and the date span over the shift set,
    /// optionally bounded by a range on `[shift_start, shift_end]`.
    ///
    /// Uses an explicit `COUNT(*)` for the shift count.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] on database failure.
    pub async fn summary(
        &self,
        range: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> Result<SummaryStats, ApiError> {
        type SummaryRow = (i64, i64, Option<NaiveDateTime>, Option<NaiveDateTime>);

        let row = if let Some((start, end)) = range {
            sqlx::query_as::<_, SummaryRow>(
                "SELECT COALESCE(SUM(tips), 0)::BIGINT, COUNT(*), MIN(shift_start), MAX(shift_end) \
                 FROM shifts WHERE shift_start >= $1 AND shift_end <= $2",
            )
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, SummaryRow>(
                "SELECT COALESCE(SUM(tips), 0)::BIGINT, COUNT(*), MIN(shift_start), MAX(shift_end) \
                 FROM shifts",
            )
            .fetch_one(&self.pool)
            .await
        }
        .map_err(map_db_error)?;

        let (total_tips, total_shifts, first_shift, last_shift) = row;
        Ok(SummaryStats {
            total_tips,
            total_shifts,
            first_shift,
            last_shift,
        })
    }
}

fn row_into_shift(row: ShiftRow) -> Shift {
    let (id, shift_start, shift_end, tips, created_at, updated_at) = row;
    Shift {
        id,
        shift_start,
        shift_end,
        tips,
        created_at,
        updated_at,
    }
}

/// Storage-boundary mirror of the `shifts` table CHECK constraints.
///
/// Rejecting here keeps the error shape deterministic; a row that slips
/// past still fails the SQL constraints and comes back as
/// [`ApiError::ConstraintViolation`] via [`map_db_error`].
fn check_row_invariants(
    shift_start: NaiveDateTime,
    shift_end: NaiveDateTime,
    tips: i32,
) -> Result<(), ApiError> {
    if tips < 0 {
        return Err(ApiError::ConstraintViolation(
            "tips must be non-negative".to_string(),
        ));
    }
    if shift_end <= shift_start {
        return Err(ApiError::ConstraintViolation(
            "shift end must be after shift start".to_string(),
        ));
    }

    let seconds = (shift_end - shift_start).num_seconds();
    if !(MIN_SHIFT_MINUTES * 60..=MAX_SHIFT_MINUTES * 60).contains(&seconds) {
        return Err(ApiError::DurationOutOfRange {
            minutes: seconds / 60,
        });
    }
    Ok(())
}

fn map_db_error(error: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db) = &error
        && matches!(db.kind(), ErrorKind::CheckViolation)
    {
        let constraint = db.constraint().unwrap_or("check").to_string();
        return ApiError::ConstraintViolation(constraint);
    }
    ApiError::StorageFailure(error.to_string())
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

    #[test]
    fn invariants_accept_valid_rows() {
        assert!(check_row_invariants(timestamp(15, 9, 0), timestamp(15, 17, 0), 120).is_ok());
        // Exactly 30 minutes and exactly 24 hours are both inside the window.
        assert!(check_row_invariants(timestamp(15, 9, 0), timestamp(15, 9, 30), 0).is_ok());
        assert!(check_row_invariants(timestamp(15, 9, 0), timestamp(16, 9, 0), 0).is_ok());
    }

    #[test]
    fn invariants_reject_negative_tips() {
        let result = check_row_invariants(timestamp(15, 9, 0), timestamp(15, 17, 0), -5);
        assert!(matches!(result, Err(ApiError::ConstraintViolation(_))));
    }

    #[test]
    fn invariants_reject_end_not_after_start() {
        let result = check_row_invariants(timestamp(15, 9, 0), timestamp(15, 9, 0), 10);
        assert!(matches!(result, Err(ApiError::ConstraintViolation(_))));
    }

    #[test]
    fn invariants_reject_short_and_long_durations() {
        let short = check_row_invariants(timestamp(15, 9, 0), timestamp(15, 9, 20), 5);
        assert!(matches!(
            short,
            Err(ApiError::DurationOutOfRange { minutes: 20 })
        ));

        let long = check_row_invariants(timestamp(15, 9, 0), timestamp(16, 9, 1), 5);
        assert!(matches!(long, Err(ApiError::DurationOutOfRange { .. })));
    }
}
