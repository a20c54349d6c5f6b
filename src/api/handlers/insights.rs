//! Summary and chart-series handlers backing the dashboard and insights
//! pages.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{RangeParams, SummaryResponse};
use crate::app_state::AppState;
use crate::domain::metrics::{DayOfWeekStats, HourlyRatePoint, TipsPerShiftPoint};
use crate::error::{ApiError, ErrorResponse};

/// `GET /summary` — Aggregate totals over the shift set.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when only one range bound is
/// supplied, or [`ApiError::StorageFailure`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    tag = "Insights",
    summary = "Shift summary",
    description = "Total tips, shift count, and first/last shift over all shifts or an optional date range. Zeros and nulls over an empty set.",
    params(RangeParams),
    responses(
        (status = 200, description = "Summary statistics", body = SummaryResponse),
        (status = 400, description = "Half-open range", body = ErrorResponse),
    )
)]
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let range = match (params.start, params.end) {
        (Some(start), Some(end)) => Some((start, end)),
        (None, None) => None,
        _ => {
            return Err(ApiError::InvalidRequest(
                "start and end must be provided together".to_string(),
            ));
        }
    };

    let stats = state.shift_service.summary(range).await?;
    Ok(Json(SummaryResponse::from(stats)))
}

/// `GET /insights/hourly-rate` — Hourly-rate trend.
///
/// # Errors
///
/// Returns [`ApiError::StorageFailure`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/insights/hourly-rate",
    tag = "Insights",
    summary = "Hourly rate over time",
    description = "Tips divided by duration hours per shift, ascending by start date. Shifts without a positive duration are excluded.",
    responses(
        (status = 200, description = "Hourly-rate series", body = Vec<HourlyRatePoint>),
    )
)]
pub async fn hourly_rate(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.shift_service.hourly_rates().await?))
}

/// `GET /insights/tips-per-shift` — Tips earned per shift over time.
///
/// # Errors
///
/// Returns [`ApiError::StorageFailure`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/insights/tips-per-shift",
    tag = "Insights",
    summary = "Tips per shift over time",
    responses(
        (status = 200, description = "Tips-per-shift series", body = Vec<TipsPerShiftPoint>),
    )
)]
pub async fn tips_per_shift(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.shift_service.tips_per_shift().await?))
}

/// `GET /insights/day-of-week` — Average tip performance by weekday.
///
/// # Errors
///
/// Returns [`ApiError::StorageFailure`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/insights/day-of-week",
    tag = "Insights",
    summary = "Tips by day of week",
    description = "Tips-per-shift and tips-per-hour averaged per weekday (Sunday = 0). Weekdays without shifts are omitted.",
    responses(
        (status = 200, description = "Weekday breakdown", body = Vec<DayOfWeekStats>),
    )
)]
pub async fn day_of_week(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.shift_service.day_of_week().await?))
}

/// Summary and insight routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/insights/hourly-rate", get(hourly_rate))
        .route("/insights/tips-per-shift", get(tips_per_shift))
        .route("/insights/day-of-week", get(day_of_week))
}
