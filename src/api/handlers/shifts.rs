//! Shift CRUD handlers: create, list, get, update, delete, range queries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;

use crate::api::dto::{
    CreateShiftRequest, PageMeta, RangeParams, RecentParams, ShiftDto, ShiftListParams,
    ShiftListResponse, UpdateShiftRequest,
};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `POST /shifts` — Record a new shift.
///
/// # Errors
///
/// Returns [`ApiError`] on malformed times, duration violations, or
/// storage-level constraint failures.
#[utoipa::path(
    post,
    path = "/api/v1/shifts",
    tag = "Shifts",
    summary = "Record a new shift",
    description = "Combines the submitted date and wall-clock times into concrete timestamps (rolling the end to the next day for shifts crossing midnight) and persists the shift.",
    request_body = CreateShiftRequest,
    responses(
        (status = 201, description = "Shift created", body = ShiftDto),
        (status = 400, description = "Malformed time or request", body = ErrorResponse),
        (status = 422, description = "Shift invariant violated", body = ErrorResponse),
    )
)]
pub async fn create_shift(
    State(state): State<AppState>,
    Json(req): Json<CreateShiftRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let shift = state.shift_service.create_shift(&req.into()).await?;
    Ok((StatusCode::CREATED, Json(ShiftDto::from(shift))))
}

/// `GET /shifts` — List shifts, most recently created first.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/shifts",
    tag = "Shifts",
    summary = "List shifts",
    description = "Returns a page of shifts ordered by creation time descending. With `min_tips` set, returns all shifts earning at least that amount, highest tips first.",
    params(ShiftListParams),
    responses(
        (status = 200, description = "Shift list", body = ShiftListResponse),
    )
)]
pub async fn list_shifts(
    State(state): State<AppState>,
    Query(params): Query<ShiftListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.clamped();

    let shifts = if let Some(min_tips) = params.min_tips {
        state.shift_service.list_shifts_by_min_tips(min_tips).await?
    } else {
        let limit = i64::from(params.per_page);
        let offset = i64::from(params.page - 1) * limit;
        state.shift_service.list_shifts(limit, offset).await?
    };

    let data: Vec<ShiftDto> = shifts.into_iter().map(ShiftDto::from).collect();
    let count = data.len();

    Ok(Json(ShiftListResponse {
        data,
        pagination: PageMeta {
            page: params.page,
            per_page: params.per_page,
            count,
        },
    }))
}

/// `GET /shifts/recent` — Most recently created shifts for the dashboard.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/shifts/recent",
    tag = "Shifts",
    summary = "Recent shifts",
    params(RecentParams),
    responses(
        (status = 200, description = "Recent shifts", body = Vec<ShiftDto>),
    )
)]
pub async fn recent_shifts(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = params.limit.unwrap_or(state.config.recent_shifts_limit);
    let shifts = state.shift_service.recent_shifts(limit.max(0)).await?;
    let data: Vec<ShiftDto> = shifts.into_iter().map(ShiftDto::from).collect();
    Ok(Json(data))
}

/// `GET /shifts/range` — Shifts fully contained in a timestamp range.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] unless both bounds are supplied.
#[utoipa::path(
    get,
    path = "/api/v1/shifts/range",
    tag = "Shifts",
    summary = "Shifts in a date range",
    description = "Returns shifts with `shift_start >= start` and `shift_end <= end`, ascending by start.",
    params(RangeParams),
    responses(
        (status = 200, description = "Shifts in range", body = Vec<ShiftDto>),
        (status = 400, description = "Missing bound", body = ErrorResponse),
    )
)]
pub async fn shifts_in_range(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(start), Some(end)) = (params.start, params.end) else {
        return Err(ApiError::InvalidRequest(
            "start and end must both be provided".to_string(),
        ));
    };

    let shifts = state.shift_service.shifts_in_range(start, end).await?;
    let data: Vec<ShiftDto> = shifts.into_iter().map(ShiftDto::from).collect();
    Ok(Json(data))
}

/// `GET /shifts/day/:date` — Shifts on one calendar day.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/shifts/day/{date}",
    tag = "Shifts",
    summary = "Shifts on a calendar day",
    params(
        ("date" = NaiveDate, Path, description = "Calendar date (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Shifts on the day", body = Vec<ShiftDto>),
    )
)]
pub async fn shifts_on_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, ApiError> {
    let shifts = state.shift_service.shifts_on_day(date).await?;
    let data: Vec<ShiftDto> = shifts.into_iter().map(ShiftDto::from).collect();
    Ok(Json(data))
}

/// `GET /shifts/:id` — Get a single shift.
///
/// # Errors
///
/// Returns [`ApiError::ShiftNotFound`] if the shift does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/shifts/{id}",
    tag = "Shifts",
    summary = "Get shift details",
    params(
        ("id" = i64, Path, description = "Shift ID"),
    ),
    responses(
        (status = 200, description = "Shift details", body = ShiftDto),
        (status = 404, description = "Shift not found", body = ErrorResponse),
    )
)]
pub async fn get_shift(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let shift = state
        .shift_service
        .get_shift(id)
        .await?
        .ok_or(ApiError::ShiftNotFound(id))?;
    Ok(Json(ShiftDto::from(shift)))
}

/// `PUT /shifts/:id` — Replace a shift's date, times, and tips.
///
/// # Errors
///
/// Returns [`ApiError::ShiftNotFound`] if the shift does not exist, or a
/// validation/constraint error on bad input.
#[utoipa::path(
    put,
    path = "/api/v1/shifts/{id}",
    tag = "Shifts",
    summary = "Update a shift",
    request_body = UpdateShiftRequest,
    params(
        ("id" = i64, Path, description = "Shift ID"),
    ),
    responses(
        (status = 200, description = "Updated shift", body = ShiftDto),
        (status = 404, description = "Shift not found", body = ErrorResponse),
        (status = 422, description = "Shift invariant violated", body = ErrorResponse),
    )
)]
pub async fn update_shift(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateShiftRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let shift = state
        .shift_service
        .update_shift(id, &req.into())
        .await?
        .ok_or(ApiError::ShiftNotFound(id))?;
    Ok(Json(ShiftDto::from(shift)))
}

/// `DELETE /shifts/:id` — Permanently remove a shift.
///
/// # Errors
///
/// Returns [`ApiError::ShiftNotFound`] if the shift does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/shifts/{id}",
    tag = "Shifts",
    summary = "Delete a shift",
    params(
        ("id" = i64, Path, description = "Shift ID"),
    ),
    responses(
        (status = 204, description = "Shift deleted"),
        (status = 404, description = "Shift not found", body = ErrorResponse),
    )
)]
pub async fn delete_shift(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if state.shift_service.delete_shift(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::ShiftNotFound(id))
    }
}

/// Shift management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shifts", post(create_shift).get(list_shifts))
        .route("/shifts/recent", get(recent_shifts))
        .route("/shifts/range", get(shifts_in_range))
        .route("/shifts/day/{date}", get(shifts_on_day))
        .route(
            "/shifts/{id}",
            get(get_shift).put(update_shift).delete(delete_shift),
        )
}
