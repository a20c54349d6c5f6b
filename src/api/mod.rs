//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1`.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, utoipa::OpenApi)]
#[openapi(
    info(
        title = "tiplog-api",
        description = "REST API backend for the tiplog personal tip-tracking application."
    ),
    paths(
        handlers::shifts::create_shift,
        handlers::shifts::list_shifts,
        handlers::shifts::recent_shifts,
        handlers::shifts::shifts_in_range,
        handlers::shifts::shifts_on_day,
        handlers::shifts::get_shift,
        handlers::shifts::update_shift,
        handlers::shifts::delete_shift,
        handlers::insights::summary,
        handlers::insights::hourly_rate,
        handlers::insights::tips_per_shift,
        handlers::insights::day_of_week,
        handlers::system::health_handler,
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
    };

    router
}
