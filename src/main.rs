//! tiplog-api server entry point.
//!
//! Starts the Axum HTTP server over an explicitly constructed database
//! pool; the pool is owned here and closed on shutdown.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tiplog_api::api;
use tiplog_api::app_state::AppState;
use tiplog_api::config::AppConfig;
use tiplog_api::persistence::{self, shifts::ShiftRepository};
use tiplog_api::service::ShiftService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting tiplog-api");

    // Build persistence layer
    let pool = persistence::connect(&config).await?;
    if config.run_migrations {
        persistence::run_migrations(&pool).await?;
        tracing::info!("migrations applied");
    }

    // Build service layer
    let shift_service = Arc::new(ShiftService::new(ShiftRepository::new(pool.clone())));

    // Build application state
    let app_state = AppState {
        shift_service,
        config: config.clone(),
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    pool.close().await;

    Ok(())
}
