//! Persistence layer: PostgreSQL shift storage.
//!
//! The connection pool is constructed explicitly from configuration and
//! injected into [`shifts::ShiftRepository`]; there is no process-wide
//! singleton. `main` owns the pool lifecycle and closes it on shutdown.
//! Schema management runs through `sqlx::migrate!`, which installs the
//! `shifts` table together with its CHECK constraints — the authoritative
//! validation gate for row invariants.

pub mod shifts;

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::error::ApiError;

/// Builds a connection pool from the database settings in `config`.
///
/// # Errors
///
/// Returns [`ApiError::StorageFailure`] when the database is unreachable.
pub async fn connect(config: &AppConfig) -> Result<PgPool, ApiError> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await
        .map_err(|e| ApiError::StorageFailure(e.to_string()))
}

/// Applies pending migrations from the `migrations/` directory.
///
/// # Errors
///
/// Returns [`ApiError::StorageFailure`] when a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), ApiError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| ApiError::StorageFailure(e.to_string()))
}
