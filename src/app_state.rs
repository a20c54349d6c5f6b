//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::service::ShiftService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shift service for all business logic.
    pub shift_service: Arc<ShiftService>,
    /// Service configuration (defaults for list limits).
    pub config: AppConfig,
}
