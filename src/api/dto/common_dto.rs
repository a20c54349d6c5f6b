//! Shared DTO types used across multiple endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Page metadata included in list responses.
///
/// List endpoints make no total-count promise; `count` is the number of
/// items in this page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageMeta {
    /// Current page number (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Number of items actually returned.
    pub count: usize,
}
