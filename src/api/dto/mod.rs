//! Request/response DTOs for the REST API.

pub mod common_dto;
pub mod insights_dto;
pub mod shift_dto;

pub use common_dto::PageMeta;
pub use insights_dto::{RangeParams, SummaryResponse};
pub use shift_dto::{
    CreateShiftRequest, RecentParams, ShiftDto, ShiftListParams, ShiftListResponse,
    UpdateShiftRequest,
};
