//! Service layer: orchestration between form input, the domain rules, and
//! the shift repository.

pub mod shift_service;

pub use shift_service::ShiftService;
