//! Domain layer: the shift entity, time arithmetic, form resolution, and
//! derived-metric aggregation.
//!
//! Everything in this module is pure: no I/O, no clocks beyond the
//! timestamps handed in, no caching. The persistence layer owns the rows;
//! callers pass value objects through.

pub mod form;
pub mod metrics;
pub mod shift;
pub mod time;

pub use form::ShiftForm;
pub use shift::{NewShift, Shift, ShiftChanges, SummaryStats};
