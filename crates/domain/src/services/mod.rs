//! Business logic services.

pub mod feeding_status;
pub mod recurrence;
pub mod targets;
