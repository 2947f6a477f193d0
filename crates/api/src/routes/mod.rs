//! HTTP route handlers.

pub mod breeding;
pub mod dashboard;
pub mod expenses;
pub mod feeding_events;
pub mod feeding_schedules;
pub mod health;
pub mod health_logs;
pub mod locations;
pub mod racks;
pub mod reptile_import;
pub mod reptiles;
pub mod rooms;
