//! Domain layer for the Reptile Manager backend.
//!
//! This crate contains:
//! - Domain models (Reptile, housing hierarchy, feeding schedules)
//! - Business logic services (recurrence expansion, feeding status)
//! - Domain error types

pub mod models;
pub mod services;
