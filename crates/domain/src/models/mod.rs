//! Domain models for Reptile Manager.

pub mod breeding;
pub mod expense;
pub mod feeding;
pub mod health_log;
pub mod housing;
pub mod reptile;

pub use breeding::BreedingProject;
pub use expense::Expense;
pub use feeding::{FeedingEvent, FeedingSchedule, FeedingTarget, Recurrence, TargetRef};
pub use health_log::HealthLog;
pub use housing::{HousingLocation, Rack, Room};
pub use reptile::Reptile;
