//! Repository implementations for database operations.

pub mod api_key;
pub mod breeding_project;
pub mod expense;
pub mod feeder_size;
pub mod feeding_event;
pub mod feeding_schedule;
pub mod feeding_target;
pub mod health_log;
pub mod housing_location;
pub mod organization;
pub mod rack;
pub mod reptile;
pub mod room;

pub use api_key::ApiKeyRepository;
pub use breeding_project::BreedingProjectRepository;
pub use expense::{CategoryTotalRow, ExpenseRepository};
pub use feeder_size::FeederSizeRepository;
pub use feeding_event::{FeedingEventRepository, NewFeedingEvent};
pub use feeding_schedule::FeedingScheduleRepository;
pub use feeding_target::FeedingTargetRepository;
pub use health_log::HealthLogRepository;
pub use housing_location::HousingLocationRepository;
pub use organization::OrganizationRepository;
pub use rack::RackRepository;
pub use reptile::ReptileRepository;
pub use room::RoomRepository;
