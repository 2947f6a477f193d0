//! Entity definitions (database row mappings).

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

pub use api_key::ApiKeyEntity;
pub use breeding_project::BreedingProjectEntity;
pub use expense::ExpenseEntity;
pub use feeder_size::FeederSizeEntity;
pub use feeding_event::FeedingEventEntity;
pub use feeding_schedule::FeedingScheduleEntity;
pub use feeding_target::FeedingTargetEntity;
pub use health_log::HealthLogEntity;
pub use housing_location::HousingLocationEntity;
pub use organization::OrganizationEntity;
pub use rack::RackEntity;
pub use reptile::ReptileEntity;
pub use room::RoomEntity;
