//! Background job scheduler and job implementations.

mod feeding_materialization;
mod pool_metrics;
mod scheduler;

pub use feeding_materialization::FeedingMaterializationJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
