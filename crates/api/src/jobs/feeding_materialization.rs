//! Daily feeding event materialization job.
//!
//! Runs the today-only materializer for every active schedule so the
//! day's unfed events exist before keepers start marking them, even when
//! nobody has pressed "generate" recently.

use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, warn};

use domain::models::feeding::FeedingSchedule;
use persistence::repositories::FeedingScheduleRepository;

use super::scheduler::{Job, JobFrequency};
use crate::services::FeedingService;

/// Background job materializing today's feeding events.
pub struct FeedingMaterializationJob {
    pool: PgPool,
}

impl FeedingMaterializationJob {
    /// Create a new materialization job.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Materialize today's events across all active schedules.
    ///
    /// Per-schedule failures are logged and skipped; one broken schedule
    /// must not starve the rest of the fleet.
    async fn materialize_today(&self) -> Result<u64, sqlx::Error> {
        let schedules = FeedingScheduleRepository::new(self.pool.clone());
        let service = FeedingService::new(self.pool.clone());
        let today = Utc::now().date_naive();

        let mut total_created = 0;
        for entity in schedules.list_all_active().await? {
            let schedule: FeedingSchedule = entity.into();

            let targets = match service.load_target_refs(schedule.schedule_id).await {
                Ok(targets) => targets,
                Err(e) => {
                    warn!(schedule_id = %schedule.schedule_id, "Target load failed: {}", e);
                    continue;
                }
            };
            if targets.is_empty() {
                continue;
            }

            let resolved = service
                .resolve_targets(schedule.organization_id, &targets)
                .await;
            if resolved.reptile_ids.is_empty() {
                continue;
            }

            match service
                .create_events_for_today(
                    schedule.organization_id,
                    schedule.schedule_id,
                    &resolved.reptile_ids,
                    today,
                )
                .await
            {
                Ok(created) => {
                    if created > 0 {
                        info!(
                            schedule_id = %schedule.schedule_id,
                            created = created,
                            "Materialized today's feeding events"
                        );
                    }
                    total_created += created;
                }
                Err(e) => {
                    warn!(schedule_id = %schedule.schedule_id, "Materialization failed: {}", e);
                }
            }
        }

        Ok(total_created)
    }
}

#[async_trait::async_trait]
impl Job for FeedingMaterializationJob {
    fn name(&self) -> &'static str {
        "feeding_materialization"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), String> {
        let created = self
            .materialize_today()
            .await
            .map_err(|e| format!("Failed to materialize feeding events: {}", e))?;

        info!(created = created, "Feeding materialization run complete");
        Ok(())
    }
}
