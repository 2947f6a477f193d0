//! Feeding pipeline: target resolution and event materialization.
//!
//! Targets are stored as references into the housing hierarchy and
//! resolved against the *current* housing snapshot on every run, so a
//! schedule targeting a rack picks up whatever lives there today. A
//! failed sub-query degrades that target type to zero reptiles and a
//! warning; it never aborts the other target types.
//!
//! Materialization is idempotent end to end: pairs already persisted are
//! skipped up front, the batch itself is de-duplicated, and the insert
//! runs ON CONFLICT DO NOTHING against the table's uniqueness constraint.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use domain::models::feeding::{
    FeedingSchedule, GenerateEventsRequest, GenerateEventsResponse, TargetRef,
};
use domain::services::recurrence::{
    effective_end, expand_dates, is_feeding_day, is_feeding_day_lenient,
};
use domain::services::targets::{group_levels_by_rack, partition_targets, ResolvedTargets};
use persistence::repositories::{
    FeedingEventRepository, FeedingScheduleRepository, FeedingTargetRepository,
    HousingLocationRepository, NewFeedingEvent, ReptileRepository,
};

use crate::error::ApiError;

/// Orchestrates target resolution and event materialization.
#[derive(Clone)]
pub struct FeedingService {
    schedules: FeedingScheduleRepository,
    targets: FeedingTargetRepository,
    events: FeedingEventRepository,
    locations: HousingLocationRepository,
    reptiles: ReptileRepository,
}

impl FeedingService {
    /// Creates a new FeedingService backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            schedules: FeedingScheduleRepository::new(pool.clone()),
            targets: FeedingTargetRepository::new(pool.clone()),
            events: FeedingEventRepository::new(pool.clone()),
            locations: HousingLocationRepository::new(pool.clone()),
            reptiles: ReptileRepository::new(pool),
        }
    }

    /// Expands a list of target references into a de-duplicated reptile set.
    ///
    /// `reptile` targets are included as-is without an existence check;
    /// group targets are resolved through the housing hierarchy. Each
    /// failed sub-resolution contributes a warning instead of an error.
    pub async fn resolve_targets(
        &self,
        organization_id: Uuid,
        targets: &[TargetRef],
    ) -> ResolvedTargets {
        let partitioned = partition_targets(targets);
        let mut reptile_ids: HashSet<Uuid> = partitioned.reptile_ids.iter().copied().collect();
        let mut warnings = Vec::new();

        // Location ids gathered from every group target type, resolved to
        // reptiles with one query at the end.
        let mut location_ids: Vec<Uuid> = partitioned.location_ids.clone();

        if !partitioned.room_ids.is_empty() {
            match self
                .locations
                .find_ids_by_room_ids(organization_id, &partitioned.room_ids)
                .await
            {
                Ok(ids) => location_ids.extend(ids),
                Err(e) => {
                    warn!("Room target resolution failed: {}", e);
                    warnings.push(format!("Room targets could not be resolved: {}", e));
                }
            }
        }

        if !partitioned.rack_ids.is_empty() {
            match self
                .locations
                .find_ids_by_rack_ids(organization_id, &partitioned.rack_ids)
                .await
            {
                Ok(ids) => location_ids.extend(ids),
                Err(e) => {
                    warn!("Rack target resolution failed: {}", e);
                    warnings.push(format!("Rack targets could not be resolved: {}", e));
                }
            }
        }

        for (rack_id, levels) in group_levels_by_rack(&partitioned.level_targets) {
            match self
                .locations
                .find_ids_by_rack_and_levels(organization_id, rack_id, &levels)
                .await
            {
                Ok(ids) => location_ids.extend(ids),
                Err(e) => {
                    warn!(rack_id = %rack_id, "Level target resolution failed: {}", e);
                    warnings.push(format!(
                        "Level targets for rack {} could not be resolved: {}",
                        rack_id, e
                    ));
                }
            }
        }

        if !location_ids.is_empty() {
            location_ids.sort();
            location_ids.dedup();
            match self
                .reptiles
                .find_ids_by_location_ids(organization_id, &location_ids)
                .await
            {
                Ok(ids) => reptile_ids.extend(ids),
                Err(e) => {
                    warn!("Reptile lookup for resolved locations failed: {}", e);
                    warnings.push(format!("Housed reptiles could not be resolved: {}", e));
                }
            }
        }

        ResolvedTargets {
            reptile_ids: reptile_ids.into_iter().collect(),
            warnings,
        }
    }

    /// Bulk event generation for a schedule.
    ///
    /// Resolves targets and dates, skips (reptile, date) pairs that
    /// already have an event, and inserts the remainder unfed in one
    /// batch. Fails when the schedule or its targets are missing, or when
    /// the targets resolve to no reptiles at all.
    pub async fn generate_events(
        &self,
        organization_id: Uuid,
        schedule_id: Uuid,
        request: &GenerateEventsRequest,
    ) -> Result<GenerateEventsResponse, ApiError> {
        let schedule: FeedingSchedule = self
            .schedules
            .find_by_schedule_id(organization_id, schedule_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Feeding schedule not found".to_string()))?
            .into();

        let target_refs = self.load_target_refs(schedule.schedule_id).await?;
        if target_refs.is_empty() {
            return Err(ApiError::NotFound(
                "Feeding schedule has no targets".to_string(),
            ));
        }

        let resolved = self.resolve_targets(organization_id, &target_refs).await;
        if resolved.reptile_ids.is_empty() {
            return Err(ApiError::Validation(
                "Schedule targets resolve to no reptiles".to_string(),
            ));
        }

        let from = request.from.unwrap_or(schedule.start_date);
        let to = request
            .to
            .unwrap_or_else(|| effective_end(from, schedule.end_date));
        let dates = expand_dates(&schedule.rule(), from, to);
        if dates.is_empty() {
            return Ok(GenerateEventsResponse {
                created: 0,
                warnings: resolved.warnings,
            });
        }

        let existing: HashSet<(Uuid, NaiveDate)> = self
            .events
            .existing_pairs(schedule.schedule_id, from, to)
            .await?
            .into_iter()
            .collect();

        let mut staged = Vec::new();
        for &date in &dates {
            for &reptile_id in &resolved.reptile_ids {
                if !existing.contains(&(reptile_id, date)) {
                    staged.push(NewFeedingEvent::unfed(
                        organization_id,
                        schedule.schedule_id,
                        reptile_id,
                        date,
                    ));
                }
            }
        }

        let created = self.events.insert_batch(&staged).await?;

        info!(
            schedule_id = %schedule.schedule_id,
            reptiles = resolved.reptile_ids.len(),
            dates = dates.len(),
            created = created,
            "Feeding events generated"
        );

        Ok(GenerateEventsResponse {
            created,
            warnings: resolved.warnings,
        })
    }

    /// Today-only batch generation with strict recurrence semantics.
    ///
    /// The caller supplies the already-resolved reptile list. When today
    /// is not a feeding day under the strict check, nothing is created
    /// regardless of the list.
    pub async fn create_events_for_today(
        &self,
        organization_id: Uuid,
        schedule_id: Uuid,
        reptile_ids: &[Uuid],
        today: NaiveDate,
    ) -> Result<u64, ApiError> {
        let schedule: FeedingSchedule = self
            .schedules
            .find_by_schedule_id(organization_id, schedule_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Feeding schedule not found".to_string()))?
            .into();

        if schedule.end_date.map(|end| today > end).unwrap_or(false) {
            return Ok(0);
        }
        if !is_feeding_day(&schedule.rule(), today) {
            return Ok(0);
        }

        let existing: HashSet<Uuid> = self
            .events
            .existing_pairs(schedule.schedule_id, today, today)
            .await?
            .into_iter()
            .map(|(reptile_id, _)| reptile_id)
            .collect();

        let unique: HashSet<Uuid> = reptile_ids.iter().copied().collect();
        let staged: Vec<NewFeedingEvent> = unique
            .into_iter()
            .filter(|id| !existing.contains(id))
            .map(|id| NewFeedingEvent::unfed(organization_id, schedule.schedule_id, id, today))
            .collect();

        let created = self.events.insert_batch(&staged).await?;
        Ok(created)
    }

    /// Reactive generation after a reptile moves into a location.
    ///
    /// Finds active schedules targeting the location or any of its
    /// ancestors and evaluates today under the lenient semantics (weekly
    /// schedules accept any day from their start). A new event inherits
    /// the herd's completion: when every existing event for the schedule
    /// and day is already fed, the mover's event is created fed with
    /// `fed_at` stamped, on the assumption the keeper fed the whole group
    /// in one session.
    pub async fn handle_location_change(
        &self,
        organization_id: Uuid,
        reptile_id: Uuid,
        location_id: Uuid,
        today: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let Some(location) = self
            .locations
            .find_by_location_id(organization_id, location_id)
            .await?
        else {
            warn!(location_id = %location_id, "Location change for unknown location");
            return Ok(0);
        };

        let matching = self
            .schedules
            .find_active_matching_location(
                organization_id,
                location.location_id,
                location.room_id,
                location.rack_id,
                location.shelf_level,
            )
            .await?;

        let mut created = 0;
        for entity in matching {
            let schedule: FeedingSchedule = entity.into();

            if schedule.end_date.map(|end| today > end).unwrap_or(false) {
                continue;
            }
            if !is_feeding_day_lenient(&schedule.rule(), today) {
                continue;
            }
            if self
                .events
                .exists(schedule.schedule_id, reptile_id, today)
                .await?
            {
                continue;
            }

            let herd = self
                .events
                .find_for_schedule_on_date(schedule.schedule_id, today)
                .await?;
            let inherit_fed = !herd.is_empty() && herd.iter().all(|e| e.fed);

            let event = NewFeedingEvent {
                organization_id,
                schedule_id: schedule.schedule_id,
                reptile_id,
                scheduled_date: today,
                fed: inherit_fed,
                fed_at: inherit_fed.then(Utc::now),
            };
            created += self.events.insert_batch(&[event]).await?;

            info!(
                schedule_id = %schedule.schedule_id,
                reptile_id = %reptile_id,
                inherited_fed = inherit_fed,
                "Feeding event created for relocated reptile"
            );
        }

        Ok(created)
    }

    /// A schedule's target references, malformed rows dropped.
    pub async fn load_target_refs(&self, schedule_id: Uuid) -> Result<Vec<TargetRef>, ApiError> {
        let rows = self.targets.find_by_schedule_id(schedule_id).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.target_ref())
            .collect())
    }
}
