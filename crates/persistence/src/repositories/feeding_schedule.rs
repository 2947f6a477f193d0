//! Feeding schedule repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::FeedingScheduleEntity;
use crate::metrics::QueryTimer;

/// Repository for feeding schedule database operations.
#[derive(Clone)]
pub struct FeedingScheduleRepository {
    pool: PgPool,
}

impl FeedingScheduleRepository {
    /// Creates a new FeedingScheduleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new feeding schedule.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        organization_id: Uuid,
        name: &str,
        recurrence: &str,
        interval_days: Option<i32>,
        days_of_week: Option<&[i16]>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        active: bool,
    ) -> Result<FeedingScheduleEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_feeding_schedule");
        let result = sqlx::query_as::<_, FeedingScheduleEntity>(
            r#"
            INSERT INTO feeding_schedules (organization_id, name, recurrence, interval_days,
                                           days_of_week, start_date, end_date, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(recurrence)
        .bind(interval_days)
        .bind(days_of_week)
        .bind(start_date)
        .bind(end_date)
        .bind(active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a schedule by UUID within an organization.
    pub async fn find_by_schedule_id(
        &self,
        organization_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<Option<FeedingScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_feeding_schedule_by_id");
        let result = sqlx::query_as::<_, FeedingScheduleEntity>(
            r#"
            SELECT * FROM feeding_schedules
            WHERE organization_id = $1 AND schedule_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all schedules for an organization.
    pub async fn list(
        &self,
        organization_id: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<FeedingScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_feeding_schedules");
        let result = sqlx::query_as::<_, FeedingScheduleEntity>(
            r#"
            SELECT * FROM feeding_schedules
            WHERE organization_id = $1 AND ($2 OR active)
            ORDER BY name
            "#,
        )
        .bind(organization_id)
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List every active schedule across all organizations.
    ///
    /// Used by the daily materialization job.
    pub async fn list_all_active(&self) -> Result<Vec<FeedingScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_active_feeding_schedules");
        let result = sqlx::query_as::<_, FeedingScheduleEntity>(
            r#"
            SELECT * FROM feeding_schedules WHERE active ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Active schedules with a target matching any of a location's
    /// ancestry: the location itself, its rack, its room, or its
    /// (rack, shelf level) pair.
    pub async fn find_active_matching_location(
        &self,
        organization_id: Uuid,
        location_id: Uuid,
        room_id: Option<Uuid>,
        rack_id: Option<Uuid>,
        shelf_level: Option<i32>,
    ) -> Result<Vec<FeedingScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_schedules_matching_location");
        let result = sqlx::query_as::<_, FeedingScheduleEntity>(
            r#"
            SELECT DISTINCT s.* FROM feeding_schedules s
            JOIN feeding_targets t ON t.schedule_id = s.schedule_id
            WHERE s.organization_id = $1
              AND s.active
              AND (
                   (t.target_type = 'location' AND t.target_id = $2)
                OR ($3::uuid IS NOT NULL AND t.target_type = 'room' AND t.target_id = $3)
                OR ($4::uuid IS NOT NULL AND t.target_type = 'rack' AND t.target_id = $4)
                OR ($4::uuid IS NOT NULL AND $5::int IS NOT NULL
                    AND t.target_type = 'level'
                    AND t.target_id = $4 AND t.shelf_level = $5)
              )
            "#,
        )
        .bind(organization_id)
        .bind(location_id)
        .bind(room_id)
        .bind(rack_id)
        .bind(shelf_level)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a schedule's administrative fields (partial update).
    pub async fn update(
        &self,
        organization_id: Uuid,
        schedule_id: Uuid,
        name: Option<&str>,
        end_date: Option<NaiveDate>,
        active: Option<bool>,
    ) -> Result<Option<FeedingScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_feeding_schedule");
        let result = sqlx::query_as::<_, FeedingScheduleEntity>(
            r#"
            UPDATE feeding_schedules SET
                name = COALESCE($3, name),
                end_date = COALESCE($4, end_date),
                active = COALESCE($5, active),
                updated_at = NOW()
            WHERE organization_id = $1 AND schedule_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(schedule_id)
        .bind(name)
        .bind(end_date)
        .bind(active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count active schedules in an organization.
    pub async fn count_active(&self, organization_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_active_feeding_schedules");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM feeding_schedules WHERE organization_id = $1 AND active
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// Delete a schedule. Returns the number of rows deleted (0 or 1).
    pub async fn delete(
        &self,
        organization_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_feeding_schedule");
        let result = sqlx::query(
            r#"
            DELETE FROM feeding_schedules
            WHERE organization_id = $1 AND schedule_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(schedule_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
