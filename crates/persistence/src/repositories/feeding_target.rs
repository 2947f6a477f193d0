//! Feeding target repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::feeding::TargetRef;

use crate::entities::FeedingTargetEntity;
use crate::metrics::QueryTimer;

/// Repository for feeding target database operations.
#[derive(Clone)]
pub struct FeedingTargetRepository {
    pool: PgPool,
}

/// Flattens target references into parallel column arrays for UNNEST.
fn to_columns(targets: &[TargetRef]) -> (Vec<String>, Vec<Uuid>, Vec<Option<i32>>) {
    let mut types = Vec::with_capacity(targets.len());
    let mut ids = Vec::with_capacity(targets.len());
    let mut levels = Vec::with_capacity(targets.len());
    for target in targets {
        let (id, level) = match *target {
            TargetRef::Reptile { reptile_id } => (reptile_id, None),
            TargetRef::Location { location_id } => (location_id, None),
            TargetRef::Room { room_id } => (room_id, None),
            TargetRef::Rack { rack_id } => (rack_id, None),
            TargetRef::Level {
                rack_id,
                shelf_level,
            } => (rack_id, Some(shelf_level)),
        };
        types.push(target.type_str().to_string());
        ids.push(id);
        levels.push(level);
    }
    (types, ids, levels)
}

impl FeedingTargetRepository {
    /// Creates a new FeedingTargetRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a batch of targets for a schedule.
    pub async fn insert_batch(
        &self,
        schedule_id: Uuid,
        targets: &[TargetRef],
    ) -> Result<u64, sqlx::Error> {
        if targets.is_empty() {
            return Ok(0);
        }

        let timer = QueryTimer::new("insert_feeding_targets");
        let (types, ids, levels) = to_columns(targets);
        let result = sqlx::query(
            r#"
            INSERT INTO feeding_targets (schedule_id, target_type, target_id, shelf_level)
            SELECT $1, t, i, l
            FROM UNNEST($2::text[], $3::uuid[], $4::int[]) AS u(t, i, l)
            "#,
        )
        .bind(schedule_id)
        .bind(&types)
        .bind(&ids)
        .bind(&levels)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Replace all targets of a schedule with a new set, atomically.
    pub async fn replace_for_schedule(
        &self,
        schedule_id: Uuid,
        targets: &[TargetRef],
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("replace_feeding_targets");
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM feeding_targets WHERE schedule_id = $1
            "#,
        )
        .bind(schedule_id)
        .execute(&mut *tx)
        .await?;

        let mut inserted = 0;
        if !targets.is_empty() {
            let (types, ids, levels) = to_columns(targets);
            let result = sqlx::query(
                r#"
                INSERT INTO feeding_targets (schedule_id, target_type, target_id, shelf_level)
                SELECT $1, t, i, l
                FROM UNNEST($2::text[], $3::uuid[], $4::int[]) AS u(t, i, l)
                "#,
            )
            .bind(schedule_id)
            .bind(&types)
            .bind(&ids)
            .bind(&levels)
            .execute(&mut *tx)
            .await?;
            inserted = result.rows_affected();
        }

        tx.commit().await?;
        timer.record();
        Ok(inserted)
    }

    /// All targets of a schedule.
    pub async fn find_by_schedule_id(
        &self,
        schedule_id: Uuid,
    ) -> Result<Vec<FeedingTargetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_feeding_targets_by_schedule");
        let result = sqlx::query_as::<_, FeedingTargetEntity>(
            r#"
            SELECT * FROM feeding_targets WHERE schedule_id = $1 ORDER BY id
            "#,
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_columns_flattens_level_pairs() {
        let rack_id = Uuid::new_v4();
        let reptile_id = Uuid::new_v4();
        let targets = vec![
            TargetRef::Reptile { reptile_id },
            TargetRef::Level {
                rack_id,
                shelf_level: 3,
            },
        ];

        let (types, ids, levels) = to_columns(&targets);
        assert_eq!(types, vec!["reptile", "level"]);
        assert_eq!(ids, vec![reptile_id, rack_id]);
        assert_eq!(levels, vec![None, Some(3)]);
    }
}
