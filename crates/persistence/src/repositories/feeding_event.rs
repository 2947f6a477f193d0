//! Feeding event repository for database operations.
//!
//! The materializer's persistence contract lives here. Event uniqueness is
//! enforced by the table's UNIQUE (schedule_id, reptile_id, scheduled_date)
//! constraint; every insert uses ON CONFLICT DO NOTHING so concurrent
//! generation runs stay idempotent instead of racing a read-then-write.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::FeedingEventEntity;
use crate::metrics::QueryTimer;

/// Input row for event materialization.
#[derive(Debug, Clone)]
pub struct NewFeedingEvent {
    pub organization_id: Uuid,
    pub schedule_id: Uuid,
    pub reptile_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub fed: bool,
    pub fed_at: Option<DateTime<Utc>>,
}

impl NewFeedingEvent {
    /// An unfed event, the materializer's default.
    pub fn unfed(
        organization_id: Uuid,
        schedule_id: Uuid,
        reptile_id: Uuid,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            organization_id,
            schedule_id,
            reptile_id,
            scheduled_date,
            fed: false,
            fed_at: None,
        }
    }
}

/// Repository for feeding event database operations.
#[derive(Clone)]
pub struct FeedingEventRepository {
    pool: PgPool,
}

impl FeedingEventRepository {
    /// Creates a new FeedingEventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a batch of events, skipping rows whose
    /// (schedule, reptile, date) already exists.
    ///
    /// Returns the number of rows actually created.
    pub async fn insert_batch(&self, events: &[NewFeedingEvent]) -> Result<u64, sqlx::Error> {
        if events.is_empty() {
            return Ok(0);
        }

        let timer = QueryTimer::new("insert_feeding_events");
        let mut org_ids = Vec::with_capacity(events.len());
        let mut schedule_ids = Vec::with_capacity(events.len());
        let mut reptile_ids = Vec::with_capacity(events.len());
        let mut dates = Vec::with_capacity(events.len());
        let mut fed_flags = Vec::with_capacity(events.len());
        let mut fed_ats = Vec::with_capacity(events.len());
        for event in events {
            org_ids.push(event.organization_id);
            schedule_ids.push(event.schedule_id);
            reptile_ids.push(event.reptile_id);
            dates.push(event.scheduled_date);
            fed_flags.push(event.fed);
            fed_ats.push(event.fed_at);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO feeding_events (organization_id, schedule_id, reptile_id,
                                        scheduled_date, fed, fed_at)
            SELECT o, s, r, d, f, fa
            FROM UNNEST($1::uuid[], $2::uuid[], $3::uuid[], $4::date[],
                        $5::bool[], $6::timestamptz[]) AS u(o, s, r, d, f, fa)
            ON CONFLICT (schedule_id, reptile_id, scheduled_date) DO NOTHING
            "#,
        )
        .bind(&org_ids)
        .bind(&schedule_ids)
        .bind(&reptile_ids)
        .bind(&dates)
        .bind(&fed_flags)
        .bind(&fed_ats)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Existing (reptile, date) pairs for a schedule within a date range.
    ///
    /// The bulk materializer uses this to skip already-persisted pairs in
    /// one query instead of a point read per combination.
    pub async fn existing_pairs(
        &self,
        schedule_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(Uuid, NaiveDate)>, sqlx::Error> {
        let timer = QueryTimer::new("find_existing_event_pairs");
        let rows: Vec<(Uuid, NaiveDate)> = sqlx::query_as(
            r#"
            SELECT reptile_id, scheduled_date FROM feeding_events
            WHERE schedule_id = $1 AND scheduled_date >= $2 AND scheduled_date <= $3
            "#,
        )
        .bind(schedule_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(rows)
    }

    /// Whether an event exists for (schedule, reptile, date).
    pub async fn exists(
        &self,
        schedule_id: Uuid,
        reptile_id: Uuid,
        scheduled_date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("feeding_event_exists");
        let row: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM feeding_events
                WHERE schedule_id = $1 AND reptile_id = $2 AND scheduled_date = $3
            )
            "#,
        )
        .bind(schedule_id)
        .bind(reptile_id)
        .bind(scheduled_date)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(row.0)
    }

    /// All events of a schedule on one date.
    pub async fn find_for_schedule_on_date(
        &self,
        schedule_id: Uuid,
        scheduled_date: NaiveDate,
    ) -> Result<Vec<FeedingEventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_events_on_date");
        let result = sqlx::query_as::<_, FeedingEventEntity>(
            r#"
            SELECT * FROM feeding_events
            WHERE schedule_id = $1 AND scheduled_date = $2
            ORDER BY id
            "#,
        )
        .bind(schedule_id)
        .bind(scheduled_date)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a schedule's events, optionally bounded and per reptile.
    pub async fn list_for_schedule(
        &self,
        schedule_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        reptile_id: Option<Uuid>,
    ) -> Result<Vec<FeedingEventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events_for_schedule");
        let result = sqlx::query_as::<_, FeedingEventEntity>(
            r#"
            SELECT * FROM feeding_events
            WHERE schedule_id = $1
              AND ($2::date IS NULL OR scheduled_date >= $2)
              AND ($3::date IS NULL OR scheduled_date <= $3)
              AND ($4::uuid IS NULL OR reptile_id = $4)
            ORDER BY scheduled_date, reptile_id
            "#,
        )
        .bind(schedule_id)
        .bind(from)
        .bind(to)
        .bind(reptile_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event by UUID within an organization.
    pub async fn find_by_event_id(
        &self,
        organization_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<FeedingEventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, FeedingEventEntity>(
            r#"
            SELECT * FROM feeding_events
            WHERE organization_id = $1 AND event_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark an event fed or unfed.
    ///
    /// `fed_at` is stamped exactly on the false→true transition and
    /// cleared when the event is unmarked.
    pub async fn mark(
        &self,
        organization_id: Uuid,
        event_id: Uuid,
        fed: bool,
        notes: Option<&str>,
        feeder_size_id: Option<Uuid>,
    ) -> Result<Option<FeedingEventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("mark_feeding_event");
        let result = sqlx::query_as::<_, FeedingEventEntity>(
            r#"
            UPDATE feeding_events SET
                fed = $3,
                fed_at = CASE
                    WHEN $3 AND NOT fed THEN NOW()
                    WHEN NOT $3 THEN NULL
                    ELSE fed_at
                END,
                notes = COALESCE($4, notes),
                feeder_size_id = COALESCE($5, feeder_size_id),
                updated_at = NOW()
            WHERE organization_id = $1 AND event_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(event_id)
        .bind(fed)
        .bind(notes)
        .bind(feeder_size_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// (total, fed) event counts for an organization on one date.
    pub async fn daily_counts(
        &self,
        organization_id: Uuid,
        scheduled_date: NaiveDate,
    ) -> Result<(i64, i64), sqlx::Error> {
        let timer = QueryTimer::new("daily_event_counts");
        let row: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE fed)
            FROM feeding_events
            WHERE organization_id = $1 AND scheduled_date = $2
            "#,
        )
        .bind(organization_id)
        .bind(scheduled_date)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfed_constructor() {
        let event = NewFeedingEvent::unfed(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        );
        assert!(!event.fed);
        assert!(event.fed_at.is_none());
    }
}
