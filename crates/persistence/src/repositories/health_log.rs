//! Health log repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::HealthLogEntity;
use crate::metrics::QueryTimer;

/// Repository for health log database operations.
#[derive(Clone)]
pub struct HealthLogRepository {
    pool: PgPool,
}

impl HealthLogRepository {
    /// Creates a new HealthLogRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new health log entry.
    pub async fn create(
        &self,
        organization_id: Uuid,
        reptile_id: Uuid,
        log_type: &str,
        weight_grams: Option<f64>,
        notes: Option<&str>,
        logged_at: DateTime<Utc>,
    ) -> Result<HealthLogEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_health_log");
        let result = sqlx::query_as::<_, HealthLogEntity>(
            r#"
            INSERT INTO health_logs (organization_id, reptile_id, log_type,
                                     weight_grams, notes, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(reptile_id)
        .bind(log_type)
        .bind(weight_grams)
        .bind(notes)
        .bind(logged_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Keyset-paginated history for a reptile, newest first.
    ///
    /// `before` is the (logged_at, id) pair decoded from the request
    /// cursor; rows strictly older than it are returned.
    pub async fn history(
        &self,
        organization_id: Uuid,
        reptile_id: Uuid,
        log_type: Option<&str>,
        before: Option<(DateTime<Utc>, i64)>,
        limit: i64,
    ) -> Result<Vec<HealthLogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("health_log_history");
        let (before_at, before_id) = match before {
            Some((at, id)) => (Some(at), Some(id)),
            None => (None, None),
        };
        let result = sqlx::query_as::<_, HealthLogEntity>(
            r#"
            SELECT * FROM health_logs
            WHERE organization_id = $1
              AND reptile_id = $2
              AND ($3::text IS NULL OR log_type = $3)
              AND ($4::timestamptz IS NULL OR (logged_at, id) < ($4, $5))
            ORDER BY logged_at DESC, id DESC
            LIMIT $6
            "#,
        )
        .bind(organization_id)
        .bind(reptile_id)
        .bind(log_type)
        .bind(before_at)
        .bind(before_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a health log entry. Returns the number of rows deleted.
    pub async fn delete(
        &self,
        organization_id: Uuid,
        log_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_health_log");
        let result = sqlx::query(
            r#"
            DELETE FROM health_logs WHERE organization_id = $1 AND log_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(log_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
