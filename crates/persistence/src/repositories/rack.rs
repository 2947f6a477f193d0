//! Rack repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RackEntity;
use crate::metrics::QueryTimer;

/// Repository for rack-related database operations.
#[derive(Clone)]
pub struct RackRepository {
    pool: PgPool,
}

impl RackRepository {
    /// Creates a new RackRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new rack.
    pub async fn create(
        &self,
        organization_id: Uuid,
        name: &str,
        room_id: Option<Uuid>,
        shelf_count: i32,
    ) -> Result<RackEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_rack");
        let result = sqlx::query_as::<_, RackEntity>(
            r#"
            INSERT INTO racks (organization_id, name, room_id, shelf_count)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(room_id)
        .bind(shelf_count)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a rack by UUID within an organization.
    pub async fn find_by_rack_id(
        &self,
        organization_id: Uuid,
        rack_id: Uuid,
    ) -> Result<Option<RackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_rack_by_id");
        let result = sqlx::query_as::<_, RackEntity>(
            r#"
            SELECT * FROM racks WHERE organization_id = $1 AND rack_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(rack_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all racks for an organization.
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<RackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_racks");
        let result = sqlx::query_as::<_, RackEntity>(
            r#"
            SELECT * FROM racks WHERE organization_id = $1 ORDER BY name
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a rack (partial update).
    pub async fn update(
        &self,
        organization_id: Uuid,
        rack_id: Uuid,
        name: Option<&str>,
        room_id: Option<Uuid>,
        shelf_count: Option<i32>,
    ) -> Result<Option<RackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_rack");
        let result = sqlx::query_as::<_, RackEntity>(
            r#"
            UPDATE racks SET
                name = COALESCE($3, name),
                room_id = COALESCE($4, room_id),
                shelf_count = COALESCE($5, shelf_count),
                updated_at = NOW()
            WHERE organization_id = $1 AND rack_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(rack_id)
        .bind(name)
        .bind(room_id)
        .bind(shelf_count)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a rack. Returns the number of rows deleted (0 or 1).
    pub async fn delete(
        &self,
        organization_id: Uuid,
        rack_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_rack");
        let result = sqlx::query(
            r#"
            DELETE FROM racks WHERE organization_id = $1 AND rack_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(rack_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
