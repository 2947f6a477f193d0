//! Room repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RoomEntity;
use crate::metrics::QueryTimer;

/// Repository for room-related database operations.
#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Creates a new RoomRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new room.
    pub async fn create(
        &self,
        organization_id: Uuid,
        name: &str,
        notes: Option<&str>,
    ) -> Result<RoomEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_room");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            INSERT INTO rooms (organization_id, name, notes)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(notes)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a room by UUID within an organization.
    pub async fn find_by_room_id(
        &self,
        organization_id: Uuid,
        room_id: Uuid,
    ) -> Result<Option<RoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_room_by_id");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            SELECT * FROM rooms WHERE organization_id = $1 AND room_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all rooms for an organization.
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<RoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_rooms");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            SELECT * FROM rooms WHERE organization_id = $1 ORDER BY name
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a room (partial update).
    pub async fn update(
        &self,
        organization_id: Uuid,
        room_id: Uuid,
        name: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<RoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_room");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            UPDATE rooms SET
                name = COALESCE($3, name),
                notes = COALESCE($4, notes),
                updated_at = NOW()
            WHERE organization_id = $1 AND room_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(room_id)
        .bind(name)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a room. Returns the number of rows deleted (0 or 1).
    pub async fn delete(
        &self,
        organization_id: Uuid,
        room_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_room");
        let result = sqlx::query(
            r#"
            DELETE FROM rooms WHERE organization_id = $1 AND room_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(room_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
