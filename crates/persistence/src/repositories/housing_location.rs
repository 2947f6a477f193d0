//! Housing location repository for database operations.
//!
//! Besides CRUD, this repository carries the hierarchy hops the feeding
//! target resolver needs: room → locations, rack → locations, and
//! (rack, shelf levels) → locations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::HousingLocationEntity;
use crate::metrics::QueryTimer;

/// Repository for housing location database operations.
#[derive(Clone)]
pub struct HousingLocationRepository {
    pool: PgPool,
}

impl HousingLocationRepository {
    /// Creates a new HousingLocationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new housing location.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        organization_id: Uuid,
        label: &str,
        room_id: Option<Uuid>,
        rack_id: Option<Uuid>,
        shelf_level: Option<i32>,
        position: Option<i32>,
        notes: Option<&str>,
    ) -> Result<HousingLocationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_location");
        let result = sqlx::query_as::<_, HousingLocationEntity>(
            r#"
            INSERT INTO housing_locations (organization_id, label, room_id, rack_id,
                                           shelf_level, position, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(label)
        .bind(room_id)
        .bind(rack_id)
        .bind(shelf_level)
        .bind(position)
        .bind(notes)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a location by UUID within an organization.
    pub async fn find_by_location_id(
        &self,
        organization_id: Uuid,
        location_id: Uuid,
    ) -> Result<Option<HousingLocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_location_by_id");
        let result = sqlx::query_as::<_, HousingLocationEntity>(
            r#"
            SELECT * FROM housing_locations
            WHERE organization_id = $1 AND location_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List locations, optionally filtered by room, rack, or availability.
    pub async fn list(
        &self,
        organization_id: Uuid,
        room_id: Option<Uuid>,
        rack_id: Option<Uuid>,
        available_only: bool,
    ) -> Result<Vec<HousingLocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_locations");
        let result = sqlx::query_as::<_, HousingLocationEntity>(
            r#"
            SELECT l.* FROM housing_locations l
            WHERE l.organization_id = $1
              AND ($2::uuid IS NULL OR l.room_id = $2)
              AND ($3::uuid IS NULL OR l.rack_id = $3)
              AND (NOT $4 OR NOT EXISTS (
                    SELECT 1 FROM reptiles r
                    WHERE r.location_id = l.location_id AND r.active
              ))
            ORDER BY l.label
            "#,
        )
        .bind(organization_id)
        .bind(room_id)
        .bind(rack_id)
        .bind(available_only)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Location ids of every location in any of the given rooms.
    pub async fn find_ids_by_room_ids(
        &self,
        organization_id: Uuid,
        room_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("find_location_ids_by_rooms");
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT location_id FROM housing_locations
            WHERE organization_id = $1 AND room_id = ANY($2)
            "#,
        )
        .bind(organization_id)
        .bind(room_ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Location ids of every location in any of the given racks.
    pub async fn find_ids_by_rack_ids(
        &self,
        organization_id: Uuid,
        rack_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("find_location_ids_by_racks");
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT location_id FROM housing_locations
            WHERE organization_id = $1 AND rack_id = ANY($2)
            "#,
        )
        .bind(organization_id)
        .bind(rack_ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Location ids on the given shelf levels of one rack.
    ///
    /// One call per rack keeps level targets batched without ever mixing
    /// levels across racks.
    pub async fn find_ids_by_rack_and_levels(
        &self,
        organization_id: Uuid,
        rack_id: Uuid,
        levels: &[i32],
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("find_location_ids_by_rack_levels");
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT location_id FROM housing_locations
            WHERE organization_id = $1 AND rack_id = $2 AND shelf_level = ANY($3)
            "#,
        )
        .bind(organization_id)
        .bind(rack_id)
        .bind(levels)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Update a location (partial update).
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        organization_id: Uuid,
        location_id: Uuid,
        label: Option<&str>,
        room_id: Option<Uuid>,
        rack_id: Option<Uuid>,
        shelf_level: Option<i32>,
        position: Option<i32>,
        notes: Option<&str>,
    ) -> Result<Option<HousingLocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_location");
        let result = sqlx::query_as::<_, HousingLocationEntity>(
            r#"
            UPDATE housing_locations SET
                label = COALESCE($3, label),
                room_id = COALESCE($4, room_id),
                rack_id = COALESCE($5, rack_id),
                shelf_level = COALESCE($6, shelf_level),
                position = COALESCE($7, position),
                notes = COALESCE($8, notes),
                updated_at = NOW()
            WHERE organization_id = $1 AND location_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(location_id)
        .bind(label)
        .bind(room_id)
        .bind(rack_id)
        .bind(shelf_level)
        .bind(position)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a location. Returns the number of rows deleted (0 or 1).
    pub async fn delete(
        &self,
        organization_id: Uuid,
        location_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_location");
        let result = sqlx::query(
            r#"
            DELETE FROM housing_locations
            WHERE organization_id = $1 AND location_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(location_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
