//! Reptile repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::reptile::CreateReptileRequest;

use crate::entities::ReptileEntity;
use crate::metrics::QueryTimer;

/// Repository for reptile-related database operations.
#[derive(Clone)]
pub struct ReptileRepository {
    pool: PgPool,
}

impl ReptileRepository {
    /// Creates a new ReptileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new reptile.
    pub async fn create(
        &self,
        organization_id: Uuid,
        request: &CreateReptileRequest,
    ) -> Result<ReptileEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_reptile");
        let result = sqlx::query_as::<_, ReptileEntity>(
            r#"
            INSERT INTO reptiles (organization_id, name, species, morph, sex, hatch_date,
                                  acquired_on, location_id, sire_id, dam_id, active, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(&request.name)
        .bind(&request.species)
        .bind(&request.morph)
        .bind(request.sex.as_str())
        .bind(request.hatch_date)
        .bind(request.acquired_on)
        .bind(request.location_id)
        .bind(request.sire_id)
        .bind(request.dam_id)
        .bind(request.active)
        .bind(&request.notes)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a reptile by UUID within an organization.
    pub async fn find_by_reptile_id(
        &self,
        organization_id: Uuid,
        reptile_id: Uuid,
    ) -> Result<Option<ReptileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_reptile_by_id");
        let result = sqlx::query_as::<_, ReptileEntity>(
            r#"
            SELECT * FROM reptiles WHERE organization_id = $1 AND reptile_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(reptile_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a reptile by exact name within an organization.
    ///
    /// Used by bulk import to resolve sire/dam references; ambiguous names
    /// resolve to the oldest record.
    pub async fn find_by_name(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> Result<Option<ReptileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_reptile_by_name");
        let result = sqlx::query_as::<_, ReptileEntity>(
            r#"
            SELECT * FROM reptiles
            WHERE organization_id = $1 AND name = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List reptiles with optional filters.
    pub async fn list(
        &self,
        organization_id: Uuid,
        include_inactive: bool,
        location_id: Option<Uuid>,
        species: Option<&str>,
    ) -> Result<Vec<ReptileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_reptiles");
        let result = sqlx::query_as::<_, ReptileEntity>(
            r#"
            SELECT * FROM reptiles
            WHERE organization_id = $1
              AND ($2 OR active)
              AND ($3::uuid IS NULL OR location_id = $3)
              AND ($4::text IS NULL OR species = $4)
            ORDER BY name
            "#,
        )
        .bind(organization_id)
        .bind(include_inactive)
        .bind(location_id)
        .bind(species)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Ids of active reptiles housed in any of the given locations.
    pub async fn find_ids_by_location_ids(
        &self,
        organization_id: Uuid,
        location_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("find_reptile_ids_by_locations");
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT reptile_id FROM reptiles
            WHERE organization_id = $1 AND active AND location_id = ANY($2)
            "#,
        )
        .bind(organization_id)
        .bind(location_ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Update a reptile's scalar fields (partial update).
    ///
    /// Location moves go through [`Self::update_location`] so the caller
    /// can distinguish "unchanged" from "moved out of housing".
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        organization_id: Uuid,
        reptile_id: Uuid,
        name: Option<&str>,
        species: Option<&str>,
        morph: Option<&str>,
        sex: Option<&str>,
        hatch_date: Option<chrono::NaiveDate>,
        active: Option<bool>,
        notes: Option<&str>,
    ) -> Result<Option<ReptileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_reptile");
        let result = sqlx::query_as::<_, ReptileEntity>(
            r#"
            UPDATE reptiles SET
                name = COALESCE($3, name),
                species = COALESCE($4, species),
                morph = COALESCE($5, morph),
                sex = COALESCE($6, sex),
                hatch_date = COALESCE($7, hatch_date),
                active = COALESCE($8, active),
                notes = COALESCE($9, notes),
                updated_at = NOW()
            WHERE organization_id = $1 AND reptile_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(reptile_id)
        .bind(name)
        .bind(species)
        .bind(morph)
        .bind(sex)
        .bind(hatch_date)
        .bind(active)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Move a reptile to a location (or out of housing with `None`).
    pub async fn update_location(
        &self,
        organization_id: Uuid,
        reptile_id: Uuid,
        location_id: Option<Uuid>,
    ) -> Result<Option<ReptileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_reptile_location");
        let result = sqlx::query_as::<_, ReptileEntity>(
            r#"
            UPDATE reptiles SET
                location_id = $3,
                updated_at = NOW()
            WHERE organization_id = $1 AND reptile_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(reptile_id)
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set a reptile's parent links.
    pub async fn link_parents(
        &self,
        organization_id: Uuid,
        reptile_id: Uuid,
        sire_id: Option<Uuid>,
        dam_id: Option<Uuid>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("link_reptile_parents");
        let result = sqlx::query(
            r#"
            UPDATE reptiles SET
                sire_id = COALESCE($3, sire_id),
                dam_id = COALESCE($4, dam_id),
                updated_at = NOW()
            WHERE organization_id = $1 AND reptile_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(reptile_id)
        .bind(sire_id)
        .bind(dam_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Count active reptiles in an organization.
    pub async fn count_active(&self, organization_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_active_reptiles");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM reptiles WHERE organization_id = $1 AND active
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// Delete a reptile. Returns the number of rows deleted (0 or 1).
    pub async fn delete(
        &self,
        organization_id: Uuid,
        reptile_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_reptile");
        let result = sqlx::query(
            r#"
            DELETE FROM reptiles WHERE organization_id = $1 AND reptile_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(reptile_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
