//! Breeding project repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::BreedingProjectEntity;
use crate::metrics::QueryTimer;

/// Repository for breeding project database operations.
#[derive(Clone)]
pub struct BreedingProjectRepository {
    pool: PgPool,
}

impl BreedingProjectRepository {
    /// Creates a new BreedingProjectRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new breeding project in the `planned` stage.
    pub async fn create(
        &self,
        organization_id: Uuid,
        name: &str,
        sire_id: Uuid,
        dam_id: Uuid,
        season_year: i32,
        notes: Option<&str>,
    ) -> Result<BreedingProjectEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_breeding_project");
        let result = sqlx::query_as::<_, BreedingProjectEntity>(
            r#"
            INSERT INTO breeding_projects (organization_id, name, sire_id, dam_id,
                                           season_year, status, notes)
            VALUES ($1, $2, $3, $4, $5, 'planned', $6)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(sire_id)
        .bind(dam_id)
        .bind(season_year)
        .bind(notes)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a project by UUID within an organization.
    pub async fn find_by_project_id(
        &self,
        organization_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<BreedingProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_breeding_project_by_id");
        let result = sqlx::query_as::<_, BreedingProjectEntity>(
            r#"
            SELECT * FROM breeding_projects
            WHERE organization_id = $1 AND project_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all projects for an organization, newest season first.
    pub async fn list(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<BreedingProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_breeding_projects");
        let result = sqlx::query_as::<_, BreedingProjectEntity>(
            r#"
            SELECT * FROM breeding_projects
            WHERE organization_id = $1
            ORDER BY season_year DESC, name
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a project's dates, counts, and notes (partial update).
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        organization_id: Uuid,
        project_id: Uuid,
        name: Option<&str>,
        paired_on: Option<NaiveDate>,
        laid_on: Option<NaiveDate>,
        hatched_on: Option<NaiveDate>,
        eggs_laid: Option<i32>,
        eggs_hatched: Option<i32>,
        notes: Option<&str>,
    ) -> Result<Option<BreedingProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_breeding_project");
        let result = sqlx::query_as::<_, BreedingProjectEntity>(
            r#"
            UPDATE breeding_projects SET
                name = COALESCE($3, name),
                paired_on = COALESCE($4, paired_on),
                laid_on = COALESCE($5, laid_on),
                hatched_on = COALESCE($6, hatched_on),
                eggs_laid = COALESCE($7, eggs_laid),
                eggs_hatched = COALESCE($8, eggs_hatched),
                notes = COALESCE($9, notes),
                updated_at = NOW()
            WHERE organization_id = $1 AND project_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(project_id)
        .bind(name)
        .bind(paired_on)
        .bind(laid_on)
        .bind(hatched_on)
        .bind(eggs_laid)
        .bind(eggs_hatched)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set a project's status.
    ///
    /// Transition legality is validated in the domain model before this
    /// is called.
    pub async fn update_status(
        &self,
        organization_id: Uuid,
        project_id: Uuid,
        status: &str,
    ) -> Result<Option<BreedingProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_breeding_status");
        let result = sqlx::query_as::<_, BreedingProjectEntity>(
            r#"
            UPDATE breeding_projects SET
                status = $3,
                updated_at = NOW()
            WHERE organization_id = $1 AND project_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(project_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a project. Returns the number of rows deleted (0 or 1).
    pub async fn delete(
        &self,
        organization_id: Uuid,
        project_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_breeding_project");
        let result = sqlx::query(
            r#"
            DELETE FROM breeding_projects
            WHERE organization_id = $1 AND project_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(project_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
