//! Organization repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::OrganizationEntity;
use crate::metrics::QueryTimer;

/// Repository for organization-related database operations.
#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    /// Creates a new OrganizationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new organization.
    pub async fn create(&self, name: &str) -> Result<OrganizationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_organization");
        let result = sqlx::query_as::<_, OrganizationEntity>(
            r#"
            INSERT INTO organizations (name)
            VALUES ($1)
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an organization by UUID.
    pub async fn find_by_organization_id(
        &self,
        organization_id: Uuid,
    ) -> Result<Option<OrganizationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_organization_by_id");
        let result = sqlx::query_as::<_, OrganizationEntity>(
            r#"
            SELECT * FROM organizations WHERE organization_id = $1
            "#,
        )
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count all organizations.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_organizations");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM organizations
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }
}
