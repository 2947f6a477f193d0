//! Feeder size repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::FeederSizeEntity;
use crate::metrics::QueryTimer;

/// Feeder sizes seeded for a new organization.
const DEFAULT_SIZES: [&str; 6] = [
    "pinky",
    "fuzzy",
    "hopper",
    "adult mouse",
    "small rat",
    "medium rat",
];

/// Repository for feeder size database operations.
#[derive(Clone)]
pub struct FeederSizeRepository {
    pool: PgPool,
}

impl FeederSizeRepository {
    /// Creates a new FeederSizeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List feeder sizes for an organization, smallest first.
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<FeederSizeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_feeder_sizes");
        let result = sqlx::query_as::<_, FeederSizeEntity>(
            r#"
            SELECT * FROM feeder_sizes
            WHERE organization_id = $1
            ORDER BY sort_order, name
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a feeder size by UUID within an organization.
    pub async fn find_by_feeder_size_id(
        &self,
        organization_id: Uuid,
        feeder_size_id: Uuid,
    ) -> Result<Option<FeederSizeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_feeder_size_by_id");
        let result = sqlx::query_as::<_, FeederSizeEntity>(
            r#"
            SELECT * FROM feeder_sizes
            WHERE organization_id = $1 AND feeder_size_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(feeder_size_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Seed the default feeder sizes for an organization (idempotent).
    pub async fn seed_defaults(&self, organization_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("seed_feeder_sizes");
        let names: Vec<String> = DEFAULT_SIZES.iter().map(|s| s.to_string()).collect();
        let orders: Vec<i32> = (0..DEFAULT_SIZES.len() as i32).collect();
        let result = sqlx::query(
            r#"
            INSERT INTO feeder_sizes (organization_id, name, sort_order)
            SELECT $1, n, o FROM UNNEST($2::text[], $3::int[]) AS u(n, o)
            ON CONFLICT (organization_id, name) DO NOTHING
            "#,
        )
        .bind(organization_id)
        .bind(&names)
        .bind(&orders)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
