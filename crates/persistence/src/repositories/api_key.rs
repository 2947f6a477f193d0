//! API key repository for database operations.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ApiKeyEntity;
use crate::metrics::QueryTimer;

/// Repository for API key-related database operations.
#[derive(Clone)]
pub struct ApiKeyRepository {
    pool: PgPool,
}

impl ApiKeyRepository {
    /// Creates a new ApiKeyRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new API key record from a pre-hashed key.
    pub async fn create(
        &self,
        organization_id: Uuid,
        key_hash: &str,
        key_prefix: &str,
        name: &str,
    ) -> Result<ApiKeyEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_api_key");
        let result = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            INSERT INTO api_keys (organization_id, key_hash, key_prefix, name)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(key_hash)
        .bind(key_prefix)
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an API key by its hash.
    pub async fn find_by_key_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<ApiKeyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_api_key_by_hash");
        let result = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            SELECT * FROM api_keys WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update the last_used_at timestamp for a key.
    pub async fn update_last_used(&self, id: i64) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_api_key_last_used");
        let result = sqlx::query(
            r#"
            UPDATE api_keys SET last_used_at = NOW() WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map(|_| ());
        timer.record();
        result
    }

    /// Count all API keys.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_api_keys");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM api_keys
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// Check whether a key is active and unexpired.
    pub fn is_key_valid(key: &ApiKeyEntity) -> bool {
        key.is_active
            && key
                .expires_at
                .map(|expires| expires > Utc::now())
                .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn key(is_active: bool, expires_at: Option<chrono::DateTime<Utc>>) -> ApiKeyEntity {
        ApiKeyEntity {
            id: 1,
            organization_id: Uuid::new_v4(),
            key_hash: "hash".to_string(),
            key_prefix: "abcdefgh".to_string(),
            name: "default".to_string(),
            is_active,
            expires_at,
            last_used_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_key_valid_when_active_and_unexpired() {
        assert!(ApiKeyRepository::is_key_valid(&key(true, None)));
        assert!(ApiKeyRepository::is_key_valid(&key(
            true,
            Some(Utc::now() + Duration::days(1))
        )));
    }

    #[test]
    fn test_key_invalid_when_inactive_or_expired() {
        assert!(!ApiKeyRepository::is_key_valid(&key(false, None)));
        assert!(!ApiKeyRepository::is_key_valid(&key(
            true,
            Some(Utc::now() - Duration::days(1))
        )));
    }
}
