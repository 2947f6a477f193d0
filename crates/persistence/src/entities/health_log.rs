//! Health log entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::health_log::{HealthLog, LogType};

/// Database row mapping for the health_logs table.
#[derive(Debug, Clone, FromRow)]
pub struct HealthLogEntity {
    pub id: i64,
    pub log_id: Uuid,
    pub organization_id: Uuid,
    pub reptile_id: Uuid,
    pub log_type: String,
    pub weight_grams: Option<f64>,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<HealthLogEntity> for HealthLog {
    fn from(entity: HealthLogEntity) -> Self {
        Self {
            id: entity.id,
            log_id: entity.log_id,
            organization_id: entity.organization_id,
            reptile_id: entity.reptile_id,
            log_type: LogType::parse(&entity.log_type).unwrap_or(LogType::Observation),
            weight_grams: entity.weight_grams,
            notes: entity.notes,
            logged_at: entity.logged_at,
            created_at: entity.created_at,
        }
    }
}
