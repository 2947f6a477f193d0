//! Feeder size entity (database row mapping).

use sqlx::FromRow;
use uuid::Uuid;

use domain::models::feeding::FeederSize;

/// Database row mapping for the feeder_sizes table.
#[derive(Debug, Clone, FromRow)]
pub struct FeederSizeEntity {
    pub id: i64,
    pub feeder_size_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

impl From<FeederSizeEntity> for FeederSize {
    fn from(entity: FeederSizeEntity) -> Self {
        Self {
            id: entity.id,
            feeder_size_id: entity.feeder_size_id,
            organization_id: entity.organization_id,
            name: entity.name,
            sort_order: entity.sort_order,
        }
    }
}
