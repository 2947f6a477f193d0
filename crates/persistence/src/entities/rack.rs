//! Rack entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::housing::Rack;

/// Database row mapping for the racks table.
#[derive(Debug, Clone, FromRow)]
pub struct RackEntity {
    pub id: i64,
    pub rack_id: Uuid,
    pub organization_id: Uuid,
    pub room_id: Option<Uuid>,
    pub name: String,
    pub shelf_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RackEntity> for Rack {
    fn from(entity: RackEntity) -> Self {
        Self {
            id: entity.id,
            rack_id: entity.rack_id,
            organization_id: entity.organization_id,
            room_id: entity.room_id,
            name: entity.name,
            shelf_count: entity.shelf_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
