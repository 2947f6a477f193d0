//! Room entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::housing::Room;

/// Database row mapping for the rooms table.
#[derive(Debug, Clone, FromRow)]
pub struct RoomEntity {
    pub id: i64,
    pub room_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoomEntity> for Room {
    fn from(entity: RoomEntity) -> Self {
        Self {
            id: entity.id,
            room_id: entity.room_id,
            organization_id: entity.organization_id,
            name: entity.name,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
