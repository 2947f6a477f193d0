//! Housing location entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::housing::HousingLocation;

/// Database row mapping for the housing_locations table.
#[derive(Debug, Clone, FromRow)]
pub struct HousingLocationEntity {
    pub id: i64,
    pub location_id: Uuid,
    pub organization_id: Uuid,
    pub label: String,
    pub room_id: Option<Uuid>,
    pub rack_id: Option<Uuid>,
    pub shelf_level: Option<i32>,
    pub position: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HousingLocationEntity> for HousingLocation {
    fn from(entity: HousingLocationEntity) -> Self {
        Self {
            id: entity.id,
            location_id: entity.location_id,
            organization_id: entity.organization_id,
            label: entity.label,
            room_id: entity.room_id,
            rack_id: entity.rack_id,
            shelf_level: entity.shelf_level,
            position: entity.position,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rack_tub_to_domain() {
        let entity = HousingLocationEntity {
            id: 7,
            location_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            label: "Rack A / L3 / P1".to_string(),
            room_id: Some(Uuid::new_v4()),
            rack_id: Some(Uuid::new_v4()),
            shelf_level: Some(3),
            position: Some(1),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let location: HousingLocation = entity.clone().into();
        assert_eq!(location.location_id, entity.location_id);
        assert_eq!(location.shelf_level, Some(3));
        assert_eq!(location.rack_id, entity.rack_id);
    }
}
