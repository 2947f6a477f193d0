//! Housing hierarchy domain models.
//!
//! Room ⊇ Rack ⊇ (shelf level × position) ⊇ Location ⊇ Reptile. Group
//! feeding targets are resolved against this hierarchy, always from the
//! current housing snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A room containing racks and free-standing enclosures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub room_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A rack of shelf levels inside a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rack {
    pub id: i64,
    pub rack_id: Uuid,
    pub organization_id: Uuid,
    pub room_id: Option<Uuid>,
    pub name: String,
    pub shelf_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single enclosure a reptile can be housed in.
///
/// Free-standing enclosures have only a room; rack tubs also carry the
/// rack id, shelf level, and position on the shelf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingLocation {
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

/// Request payload for creating a room.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for updating a room.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for creating a rack.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRackRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub room_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_shelf_level"))]
    pub shelf_count: i32,
}

/// Request payload for updating a rack.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRackRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub room_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_shelf_level"))]
    pub shelf_count: Option<i32>,
}

/// Request payload for creating a housing location.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 100, message = "Label must be 1-100 characters"))]
    pub label: String,

    pub room_id: Option<Uuid>,

    pub rack_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_shelf_level"))]
    pub shelf_level: Option<i32>,

    pub position: Option<i32>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

impl CreateLocationRequest {
    /// A shelf level only makes sense on a rack.
    pub fn is_consistent(&self) -> bool {
        !(self.shelf_level.is_some() && self.rack_id.is_none())
    }
}

/// Request payload for updating a housing location.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    #[validate(length(min = 1, max = 100, message = "Label must be 1-100 characters"))]
    pub label: Option<String>,

    pub room_id: Option<Uuid>,

    pub rack_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_shelf_level"))]
    pub shelf_level: Option<i32>,

    pub position: Option<i32>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Response payload for room operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(r: Room) -> Self {
        Self {
            room_id: r.room_id,
            name: r.name,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response payload for rack operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RackResponse {
    pub rack_id: Uuid,
    pub name: String,
    pub room_id: Option<Uuid>,
    pub shelf_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rack> for RackResponse {
    fn from(r: Rack) -> Self {
        Self {
            rack_id: r.rack_id,
            name: r.name,
            room_id: r.room_id,
            shelf_count: r.shelf_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response payload for location operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub location_id: Uuid,
    pub label: String,
    pub room_id: Option<Uuid>,
    pub rack_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HousingLocation> for LocationResponse {
    fn from(l: HousingLocation) -> Self {
        Self {
            location_id: l.location_id,
            label: l.label,
            room_id: l.room_id,
            rack_id: l.rack_id,
            shelf_level: l.shelf_level,
            position: l.position,
            notes: l.notes,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Query parameters for listing locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLocationsQuery {
    pub room_id: Option<Uuid>,
    pub rack_id: Option<Uuid>,
    /// When true, only locations with no housed reptile are returned.
    #[serde(default)]
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_location_consistency() {
        let request = CreateLocationRequest {
            label: "Tub 12".to_string(),
            room_id: None,
            rack_id: None,
            shelf_level: Some(3),
            position: Some(2),
            notes: None,
        };
        assert!(!request.is_consistent());

        let request = CreateLocationRequest {
            rack_id: Some(Uuid::new_v4()),
            ..request
        };
        assert!(request.is_consistent());
    }

    #[test]
    fn test_create_rack_request_validation() {
        let request = CreateRackRequest {
            name: "Hatchling rack".to_string(),
            room_id: None,
            shelf_count: 7,
        };
        assert!(request.validate().is_ok());

        let request = CreateRackRequest {
            shelf_count: 0,
            ..request
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_location_response_serialization() {
        let location = HousingLocation {
            id: 1,
            location_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            label: "Rack A / L2 / P4".to_string(),
            room_id: Some(Uuid::new_v4()),
            rack_id: Some(Uuid::new_v4()),
            shelf_level: Some(2),
            position: Some(4),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response: LocationResponse = location.into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"shelfLevel\":2"));
        assert!(json.contains("\"position\":4"));
        assert!(!json.contains("\"notes\""));
    }

    #[test]
    fn test_list_locations_query_defaults() {
        let query: ListLocationsQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.available);
        assert!(query.room_id.is_none());
    }
}
