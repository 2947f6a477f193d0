//! Feeding target entity (database row mapping).

use sqlx::FromRow;
use uuid::Uuid;

use domain::models::feeding::{FeedingTarget, TargetRef};

/// Database row mapping for the feeding_targets table.
///
/// `target_id` holds the referenced reptile/location/room/rack id; for
/// `level` rows it holds the rack id and `shelf_level` carries the level.
#[derive(Debug, Clone, FromRow)]
pub struct FeedingTargetEntity {
    pub id: i64,
    pub schedule_id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub shelf_level: Option<i32>,
}

impl FeedingTargetEntity {
    /// Reconstructs the tagged target reference.
    ///
    /// Returns `None` for rows violating the type/column pairing; the
    /// table's CHECK constraint prevents those from being written.
    pub fn target_ref(&self) -> Option<TargetRef> {
        match self.target_type.as_str() {
            "reptile" => Some(TargetRef::Reptile {
                reptile_id: self.target_id,
            }),
            "location" => Some(TargetRef::Location {
                location_id: self.target_id,
            }),
            "room" => Some(TargetRef::Room {
                room_id: self.target_id,
            }),
            "rack" => Some(TargetRef::Rack {
                rack_id: self.target_id,
            }),
            "level" => self.shelf_level.map(|shelf_level| TargetRef::Level {
                rack_id: self.target_id,
                shelf_level,
            }),
            _ => None,
        }
    }

    /// Converts to the domain target, dropping malformed rows.
    pub fn into_domain(self) -> Option<FeedingTarget> {
        let target = self.target_ref()?;
        Some(FeedingTarget {
            id: self.id,
            schedule_id: self.schedule_id,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(target_type: &str, shelf_level: Option<i32>) -> FeedingTargetEntity {
        FeedingTargetEntity {
            id: 1,
            schedule_id: Uuid::new_v4(),
            target_type: target_type.to_string(),
            target_id: Uuid::new_v4(),
            shelf_level,
        }
    }

    #[test]
    fn test_simple_target_refs() {
        assert!(matches!(
            entity("reptile", None).target_ref(),
            Some(TargetRef::Reptile { .. })
        ));
        assert!(matches!(
            entity("location", None).target_ref(),
            Some(TargetRef::Location { .. })
        ));
        assert!(matches!(
            entity("room", None).target_ref(),
            Some(TargetRef::Room { .. })
        ));
        assert!(matches!(
            entity("rack", None).target_ref(),
            Some(TargetRef::Rack { .. })
        ));
    }

    #[test]
    fn test_level_target_ref_carries_pair() {
        let e = entity("level", Some(4));
        match e.target_ref() {
            Some(TargetRef::Level {
                rack_id,
                shelf_level,
            }) => {
                assert_eq!(rack_id, e.target_id);
                assert_eq!(shelf_level, 4);
            }
            other => panic!("Expected level target, got {:?}", other),
        }
    }

    #[test]
    fn test_level_without_shelf_is_dropped() {
        assert!(entity("level", None).target_ref().is_none());
    }

    #[test]
    fn test_unknown_type_is_dropped() {
        assert!(entity("enclosure", None).target_ref().is_none());
        assert!(entity("enclosure", None).into_domain().is_none());
    }
}
