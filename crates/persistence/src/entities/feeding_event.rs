//! Feeding event entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::feeding::FeedingEvent;
use domain::services::feeding_status::EventDay;

/// Database row mapping for the feeding_events table.
#[derive(Debug, Clone, FromRow)]
pub struct FeedingEventEntity {
    pub id: i64,
    pub event_id: Uuid,
    pub organization_id: Uuid,
    pub schedule_id: Uuid,
    pub reptile_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub fed: bool,
    pub fed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub feeder_size_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeedingEventEntity {
    /// The slice of this event the status aggregator consumes.
    pub fn as_event_day(&self) -> EventDay {
        EventDay {
            scheduled_date: self.scheduled_date,
            fed: self.fed,
        }
    }
}

impl From<FeedingEventEntity> for FeedingEvent {
    fn from(entity: FeedingEventEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            organization_id: entity.organization_id,
            schedule_id: entity.schedule_id,
            reptile_id: entity.reptile_id,
            scheduled_date: entity.scheduled_date,
            fed: entity.fed,
            fed_at: entity.fed_at,
            notes: entity.notes,
            feeder_size_id: entity.feeder_size_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_entity_to_domain() {
        let entity = FeedingEventEntity {
            id: 11,
            event_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            schedule_id: Uuid::new_v4(),
            reptile_id: Uuid::new_v4(),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            fed: true,
            fed_at: Some(Utc::now()),
            notes: Some("Took small rat".to_string()),
            feeder_size_id: Some(Uuid::new_v4()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let event: FeedingEvent = entity.clone().into();
        assert_eq!(event.event_id, entity.event_id);
        assert_eq!(event.scheduled_date, entity.scheduled_date);
        assert!(event.fed);
        assert!(event.fed_at.is_some());
    }

    #[test]
    fn test_as_event_day() {
        let entity = FeedingEventEntity {
            id: 1,
            event_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            schedule_id: Uuid::new_v4(),
            reptile_id: Uuid::new_v4(),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            fed: false,
            fed_at: None,
            notes: None,
            feeder_size_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let day = entity.as_event_day();
        assert_eq!(day.scheduled_date, entity.scheduled_date);
        assert!(!day.fed);
    }
}
