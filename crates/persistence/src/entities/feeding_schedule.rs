//! Feeding schedule entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::feeding::{FeedingSchedule, Recurrence};

/// Database row mapping for the feeding_schedules table.
#[derive(Debug, Clone, FromRow)]
pub struct FeedingScheduleEntity {
    pub id: i64,
    pub schedule_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub recurrence: String,
    pub interval_days: Option<i32>,
    pub days_of_week: Option<Vec<i16>>, // SQLx maps SMALLINT[] to Vec<i16>
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FeedingScheduleEntity> for FeedingSchedule {
    fn from(entity: FeedingScheduleEntity) -> Self {
        Self {
            id: entity.id,
            schedule_id: entity.schedule_id,
            organization_id: entity.organization_id,
            name: entity.name,
            // The recurrence column carries a CHECK constraint
            recurrence: Recurrence::parse(&entity.recurrence).unwrap_or(Recurrence::Daily),
            interval_days: entity.interval_days,
            days_of_week: entity.days_of_week.unwrap_or_default(),
            start_date: entity.start_date,
            end_date: entity.end_date,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_entity_to_domain() {
        let entity = FeedingScheduleEntity {
            id: 3,
            schedule_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "Juveniles every 5 days".to_string(),
            recurrence: "interval".to_string(),
            interval_days: Some(5),
            days_of_week: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let schedule: FeedingSchedule = entity.clone().into();
        assert_eq!(schedule.recurrence, Recurrence::Interval);
        assert_eq!(schedule.interval_days, Some(5));
        assert!(schedule.days_of_week.is_empty());
        assert_eq!(schedule.schedule_id, entity.schedule_id);
    }

    #[test]
    fn test_custom_schedule_keeps_day_set() {
        let entity = FeedingScheduleEntity {
            id: 4,
            schedule_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "Weekend feeders".to_string(),
            recurrence: "custom".to_string(),
            interval_days: None,
            days_of_week: Some(vec![0, 6]),
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end_date: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let schedule: FeedingSchedule = entity.into();
        assert_eq!(schedule.recurrence, Recurrence::Custom);
        assert_eq!(schedule.days_of_week, vec![0, 6]);
    }
}
