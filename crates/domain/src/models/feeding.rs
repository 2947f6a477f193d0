//! Feeding schedule, target, and event domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Temporal pattern governing which dates a schedule is active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Every day.
    Daily,
    /// Every 7th day from the start date (the start's own weekday only).
    Weekly,
    /// Every `interval_days` days from the start date.
    Interval,
    /// Every day whose weekday is in the schedule's day-of-week set.
    Custom,
}

impl Recurrence {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Interval => "interval",
            Recurrence::Custom => "custom",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Recurrence::Daily),
            "weekly" => Some(Recurrence::Weekly),
            "interval" => Some(Recurrence::Interval),
            "custom" => Some(Recurrence::Custom),
            _ => None,
        }
    }
}

/// Represents a feeding schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingSchedule {
    pub id: i64,
    pub schedule_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub recurrence: Recurrence,
    pub interval_days: Option<i32>,
    pub days_of_week: Vec<i16>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeedingSchedule {
    /// The schedule's recurrence rule, detached for the pure services.
    pub fn rule(&self) -> RecurrenceRule {
        RecurrenceRule {
            recurrence: self.recurrence,
            interval_days: self.interval_days,
            days_of_week: self.days_of_week.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// A recurrence rule detached from its schedule row.
///
/// The recurrence and status services operate on this struct so they stay
/// free of persistence concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub recurrence: Recurrence,
    pub interval_days: Option<i32>,
    pub days_of_week: Vec<i16>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// A reference to a reptile or housing-hierarchy node a schedule applies to.
///
/// Rack levels are a tagged pair rather than a `"<rackId>-<level>"` string,
/// so rack ids containing separators can never be misparsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum TargetRef {
    Reptile { reptile_id: Uuid },
    Location { location_id: Uuid },
    Room { room_id: Uuid },
    Rack { rack_id: Uuid },
    Level { rack_id: Uuid, shelf_level: i32 },
}

impl TargetRef {
    /// The target type's database string representation.
    pub fn type_str(&self) -> &'static str {
        match self {
            TargetRef::Reptile { .. } => "reptile",
            TargetRef::Location { .. } => "location",
            TargetRef::Room { .. } => "room",
            TargetRef::Rack { .. } => "rack",
            TargetRef::Level { .. } => "level",
        }
    }
}

/// A persisted feeding target row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingTarget {
    pub id: i64,
    pub schedule_id: Uuid,
    #[serde(flatten)]
    pub target: TargetRef,
}

/// One materialized feeding obligation for a reptile on a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingEvent {
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

/// A feeder size lookup entry (e.g. "fuzzy", "small rat").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeederSize {
    pub id: i64,
    pub feeder_size_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

/// Default active status for new schedules.
fn default_active() -> bool {
    true
}

/// Request payload for creating a feeding schedule with its targets.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_recurrence_fields"))]
pub struct CreateScheduleRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub recurrence: Recurrence,

    #[validate(custom(function = "shared::validation::validate_interval_days"))]
    pub interval_days: Option<i32>,

    #[serde(default)]
    pub days_of_week: Vec<i16>,

    pub start_date: NaiveDate,

    pub end_date: Option<NaiveDate>,

    #[validate(length(min = 1, message = "At least one target is required"))]
    pub targets: Vec<TargetRef>,

    #[serde(default = "default_active")]
    pub active: bool,
}

/// Cross-field validation: interval needs a length, custom needs weekdays,
/// and an end date may not precede the start date.
fn validate_recurrence_fields(request: &CreateScheduleRequest) -> Result<(), ValidationError> {
    if let Some(end) = request.end_date {
        if end < request.start_date {
            let mut err = ValidationError::new("end_before_start");
            err.message = Some("endDate must not be before startDate".into());
            return Err(err);
        }
    }
    match request.recurrence {
        Recurrence::Interval if request.interval_days.is_none() => {
            let mut err = ValidationError::new("interval_days_required");
            err.message = Some("intervalDays is required for interval recurrence".into());
            Err(err)
        }
        Recurrence::Custom => shared::validation::validate_days_of_week(&request.days_of_week),
        _ => Ok(()),
    }
}

/// Request payload for updating a feeding schedule (administrative edits).
///
/// When `targets` is present the schedule's target list is replaced.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub end_date: Option<NaiveDate>,

    pub active: Option<bool>,

    #[validate(length(min = 1, message = "At least one target is required"))]
    pub targets: Option<Vec<TargetRef>>,
}

/// Request payload for bulk event generation.
///
/// When the range is omitted it defaults to the schedule's start date
/// through its end date (or start + 30 days when the schedule is open).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEventsRequest {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Response payload for bulk event generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEventsResponse {
    pub created: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Request payload for marking a feeding event fed or unfed.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkEventRequest {
    pub fed: bool,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    pub feeder_size_id: Option<Uuid>,
}

/// Response payload for feeding event operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event_id: Uuid,
    pub schedule_id: Uuid,
    pub reptile_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub fed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feeder_size_id: Option<Uuid>,
}

impl From<FeedingEvent> for EventResponse {
    fn from(e: FeedingEvent) -> Self {
        Self {
            event_id: e.event_id,
            schedule_id: e.schedule_id,
            reptile_id: e.reptile_id,
            scheduled_date: e.scheduled_date,
            fed: e.fed,
            fed_at: e.fed_at,
            notes: e.notes,
            feeder_size_id: e.feeder_size_id,
        }
    }
}

/// Response payload for schedule operations, targets embedded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub schedule_id: Uuid,
    pub name: String,
    pub recurrence: Recurrence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_days: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<i16>,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub targets: Vec<TargetRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleResponse {
    /// Assembles a response from a schedule and its target rows.
    pub fn from_parts(schedule: FeedingSchedule, targets: Vec<FeedingTarget>) -> Self {
        Self {
            schedule_id: schedule.schedule_id,
            name: schedule.name,
            recurrence: schedule.recurrence,
            interval_days: schedule.interval_days,
            days_of_week: schedule.days_of_week,
            start_date: schedule.start_date,
            end_date: schedule.end_date,
            active: schedule.active,
            targets: targets.into_iter().map(|t| t.target).collect(),
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        }
    }
}

/// Response for listing schedules.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSchedulesResponse {
    pub schedules: Vec<ScheduleResponse>,
    pub total: usize,
}

/// Query parameters for listing a schedule's events.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub reptile_id: Option<Uuid>,
}

/// Query parameters for the schedule status endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    /// Evaluation date; defaults to today.
    pub date: Option<NaiveDate>,
}

/// Response payload for feeder size listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeederSizeResponse {
    pub feeder_size_id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

impl From<FeederSize> for FeederSizeResponse {
    fn from(f: FeederSize) -> Self {
        Self {
            feeder_size_id: f.feeder_size_id,
            name: f.name,
            sort_order: f.sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateScheduleRequest {
        CreateScheduleRequest {
            name: "Adult ball pythons".to_string(),
            recurrence: Recurrence::Weekly,
            interval_days: None,
            days_of_week: vec![],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            targets: vec![TargetRef::Rack {
                rack_id: Uuid::new_v4(),
            }],
            active: true,
        }
    }

    #[test]
    fn test_recurrence_roundtrip() {
        for r in [
            Recurrence::Daily,
            Recurrence::Weekly,
            Recurrence::Interval,
            Recurrence::Custom,
        ] {
            assert_eq!(Recurrence::parse(r.as_str()), Some(r));
        }
        assert_eq!(Recurrence::parse("fortnightly"), None);
    }

    #[test]
    fn test_target_ref_tagged_serialization() {
        let rack_id = Uuid::new_v4();
        let target = TargetRef::Level {
            rack_id,
            shelf_level: 3,
        };

        let json = serde_json::to_string(&target).unwrap();
        assert!(json.contains("\"type\":\"level\""));
        assert!(json.contains("\"shelfLevel\":3"));
        assert!(json.contains(&rack_id.to_string()));

        let parsed: TargetRef = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, target);
    }

    #[test]
    fn test_target_ref_reptile_deserialization() {
        let json = r#"{"type":"reptile","reptileId":"550e8400-e29b-41d4-a716-446655440000"}"#;
        let target: TargetRef = serde_json::from_str(json).unwrap();
        assert!(matches!(target, TargetRef::Reptile { .. }));
        assert_eq!(target.type_str(), "reptile");
    }

    #[test]
    fn test_create_schedule_interval_requires_length() {
        let request = CreateScheduleRequest {
            recurrence: Recurrence::Interval,
            interval_days: None,
            ..base_request()
        };
        assert!(request.validate().is_err());

        let request = CreateScheduleRequest {
            recurrence: Recurrence::Interval,
            interval_days: Some(3),
            ..base_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_schedule_custom_requires_days() {
        let request = CreateScheduleRequest {
            recurrence: Recurrence::Custom,
            days_of_week: vec![],
            ..base_request()
        };
        assert!(request.validate().is_err());

        let request = CreateScheduleRequest {
            recurrence: Recurrence::Custom,
            days_of_week: vec![1, 4],
            ..base_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_schedule_rejects_inverted_range() {
        let request = CreateScheduleRequest {
            end_date: Some(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()),
            ..base_request()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_schedule_requires_targets() {
        let request = CreateScheduleRequest {
            targets: vec![],
            ..base_request()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_schedule_rule_detaches_fields() {
        let schedule = FeedingSchedule {
            id: 1,
            schedule_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "Interval".to_string(),
            recurrence: Recurrence::Interval,
            interval_days: Some(5),
            days_of_week: vec![],
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end_date: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let rule = schedule.rule();
        assert_eq!(rule.recurrence, Recurrence::Interval);
        assert_eq!(rule.interval_days, Some(5));
        assert_eq!(rule.start_date, schedule.start_date);
    }

    #[test]
    fn test_generate_response_skips_empty_warnings() {
        let response = GenerateEventsResponse {
            created: 14,
            warnings: vec![],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"created":14}"#);
    }

    #[test]
    fn test_schedule_response_from_parts() {
        let schedule = FeedingSchedule {
            id: 1,
            schedule_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "Hatchlings".to_string(),
            recurrence: Recurrence::Daily,
            interval_days: None,
            days_of_week: vec![],
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let schedule_id = schedule.schedule_id;
        let targets = vec![FeedingTarget {
            id: 10,
            schedule_id,
            target: TargetRef::Room {
                room_id: Uuid::new_v4(),
            },
        }];

        let response = ScheduleResponse::from_parts(schedule, targets);
        assert_eq!(response.schedule_id, schedule_id);
        assert_eq!(response.targets.len(), 1);
        assert!(matches!(response.targets[0], TargetRef::Room { .. }));
    }
}
