//! Health log domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Kind of health log entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Weight,
    Shed,
    Vet,
    Observation,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Weight => "weight",
            LogType::Shed => "shed",
            LogType::Vet => "vet",
            LogType::Observation => "observation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weight" => Some(LogType::Weight),
            "shed" => Some(LogType::Shed),
            "vet" => Some(LogType::Vet),
            "observation" => Some(LogType::Observation),
            _ => None,
        }
    }
}

/// A dated health record for a reptile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLog {
    pub id: i64,
    pub log_id: Uuid,
    pub organization_id: Uuid,
    pub reptile_id: Uuid,
    pub log_type: LogType,
    pub weight_grams: Option<f64>,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a health log entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHealthLogRequest {
    pub log_type: LogType,

    #[validate(custom(function = "shared::validation::validate_weight_grams"))]
    pub weight_grams: Option<f64>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    /// Defaults to now when omitted.
    pub logged_at: Option<DateTime<Utc>>,
}

impl CreateHealthLogRequest {
    /// Weight entries must carry a measurement.
    pub fn is_consistent(&self) -> bool {
        self.log_type != LogType::Weight || self.weight_grams.is_some()
    }
}

/// Response payload for health log operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLogResponse {
    pub log_id: Uuid,
    pub reptile_id: Uuid,
    pub log_type: LogType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_grams: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl From<HealthLog> for HealthLogResponse {
    fn from(l: HealthLog) -> Self {
        Self {
            log_id: l.log_id,
            reptile_id: l.reptile_id,
            log_type: l.log_type,
            weight_grams: l.weight_grams,
            notes: l.notes,
            logged_at: l.logged_at,
        }
    }
}

/// Query parameters for paginated health log history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLogHistoryQuery {
    pub cursor: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub log_type: Option<LogType>,
}

fn default_limit() -> i64 {
    50
}

/// Page of health log history with a continuation cursor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLogHistoryResponse {
    pub logs: Vec<HealthLogResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_type_roundtrip() {
        for t in [
            LogType::Weight,
            LogType::Shed,
            LogType::Vet,
            LogType::Observation,
        ] {
            assert_eq!(LogType::parse(t.as_str()), Some(t));
        }
        assert_eq!(LogType::parse("mood"), None);
    }

    #[test]
    fn test_weight_entry_requires_measurement() {
        let request = CreateHealthLogRequest {
            log_type: LogType::Weight,
            weight_grams: None,
            notes: None,
            logged_at: None,
        };
        assert!(!request.is_consistent());

        let request = CreateHealthLogRequest {
            weight_grams: Some(1450.0),
            ..request
        };
        assert!(request.is_consistent());
    }

    #[test]
    fn test_shed_entry_needs_no_weight() {
        let request = CreateHealthLogRequest {
            log_type: LogType::Shed,
            weight_grams: None,
            notes: Some("Full shed, eye caps clear".to_string()),
            logged_at: None,
        };
        assert!(request.is_consistent());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_history_query_default_limit() {
        let query: HealthLogHistoryQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 50);
        assert!(query.cursor.is_none());
    }
}
