//! Breeding project domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle stage of a breeding project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreedingStatus {
    Planned,
    Pairing,
    Gravid,
    Laid,
    Hatched,
    Complete,
}

impl BreedingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreedingStatus::Planned => "planned",
            BreedingStatus::Pairing => "pairing",
            BreedingStatus::Gravid => "gravid",
            BreedingStatus::Laid => "laid",
            BreedingStatus::Hatched => "hatched",
            BreedingStatus::Complete => "complete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(BreedingStatus::Planned),
            "pairing" => Some(BreedingStatus::Pairing),
            "gravid" => Some(BreedingStatus::Gravid),
            "laid" => Some(BreedingStatus::Laid),
            "hatched" => Some(BreedingStatus::Hatched),
            "complete" => Some(BreedingStatus::Complete),
            _ => None,
        }
    }

    /// The stage that follows this one, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            BreedingStatus::Planned => Some(BreedingStatus::Pairing),
            BreedingStatus::Pairing => Some(BreedingStatus::Gravid),
            BreedingStatus::Gravid => Some(BreedingStatus::Laid),
            BreedingStatus::Laid => Some(BreedingStatus::Hatched),
            BreedingStatus::Hatched => Some(BreedingStatus::Complete),
            BreedingStatus::Complete => None,
        }
    }

    /// Whether this status may transition to `to`.
    ///
    /// Stages advance one at a time; any stage may be abandoned straight
    /// to `complete`.
    pub fn can_transition(&self, to: BreedingStatus) -> bool {
        self.next() == Some(to) || (to == BreedingStatus::Complete && *self != to)
    }
}

/// Error for invalid breeding status transitions.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Cannot transition breeding project from {from} to {to}")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

/// A pairing of a sire and dam for one season.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingProject {
    pub id: i64,
    pub project_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub sire_id: Uuid,
    pub dam_id: Uuid,
    pub season_year: i32,
    pub status: BreedingStatus,
    pub paired_on: Option<NaiveDate>,
    pub laid_on: Option<NaiveDate>,
    pub hatched_on: Option<NaiveDate>,
    pub eggs_laid: Option<i32>,
    pub eggs_hatched: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BreedingProject {
    /// Applies a status transition, enforcing the allowed order.
    pub fn transition(&mut self, to: BreedingStatus) -> Result<(), TransitionError> {
        if !self.status.can_transition(to) {
            return Err(TransitionError {
                from: self.status.as_str(),
                to: to.as_str(),
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Request payload for creating a breeding project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBreedingProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub sire_id: Uuid,

    pub dam_id: Uuid,

    #[validate(range(min = 2000, max = 2100, message = "Season year out of range"))]
    pub season_year: i32,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for updating a breeding project's dates and counts.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBreedingProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub paired_on: Option<NaiveDate>,

    pub laid_on: Option<NaiveDate>,

    pub hatched_on: Option<NaiveDate>,

    #[validate(range(min = 0, message = "Egg count must be non-negative"))]
    pub eggs_laid: Option<i32>,

    #[validate(range(min = 0, message = "Egg count must be non-negative"))]
    pub eggs_hatched: Option<i32>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for a status transition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    pub status: BreedingStatus,
}

/// Response payload for breeding project operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingProjectResponse {
    pub project_id: Uuid,
    pub name: String,
    pub sire_id: Uuid,
    pub dam_id: Uuid,
    pub season_year: i32,
    pub status: BreedingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laid_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hatched_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eggs_laid: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eggs_hatched: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BreedingProject> for BreedingProjectResponse {
    fn from(p: BreedingProject) -> Self {
        Self {
            project_id: p.project_id,
            name: p.name,
            sire_id: p.sire_id,
            dam_id: p.dam_id,
            season_year: p.season_year,
            status: p.status,
            paired_on: p.paired_on,
            laid_on: p.laid_on,
            hatched_on: p.hatched_on,
            eggs_laid: p.eggs_laid,
            eggs_hatched: p.eggs_hatched,
            notes: p.notes,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(status: BreedingStatus) -> BreedingProject {
        BreedingProject {
            id: 1,
            project_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "Pastel x Banana".to_string(),
            sire_id: Uuid::new_v4(),
            dam_id: Uuid::new_v4(),
            season_year: 2024,
            status,
            paired_on: None,
            laid_on: None,
            hatched_on: None,
            eggs_laid: None,
            eggs_hatched: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_roundtrip() {
        for s in [
            BreedingStatus::Planned,
            BreedingStatus::Pairing,
            BreedingStatus::Gravid,
            BreedingStatus::Laid,
            BreedingStatus::Hatched,
            BreedingStatus::Complete,
        ] {
            assert_eq!(BreedingStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(BreedingStatus::parse("incubating"), None);
    }

    #[test]
    fn test_transitions_advance_in_order() {
        let mut p = project(BreedingStatus::Planned);
        assert!(p.transition(BreedingStatus::Pairing).is_ok());
        assert!(p.transition(BreedingStatus::Gravid).is_ok());
        assert!(p.transition(BreedingStatus::Laid).is_ok());
        assert!(p.transition(BreedingStatus::Hatched).is_ok());
        assert!(p.transition(BreedingStatus::Complete).is_ok());
    }

    #[test]
    fn test_transition_rejects_skips() {
        let mut p = project(BreedingStatus::Planned);
        let err = p.transition(BreedingStatus::Laid).unwrap_err();
        assert_eq!(err.from, "planned");
        assert_eq!(err.to, "laid");
        assert_eq!(p.status, BreedingStatus::Planned);
    }

    #[test]
    fn test_transition_rejects_backwards() {
        let mut p = project(BreedingStatus::Gravid);
        assert!(p.transition(BreedingStatus::Pairing).is_err());
    }

    #[test]
    fn test_any_stage_can_abandon_to_complete() {
        for status in [
            BreedingStatus::Planned,
            BreedingStatus::Pairing,
            BreedingStatus::Gravid,
            BreedingStatus::Laid,
            BreedingStatus::Hatched,
        ] {
            let mut p = project(status);
            assert!(p.transition(BreedingStatus::Complete).is_ok());
        }
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut p = project(BreedingStatus::Complete);
        assert!(p.transition(BreedingStatus::Complete).is_err());
        assert!(p.transition(BreedingStatus::Planned).is_err());
    }
}
