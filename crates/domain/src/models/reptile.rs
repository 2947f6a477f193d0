//! Reptile domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a reptile in a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reptile {
    pub id: i64,
    pub reptile_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub species: String,
    pub morph: Option<String>,
    pub sex: Sex,
    pub hatch_date: Option<NaiveDate>,
    pub acquired_on: Option<NaiveDate>,
    pub location_id: Option<Uuid>,
    pub sire_id: Option<Uuid>,
    pub dam_id: Option<Uuid>,
    pub active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Recorded sex of a reptile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unknown => "unknown",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            "unknown" => Some(Sex::Unknown),
            _ => None,
        }
    }
}

/// Default sex for new reptiles.
fn default_sex() -> Sex {
    Sex::Unknown
}

/// Default active status for new reptiles.
fn default_active() -> bool {
    true
}

/// Request payload for creating a reptile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReptileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Species must be 1-100 characters"))]
    pub species: String,

    #[validate(length(max = 100, message = "Morph must be at most 100 characters"))]
    pub morph: Option<String>,

    #[serde(default = "default_sex")]
    pub sex: Sex,

    #[validate(custom(function = "shared::validation::validate_not_future_date"))]
    pub hatch_date: Option<NaiveDate>,

    #[validate(custom(function = "shared::validation::validate_not_future_date"))]
    pub acquired_on: Option<NaiveDate>,

    pub location_id: Option<Uuid>,

    pub sire_id: Option<Uuid>,

    pub dam_id: Option<Uuid>,

    #[serde(default = "default_active")]
    pub active: bool,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for updating a reptile (partial update).
///
/// `location_id` uses a double Option so the field can be omitted (no
/// change), null (move out of housing), or a UUID (move to a location).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReptileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Species must be 1-100 characters"))]
    pub species: Option<String>,

    #[validate(length(max = 100, message = "Morph must be at most 100 characters"))]
    pub morph: Option<String>,

    pub sex: Option<Sex>,

    #[validate(custom(function = "shared::validation::validate_not_future_date"))]
    pub hatch_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub location_id: Option<Option<Uuid>>,

    pub active: Option<bool>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Deserializes a present-but-possibly-null field into `Some(Option<T>)`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Response payload for reptile operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReptileResponse {
    pub reptile_id: Uuid,
    pub name: String,
    pub species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morph: Option<String>,
    pub sex: Sex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hatch_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquired_on: Option<NaiveDate>,
    pub location_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sire_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dam_id: Option<Uuid>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reptile> for ReptileResponse {
    fn from(r: Reptile) -> Self {
        Self {
            reptile_id: r.reptile_id,
            name: r.name,
            species: r.species,
            morph: r.morph,
            sex: r.sex,
            hatch_date: r.hatch_date,
            acquired_on: r.acquired_on,
            location_id: r.location_id,
            sire_id: r.sire_id,
            dam_id: r.dam_id,
            active: r.active,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response for listing reptiles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReptilesResponse {
    pub reptiles: Vec<ReptileResponse>,
    pub total: usize,
}

/// Query parameters for listing reptiles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReptilesQuery {
    #[serde(default)]
    pub include_inactive: bool,
    pub location_id: Option<Uuid>,
    pub species: Option<String>,
}

/// Maximum rows accepted in one bulk import request.
pub const MAX_IMPORT_ROWS: usize = 500;

/// One row of a bulk reptile import.
///
/// Parent links are given by name and resolved in a second pass after all
/// rows are created, so a clutch and its parents can arrive in one file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReptileImportRow {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Species must be 1-100 characters"))]
    pub species: String,

    pub morph: Option<String>,

    #[serde(default = "default_sex")]
    pub sex: Sex,

    pub hatch_date: Option<NaiveDate>,

    pub sire_name: Option<String>,

    pub dam_name: Option<String>,
}

/// Request payload for bulk reptile import.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReptileImportRequest {
    #[validate(length(min = 1, max = 500, message = "Import must contain 1-500 rows"))]
    pub reptiles: Vec<ReptileImportRow>,
}

/// Per-row error for bulk import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportError {
    pub row: usize,
    pub name: String,
    pub error: String,
}

/// Response payload for bulk reptile import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReptileImportResponse {
    pub processed: usize,
    pub created: usize,
    pub linked_parents: usize,
    pub errors: Vec<ImportError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_serialization() {
        assert_eq!(serde_json::to_string(&Sex::Male).unwrap(), "\"male\"");
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"female\"");
        assert_eq!(serde_json::to_string(&Sex::Unknown).unwrap(), "\"unknown\"");
    }

    #[test]
    fn test_sex_as_str_parse_roundtrip() {
        for sex in [Sex::Male, Sex::Female, Sex::Unknown] {
            assert_eq!(Sex::parse(sex.as_str()), Some(sex));
        }
        assert_eq!(Sex::parse("hermaphrodite"), None);
    }

    #[test]
    fn test_create_reptile_request_defaults() {
        let json = r#"{
            "name": "Nagini",
            "species": "Python regius"
        }"#;

        let request: CreateReptileRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Nagini");
        assert_eq!(request.species, "Python regius");
        assert_eq!(request.sex, Sex::Unknown);
        assert!(request.active);
        assert!(request.location_id.is_none());
    }

    #[test]
    fn test_update_request_location_tristate() {
        // Omitted: no change
        let request: UpdateReptileRequest = serde_json::from_str(r#"{"name": "Rex"}"#).unwrap();
        assert!(request.location_id.is_none());

        // Null: explicit move out of housing
        let request: UpdateReptileRequest =
            serde_json::from_str(r#"{"locationId": null}"#).unwrap();
        assert_eq!(request.location_id, Some(None));

        // Set: move to a location
        let request: UpdateReptileRequest =
            serde_json::from_str(r#"{"locationId": "550e8400-e29b-41d4-a716-446655440000"}"#)
                .unwrap();
        assert!(matches!(request.location_id, Some(Some(_))));
    }

    #[test]
    fn test_reptile_response_skips_empty_optionals() {
        let response = ReptileResponse {
            reptile_id: Uuid::new_v4(),
            name: "Kaa".to_string(),
            species: "Morelia spilota".to_string(),
            morph: None,
            sex: Sex::Female,
            hatch_date: None,
            acquired_on: None,
            location_id: None,
            sire_id: None,
            dam_id: None,
            active: true,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"morph\""));
        assert!(!json.contains("\"sireId\""));
        // location_id is always present, null when unhoused
        assert!(json.contains("\"locationId\":null"));
    }

    #[test]
    fn test_create_request_accepts_generated_names() {
        use fake::{faker::name::en::Name, Fake};
        for _ in 0..5 {
            let request = CreateReptileRequest {
                name: Name().fake(),
                species: "Pogona vitticeps".to_string(),
                morph: None,
                sex: Sex::Unknown,
                hatch_date: None,
                acquired_on: None,
                location_id: None,
                sire_id: None,
                dam_id: None,
                active: true,
                notes: None,
            };
            assert!(request.validate().is_ok());
        }
    }

    #[test]
    fn test_import_row_deserialization() {
        let json = r#"{
            "name": "Hatchling 1",
            "species": "Python regius",
            "sireName": "Big Sire",
            "damName": "Big Dam"
        }"#;

        let row: ReptileImportRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.sire_name.as_deref(), Some("Big Sire"));
        assert_eq!(row.dam_name.as_deref(), Some("Big Dam"));
        assert_eq!(row.sex, Sex::Unknown);
    }

    #[test]
    fn test_import_request_rejects_empty() {
        let request = ReptileImportRequest { reptiles: vec![] };
        assert!(request.validate().is_err());
    }
}
