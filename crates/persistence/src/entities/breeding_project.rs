//! Breeding project entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::breeding::{BreedingProject, BreedingStatus};

/// Database row mapping for the breeding_projects table.
#[derive(Debug, Clone, FromRow)]
pub struct BreedingProjectEntity {
    pub id: i64,
    pub project_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub sire_id: Uuid,
    pub dam_id: Uuid,
    pub season_year: i32,
    pub status: String,
    pub paired_on: Option<NaiveDate>,
    pub laid_on: Option<NaiveDate>,
    pub hatched_on: Option<NaiveDate>,
    pub eggs_laid: Option<i32>,
    pub eggs_hatched: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BreedingProjectEntity> for BreedingProject {
    fn from(entity: BreedingProjectEntity) -> Self {
        Self {
            id: entity.id,
            project_id: entity.project_id,
            organization_id: entity.organization_id,
            name: entity.name,
            sire_id: entity.sire_id,
            dam_id: entity.dam_id,
            season_year: entity.season_year,
            status: BreedingStatus::parse(&entity.status).unwrap_or(BreedingStatus::Planned),
            paired_on: entity.paired_on,
            laid_on: entity.laid_on,
            hatched_on: entity.hatched_on,
            eggs_laid: entity.eggs_laid,
            eggs_hatched: entity.eggs_hatched,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
