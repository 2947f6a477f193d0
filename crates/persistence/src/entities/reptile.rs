//! Reptile entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::reptile::{Reptile, Sex};

/// Database row mapping for the reptiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ReptileEntity {
    pub id: i64,
    pub reptile_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub species: String,
    pub morph: Option<String>,
    pub sex: String,
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

impl From<ReptileEntity> for Reptile {
    fn from(entity: ReptileEntity) -> Self {
        Self {
            id: entity.id,
            reptile_id: entity.reptile_id,
            organization_id: entity.organization_id,
            name: entity.name,
            species: entity.species,
            morph: entity.morph,
            // The sex column carries a CHECK constraint, so parse is total
            sex: Sex::parse(&entity.sex).unwrap_or(Sex::Unknown),
            hatch_date: entity.hatch_date,
            acquired_on: entity.acquired_on,
            location_id: entity.location_id,
            sire_id: entity.sire_id,
            dam_id: entity.dam_id,
            active: entity.active,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_reptile_entity() -> ReptileEntity {
        ReptileEntity {
            id: 1,
            reptile_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "Monty".to_string(),
            species: "Python regius".to_string(),
            morph: Some("Pastel".to_string()),
            sex: "male".to_string(),
            hatch_date: NaiveDate::from_ymd_opt(2022, 7, 4),
            acquired_on: NaiveDate::from_ymd_opt(2022, 9, 1),
            location_id: Some(Uuid::new_v4()),
            sire_id: None,
            dam_id: None,
            active: true,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reptile_entity_to_domain() {
        let entity = create_test_reptile_entity();
        let reptile: Reptile = entity.clone().into();

        assert_eq!(reptile.reptile_id, entity.reptile_id);
        assert_eq!(reptile.name, entity.name);
        assert_eq!(reptile.sex, Sex::Male);
        assert_eq!(reptile.location_id, entity.location_id);
        assert_eq!(reptile.hatch_date, entity.hatch_date);
    }

    #[test]
    fn test_conversion_keeps_arbitrary_names() {
        use fake::{faker::name::en::Name, Fake};
        let mut entity = create_test_reptile_entity();
        entity.name = Name().fake();

        let reptile: Reptile = entity.clone().into();
        assert_eq!(reptile.name, entity.name);
    }

    #[test]
    fn test_unparseable_sex_falls_back_to_unknown() {
        let mut entity = create_test_reptile_entity();
        entity.sex = "intersex".to_string();

        let reptile: Reptile = entity.into();
        assert_eq!(reptile.sex, Sex::Unknown);
    }
}
