//! Bulk reptile import endpoint handler.
//!
//! Rows are created concurrently (fan-out/await-all); parent links are
//! resolved by name in a second pass once every row exists, so a clutch
//! and its parents can arrive in one import.

use axum::{extract::State, http::StatusCode, Json};
use futures::future::join_all;
use persistence::repositories::ReptileRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use domain::models::reptile::{
    CreateReptileRequest, ImportError, ReptileImportRequest, ReptileImportResponse,
    ReptileImportRow,
};

/// Bulk import reptiles.
///
/// POST /api/v1/reptiles/import
pub async fn import_reptiles(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<ReptileImportRequest>,
) -> Result<(StatusCode, Json<ReptileImportResponse>), ApiError> {
    request.validate()?;

    if request.reptiles.len() > state.config.limits.max_import_rows {
        return Err(ApiError::Validation(format!(
            "Import exceeds {} row limit",
            state.config.limits.max_import_rows
        )));
    }

    let repo = ReptileRepository::new(state.pool.clone());
    let organization_id = auth.organization_id;

    // Fan out row creation; each future resolves to the created reptile
    // or a per-row error, aggregated into one response.
    let creations = request.reptiles.iter().enumerate().map(|(idx, row)| {
        let repo = repo.clone();
        async move {
            let outcome = create_row(&repo, organization_id, row).await;
            (idx + 1, row, outcome)
        }
    });
    let outcomes = join_all(creations).await;

    let mut created = 0;
    let mut errors = Vec::new();
    let mut created_rows = Vec::new();
    for (row_number, row, outcome) in outcomes {
        match outcome {
            Ok(reptile_id) => {
                created += 1;
                created_rows.push((reptile_id, row));
            }
            Err(message) => errors.push(ImportError {
                row: row_number,
                name: row.name.clone(),
                error: message,
            }),
        }
    }

    // Second pass: link parents by name now that all rows exist
    let mut linked_parents = 0;
    for (reptile_id, row) in created_rows {
        if row.sire_name.is_none() && row.dam_name.is_none() {
            continue;
        }

        let sire_id = match &row.sire_name {
            Some(name) => repo
                .find_by_name(organization_id, name)
                .await?
                .map(|e| e.reptile_id),
            None => None,
        };
        let dam_id = match &row.dam_name {
            Some(name) => repo
                .find_by_name(organization_id, name)
                .await?
                .map(|e| e.reptile_id),
            None => None,
        };

        if sire_id.is_some() || dam_id.is_some() {
            repo.link_parents(organization_id, reptile_id, sire_id, dam_id)
                .await?;
            linked_parents += 1;
        }
    }

    let response = ReptileImportResponse {
        processed: request.reptiles.len(),
        created,
        linked_parents,
        errors,
    };

    info!(
        processed = response.processed,
        created = response.created,
        linked_parents = response.linked_parents,
        errors = response.errors.len(),
        "Reptile import completed"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Validates and creates one import row, returning the new reptile id.
async fn create_row(
    repo: &ReptileRepository,
    organization_id: uuid::Uuid,
    row: &ReptileImportRow,
) -> Result<uuid::Uuid, String> {
    row.validate().map_err(|e| e.to_string())?;

    let request = CreateReptileRequest {
        name: row.name.clone(),
        species: row.species.clone(),
        morph: row.morph.clone(),
        sex: row.sex,
        hatch_date: row.hatch_date,
        acquired_on: None,
        location_id: None,
        sire_id: None,
        dam_id: None,
        active: true,
        notes: None,
    };

    repo.create(organization_id, &request)
        .await
        .map(|entity| entity.reptile_id)
        .map_err(|e| e.to_string())
}
