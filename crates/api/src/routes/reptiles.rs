//! Reptile endpoint handlers.
//!
//! Location changes here are what drive the reactive feeding path: when a
//! reptile is created into or moved to a location, schedules targeting
//! that location's ancestry get today's event materialized immediately.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use persistence::repositories::{HousingLocationRepository, ReptileRepository};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use crate::services::FeedingService;
use domain::models::reptile::{
    CreateReptileRequest, ListReptilesQuery, ListReptilesResponse, ReptileResponse,
    UpdateReptileRequest,
};

/// Create a new reptile.
///
/// POST /api/v1/reptiles
pub async fn create_reptile(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<CreateReptileRequest>,
) -> Result<(StatusCode, Json<ReptileResponse>), ApiError> {
    request.validate()?;

    // Verify the location exists when given
    if let Some(location_id) = request.location_id {
        let location_repo = HousingLocationRepository::new(state.pool.clone());
        location_repo
            .find_by_location_id(auth.organization_id, location_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Location not found".to_string()))?;
    }

    let repo = ReptileRepository::new(state.pool.clone());
    let entity = repo.create(auth.organization_id, &request).await?;

    let reptile: domain::models::Reptile = entity.into();

    // Housing a reptile counts as a location change for feeding purposes
    if let Some(location_id) = reptile.location_id {
        let service = FeedingService::new(state.pool.clone());
        if let Err(e) = service
            .handle_location_change(
                auth.organization_id,
                reptile.reptile_id,
                location_id,
                Utc::now().date_naive(),
            )
            .await
        {
            warn!(reptile_id = %reptile.reptile_id, "Reactive event generation failed: {}", e);
        }
    }

    let response: ReptileResponse = reptile.into();
    info!(reptile_id = %response.reptile_id, name = %response.name, "Reptile created");

    Ok((StatusCode::CREATED, Json(response)))
}

/// List reptiles.
///
/// GET /api/v1/reptiles?includeInactive=&locationId=&species=
pub async fn list_reptiles(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Query(query): Query<ListReptilesQuery>,
) -> Result<Json<ListReptilesResponse>, ApiError> {
    let repo = ReptileRepository::new(state.pool.clone());
    let entities = repo
        .list(
            auth.organization_id,
            query.include_inactive,
            query.location_id,
            query.species.as_deref(),
        )
        .await?;

    let reptiles: Vec<ReptileResponse> = entities
        .into_iter()
        .map(|e| {
            let reptile: domain::models::Reptile = e.into();
            reptile.into()
        })
        .collect();

    let total = reptiles.len();

    Ok(Json(ListReptilesResponse { reptiles, total }))
}

/// Get a single reptile.
///
/// GET /api/v1/reptiles/:reptile_id
pub async fn get_reptile(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(reptile_id): Path<Uuid>,
) -> Result<Json<ReptileResponse>, ApiError> {
    let repo = ReptileRepository::new(state.pool.clone());
    let entity = repo
        .find_by_reptile_id(auth.organization_id, reptile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Reptile not found".to_string()))?;

    let reptile: domain::models::Reptile = entity.into();
    Ok(Json(reptile.into()))
}

/// Update a reptile (partial update).
///
/// PATCH /api/v1/reptiles/:reptile_id
///
/// A `locationId` change is applied after the scalar fields and, when the
/// reptile moves into a location, triggers reactive feeding event
/// generation. Generation failures are logged and never fail the move.
pub async fn update_reptile(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(reptile_id): Path<Uuid>,
    Json(request): Json<UpdateReptileRequest>,
) -> Result<Json<ReptileResponse>, ApiError> {
    request.validate()?;

    let repo = ReptileRepository::new(state.pool.clone());
    let existing = repo
        .find_by_reptile_id(auth.organization_id, reptile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Reptile not found".to_string()))?;

    let mut entity = repo
        .update(
            auth.organization_id,
            reptile_id,
            request.name.as_deref(),
            request.species.as_deref(),
            request.morph.as_deref(),
            request.sex.map(|s| s.as_str()),
            request.hatch_date,
            request.active,
            request.notes.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Reptile not found".to_string()))?;

    if let Some(new_location) = request.location_id {
        if new_location != existing.location_id {
            if let Some(location_id) = new_location {
                let location_repo = HousingLocationRepository::new(state.pool.clone());
                location_repo
                    .find_by_location_id(auth.organization_id, location_id)
                    .await?
                    .ok_or_else(|| ApiError::NotFound("Location not found".to_string()))?;
            }

            entity = repo
                .update_location(auth.organization_id, reptile_id, new_location)
                .await?
                .ok_or_else(|| ApiError::NotFound("Reptile not found".to_string()))?;

            if let Some(location_id) = new_location {
                let service = FeedingService::new(state.pool.clone());
                if let Err(e) = service
                    .handle_location_change(
                        auth.organization_id,
                        reptile_id,
                        location_id,
                        Utc::now().date_naive(),
                    )
                    .await
                {
                    warn!(reptile_id = %reptile_id, "Reactive event generation failed: {}", e);
                }
            }

            info!(reptile_id = %reptile_id, location_id = ?new_location, "Reptile moved");
        }
    }

    let reptile: domain::models::Reptile = entity.into();
    Ok(Json(reptile.into()))
}

/// Delete a reptile.
///
/// DELETE /api/v1/reptiles/:reptile_id
pub async fn delete_reptile(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(reptile_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ReptileRepository::new(state.pool.clone());
    let rows_affected = repo.delete(auth.organization_id, reptile_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Reptile not found".to_string()));
    }

    info!(reptile_id = %reptile_id, "Reptile deleted");
    Ok(StatusCode::NO_CONTENT)
}
