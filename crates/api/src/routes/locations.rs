//! Housing location endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::HousingLocationRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use domain::models::housing::{
    CreateLocationRequest, ListLocationsQuery, LocationResponse, UpdateLocationRequest,
};

/// Create a new housing location.
///
/// POST /api/v1/locations
pub async fn create_location(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>), ApiError> {
    request.validate()?;

    if !request.is_consistent() {
        return Err(ApiError::Validation(
            "A shelf level requires a rack".to_string(),
        ));
    }

    let repo = HousingLocationRepository::new(state.pool.clone());
    let entity = repo
        .create(
            auth.organization_id,
            &request.label,
            request.room_id,
            request.rack_id,
            request.shelf_level,
            request.position,
            request.notes.as_deref(),
        )
        .await?;

    let location: domain::models::HousingLocation = entity.into();
    let response: LocationResponse = location.into();

    info!(location_id = %response.location_id, label = %response.label, "Location created");

    Ok((StatusCode::CREATED, Json(response)))
}

/// List housing locations.
///
/// GET /api/v1/locations?roomId=&rackId=&available=
pub async fn list_locations(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Query(query): Query<ListLocationsQuery>,
) -> Result<Json<Vec<LocationResponse>>, ApiError> {
    let repo = HousingLocationRepository::new(state.pool.clone());
    let entities = repo
        .list(
            auth.organization_id,
            query.room_id,
            query.rack_id,
            query.available,
        )
        .await?;

    let locations = entities
        .into_iter()
        .map(|e| {
            let location: domain::models::HousingLocation = e.into();
            location.into()
        })
        .collect();

    Ok(Json(locations))
}

/// Get a single housing location.
///
/// GET /api/v1/locations/:location_id
pub async fn get_location(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(location_id): Path<Uuid>,
) -> Result<Json<LocationResponse>, ApiError> {
    let repo = HousingLocationRepository::new(state.pool.clone());
    let entity = repo
        .find_by_location_id(auth.organization_id, location_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Location not found".to_string()))?;

    let location: domain::models::HousingLocation = entity.into();
    Ok(Json(location.into()))
}

/// Update a housing location (partial update).
///
/// PATCH /api/v1/locations/:location_id
pub async fn update_location(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(location_id): Path<Uuid>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<LocationResponse>, ApiError> {
    request.validate()?;

    let repo = HousingLocationRepository::new(state.pool.clone());
    let entity = repo
        .update(
            auth.organization_id,
            location_id,
            request.label.as_deref(),
            request.room_id,
            request.rack_id,
            request.shelf_level,
            request.position,
            request.notes.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Location not found".to_string()))?;

    let location: domain::models::HousingLocation = entity.into();
    Ok(Json(location.into()))
}

/// Delete a housing location.
///
/// DELETE /api/v1/locations/:location_id
pub async fn delete_location(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(location_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = HousingLocationRepository::new(state.pool.clone());
    let rows_affected = repo.delete(auth.organization_id, location_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Location not found".to_string()));
    }

    info!(location_id = %location_id, "Location deleted");
    Ok(StatusCode::NO_CONTENT)
}
