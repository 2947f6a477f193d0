//! Rack endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{RackRepository, RoomRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use domain::models::housing::{CreateRackRequest, RackResponse, UpdateRackRequest};

/// Create a new rack.
///
/// POST /api/v1/racks
pub async fn create_rack(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<CreateRackRequest>,
) -> Result<(StatusCode, Json<RackResponse>), ApiError> {
    request.validate()?;

    // Verify the room exists when given
    if let Some(room_id) = request.room_id {
        let room_repo = RoomRepository::new(state.pool.clone());
        room_repo
            .find_by_room_id(auth.organization_id, room_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;
    }

    let repo = RackRepository::new(state.pool.clone());
    let entity = repo
        .create(
            auth.organization_id,
            &request.name,
            request.room_id,
            request.shelf_count,
        )
        .await?;

    let rack: domain::models::Rack = entity.into();
    let response: RackResponse = rack.into();

    info!(rack_id = %response.rack_id, name = %response.name, "Rack created");

    Ok((StatusCode::CREATED, Json(response)))
}

/// List racks.
///
/// GET /api/v1/racks
pub async fn list_racks(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Result<Json<Vec<RackResponse>>, ApiError> {
    let repo = RackRepository::new(state.pool.clone());
    let entities = repo.list(auth.organization_id).await?;

    let racks = entities
        .into_iter()
        .map(|e| {
            let rack: domain::models::Rack = e.into();
            rack.into()
        })
        .collect();

    Ok(Json(racks))
}

/// Get a single rack.
///
/// GET /api/v1/racks/:rack_id
pub async fn get_rack(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(rack_id): Path<Uuid>,
) -> Result<Json<RackResponse>, ApiError> {
    let repo = RackRepository::new(state.pool.clone());
    let entity = repo
        .find_by_rack_id(auth.organization_id, rack_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Rack not found".to_string()))?;

    let rack: domain::models::Rack = entity.into();
    Ok(Json(rack.into()))
}

/// Update a rack (partial update).
///
/// PATCH /api/v1/racks/:rack_id
pub async fn update_rack(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(rack_id): Path<Uuid>,
    Json(request): Json<UpdateRackRequest>,
) -> Result<Json<RackResponse>, ApiError> {
    request.validate()?;

    let repo = RackRepository::new(state.pool.clone());
    let entity = repo
        .update(
            auth.organization_id,
            rack_id,
            request.name.as_deref(),
            request.room_id,
            request.shelf_count,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Rack not found".to_string()))?;

    let rack: domain::models::Rack = entity.into();
    Ok(Json(rack.into()))
}

/// Delete a rack.
///
/// DELETE /api/v1/racks/:rack_id
pub async fn delete_rack(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(rack_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = RackRepository::new(state.pool.clone());
    let rows_affected = repo.delete(auth.organization_id, rack_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Rack not found".to_string()));
    }

    info!(rack_id = %rack_id, "Rack deleted");
    Ok(StatusCode::NO_CONTENT)
}
