//! Room endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::RoomRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use domain::models::housing::{CreateRoomRequest, RoomResponse, UpdateRoomRequest};

/// Create a new room.
///
/// POST /api/v1/rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), ApiError> {
    request.validate()?;

    let repo = RoomRepository::new(state.pool.clone());
    let entity = repo
        .create(auth.organization_id, &request.name, request.notes.as_deref())
        .await?;

    let room: domain::models::Room = entity.into();
    let response: RoomResponse = room.into();

    info!(room_id = %response.room_id, name = %response.name, "Room created");

    Ok((StatusCode::CREATED, Json(response)))
}

/// List rooms.
///
/// GET /api/v1/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let repo = RoomRepository::new(state.pool.clone());
    let entities = repo.list(auth.organization_id).await?;

    let rooms = entities
        .into_iter()
        .map(|e| {
            let room: domain::models::Room = e.into();
            room.into()
        })
        .collect();

    Ok(Json(rooms))
}

/// Get a single room.
///
/// GET /api/v1/rooms/:room_id
pub async fn get_room(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(room_id): Path<Uuid>,
) -> Result<Json<RoomResponse>, ApiError> {
    let repo = RoomRepository::new(state.pool.clone());
    let entity = repo
        .find_by_room_id(auth.organization_id, room_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;

    let room: domain::models::Room = entity.into();
    Ok(Json(room.into()))
}

/// Update a room (partial update).
///
/// PATCH /api/v1/rooms/:room_id
pub async fn update_room(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(room_id): Path<Uuid>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, ApiError> {
    request.validate()?;

    let repo = RoomRepository::new(state.pool.clone());
    let entity = repo
        .update(
            auth.organization_id,
            room_id,
            request.name.as_deref(),
            request.notes.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;

    let room: domain::models::Room = entity.into();
    Ok(Json(room.into()))
}

/// Delete a room.
///
/// DELETE /api/v1/rooms/:room_id
pub async fn delete_room(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(room_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = RoomRepository::new(state.pool.clone());
    let rows_affected = repo.delete(auth.organization_id, room_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Room not found".to_string()));
    }

    info!(room_id = %room_id, "Room deleted");
    Ok(StatusCode::NO_CONTENT)
}
