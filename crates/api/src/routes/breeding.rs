//! Breeding project endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{BreedingProjectRepository, ReptileRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use domain::models::breeding::{
    BreedingProject, BreedingProjectResponse, CreateBreedingProjectRequest, TransitionRequest,
    UpdateBreedingProjectRequest,
};

/// Create a breeding project.
///
/// POST /api/v1/breeding/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<CreateBreedingProjectRequest>,
) -> Result<(StatusCode, Json<BreedingProjectResponse>), ApiError> {
    request.validate()?;

    // Both parents must exist in this organization
    let reptile_repo = ReptileRepository::new(state.pool.clone());
    for (label, id) in [("Sire", request.sire_id), ("Dam", request.dam_id)] {
        reptile_repo
            .find_by_reptile_id(auth.organization_id, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("{} not found", label)))?;
    }

    let repo = BreedingProjectRepository::new(state.pool.clone());
    let entity = repo
        .create(
            auth.organization_id,
            &request.name,
            request.sire_id,
            request.dam_id,
            request.season_year,
            request.notes.as_deref(),
        )
        .await?;

    let project: BreedingProject = entity.into();
    let response: BreedingProjectResponse = project.into();

    info!(
        project_id = %response.project_id,
        season_year = response.season_year,
        "Breeding project created"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// List breeding projects.
///
/// GET /api/v1/breeding/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Result<Json<Vec<BreedingProjectResponse>>, ApiError> {
    let repo = BreedingProjectRepository::new(state.pool.clone());
    let entities = repo.list(auth.organization_id).await?;

    let projects = entities
        .into_iter()
        .map(|e| {
            let project: BreedingProject = e.into();
            project.into()
        })
        .collect();

    Ok(Json(projects))
}

/// Get a single breeding project.
///
/// GET /api/v1/breeding/projects/:project_id
pub async fn get_project(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(project_id): Path<Uuid>,
) -> Result<Json<BreedingProjectResponse>, ApiError> {
    let repo = BreedingProjectRepository::new(state.pool.clone());
    let entity = repo
        .find_by_project_id(auth.organization_id, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Breeding project not found".to_string()))?;

    let project: BreedingProject = entity.into();
    Ok(Json(project.into()))
}

/// Update a breeding project's dates and counts (partial update).
///
/// PATCH /api/v1/breeding/projects/:project_id
pub async fn update_project(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(project_id): Path<Uuid>,
    Json(request): Json<UpdateBreedingProjectRequest>,
) -> Result<Json<BreedingProjectResponse>, ApiError> {
    request.validate()?;

    let repo = BreedingProjectRepository::new(state.pool.clone());
    let entity = repo
        .update(
            auth.organization_id,
            project_id,
            request.name.as_deref(),
            request.paired_on,
            request.laid_on,
            request.hatched_on,
            request.eggs_laid,
            request.eggs_hatched,
            request.notes.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Breeding project not found".to_string()))?;

    let project: BreedingProject = entity.into();
    Ok(Json(project.into()))
}

/// Advance a breeding project to its next stage.
///
/// POST /api/v1/breeding/projects/:project_id/transition
///
/// Stages advance one at a time; any stage may be abandoned straight to
/// `complete`. Illegal transitions are rejected with a conflict.
pub async fn transition_project(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(project_id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<BreedingProjectResponse>, ApiError> {
    let repo = BreedingProjectRepository::new(state.pool.clone());
    let entity = repo
        .find_by_project_id(auth.organization_id, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Breeding project not found".to_string()))?;

    let mut project: BreedingProject = entity.into();
    project
        .transition(request.status)
        .map_err(|e| ApiError::Conflict(e.to_string()))?;

    let entity = repo
        .update_status(auth.organization_id, project_id, project.status.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound("Breeding project not found".to_string()))?;

    let project: BreedingProject = entity.into();
    let response: BreedingProjectResponse = project.into();

    info!(
        project_id = %response.project_id,
        status = response.status.as_str(),
        "Breeding project transitioned"
    );

    Ok(Json(response))
}

/// Delete a breeding project.
///
/// DELETE /api/v1/breeding/projects/:project_id
pub async fn delete_project(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(project_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = BreedingProjectRepository::new(state.pool.clone());
    let rows_affected = repo.delete(auth.organization_id, project_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Breeding project not found".to_string()));
    }

    info!(project_id = %project_id, "Breeding project deleted");
    Ok(StatusCode::NO_CONTENT)
}
