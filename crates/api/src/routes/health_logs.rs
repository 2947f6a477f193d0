//! Health log endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use persistence::repositories::{HealthLogRepository, ReptileRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use domain::models::health_log::{
    CreateHealthLogRequest, HealthLogHistoryQuery, HealthLogHistoryResponse, HealthLogResponse,
};
use shared::pagination::{decode_cursor, encode_cursor};

/// Create a health log entry for a reptile.
///
/// POST /api/v1/reptiles/:reptile_id/health-logs
pub async fn create_health_log(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(reptile_id): Path<Uuid>,
    Json(request): Json<CreateHealthLogRequest>,
) -> Result<(StatusCode, Json<HealthLogResponse>), ApiError> {
    request.validate()?;

    if !request.is_consistent() {
        return Err(ApiError::Validation(
            "Weight entries require weightGrams".to_string(),
        ));
    }

    let reptile_repo = ReptileRepository::new(state.pool.clone());
    reptile_repo
        .find_by_reptile_id(auth.organization_id, reptile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Reptile not found".to_string()))?;

    let repo = HealthLogRepository::new(state.pool.clone());
    let entity = repo
        .create(
            auth.organization_id,
            reptile_id,
            request.log_type.as_str(),
            request.weight_grams,
            request.notes.as_deref(),
            request.logged_at.unwrap_or_else(Utc::now),
        )
        .await?;

    let log: domain::models::HealthLog = entity.into();
    let response: HealthLogResponse = log.into();

    info!(
        log_id = %response.log_id,
        reptile_id = %reptile_id,
        log_type = response.log_type.as_str(),
        "Health log created"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Cursor-paginated health log history for a reptile, newest first.
///
/// GET /api/v1/reptiles/:reptile_id/health-logs?cursor=&limit=&logType=
pub async fn health_log_history(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(reptile_id): Path<Uuid>,
    Query(query): Query<HealthLogHistoryQuery>,
) -> Result<Json<HealthLogHistoryResponse>, ApiError> {
    let limit = query.limit.clamp(1, state.config.limits.max_page_size);

    let before = match &query.cursor {
        Some(cursor) => Some(
            decode_cursor(cursor)
                .map_err(|e| ApiError::Validation(format!("Invalid cursor: {}", e)))?,
        ),
        None => None,
    };

    let reptile_repo = ReptileRepository::new(state.pool.clone());
    reptile_repo
        .find_by_reptile_id(auth.organization_id, reptile_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Reptile not found".to_string()))?;

    let repo = HealthLogRepository::new(state.pool.clone());
    let entities = repo
        .history(
            auth.organization_id,
            reptile_id,
            query.log_type.map(|t| t.as_str()),
            before,
            limit,
        )
        .await?;

    // A full page means there may be more; point the cursor at the last row
    let next_cursor = if entities.len() as i64 == limit {
        entities
            .last()
            .map(|last| encode_cursor(last.logged_at, last.id))
    } else {
        None
    };

    let logs = entities
        .into_iter()
        .map(|e| {
            let log: domain::models::HealthLog = e.into();
            log.into()
        })
        .collect();

    Ok(Json(HealthLogHistoryResponse { logs, next_cursor }))
}

/// Delete a health log entry.
///
/// DELETE /api/v1/health-logs/:log_id
pub async fn delete_health_log(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(log_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = HealthLogRepository::new(state.pool.clone());
    let rows_affected = repo.delete(auth.organization_id, log_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Health log not found".to_string()));
    }

    info!(log_id = %log_id, "Health log deleted");
    Ok(StatusCode::NO_CONTENT)
}
