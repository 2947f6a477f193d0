//! Feeding event endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use persistence::repositories::{FeederSizeRepository, FeedingEventRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use domain::models::feeding::{EventResponse, FeederSizeResponse, MarkEventRequest};

/// Mark a feeding event fed or unfed.
///
/// POST /api/v1/feeding/events/:event_id/mark
///
/// `fed_at` is stamped on the false→true transition and cleared when the
/// event is unmarked.
pub async fn mark_event(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<MarkEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    request.validate()?;

    if let Some(feeder_size_id) = request.feeder_size_id {
        let sizes = FeederSizeRepository::new(state.pool.clone());
        sizes
            .find_by_feeder_size_id(auth.organization_id, feeder_size_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Feeder size not found".to_string()))?;
    }

    let repo = FeedingEventRepository::new(state.pool.clone());
    let entity = repo
        .mark(
            auth.organization_id,
            event_id,
            request.fed,
            request.notes.as_deref(),
            request.feeder_size_id,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Feeding event not found".to_string()))?;

    let event: domain::models::FeedingEvent = entity.into();
    let response: EventResponse = event.into();

    info!(
        event_id = %response.event_id,
        fed = response.fed,
        "Feeding event marked"
    );

    Ok(Json(response))
}

/// List feeder sizes, seeding the defaults on first use.
///
/// GET /api/v1/feeding/feeder-sizes
pub async fn list_feeder_sizes(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Result<Json<Vec<FeederSizeResponse>>, ApiError> {
    let repo = FeederSizeRepository::new(state.pool.clone());

    let mut entities = repo.list(auth.organization_id).await?;
    if entities.is_empty() {
        repo.seed_defaults(auth.organization_id).await?;
        entities = repo.list(auth.organization_id).await?;
    }

    let sizes = entities
        .into_iter()
        .map(|e| {
            let size: domain::models::feeding::FeederSize = e.into();
            size.into()
        })
        .collect();

    Ok(Json(sizes))
}
