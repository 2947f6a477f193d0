//! Feeding schedule endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use persistence::repositories::{
    FeedingEventRepository, FeedingScheduleRepository, FeedingTargetRepository,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use crate::services::FeedingService;
use domain::models::feeding::{
    CreateScheduleRequest, EventResponse, FeedingSchedule, GenerateEventsRequest,
    GenerateEventsResponse, ListEventsQuery, ListSchedulesResponse, ScheduleResponse, StatusQuery,
    UpdateScheduleRequest,
};
use domain::services::feeding_status::{aggregate_status, FeedingStatus};

/// Query parameters for listing schedules.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSchedulesQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Create a feeding schedule with its targets.
///
/// POST /api/v1/feeding/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), ApiError> {
    request.validate()?;

    let schedule_repo = FeedingScheduleRepository::new(state.pool.clone());
    let target_repo = FeedingTargetRepository::new(state.pool.clone());

    let entity = schedule_repo
        .create(
            auth.organization_id,
            &request.name,
            request.recurrence.as_str(),
            request.interval_days,
            if request.days_of_week.is_empty() {
                None
            } else {
                Some(request.days_of_week.as_slice())
            },
            request.start_date,
            request.end_date,
            request.active,
        )
        .await?;

    let schedule: FeedingSchedule = entity.into();
    target_repo
        .insert_batch(schedule.schedule_id, &request.targets)
        .await?;

    info!(
        schedule_id = %schedule.schedule_id,
        recurrence = schedule.recurrence.as_str(),
        targets = request.targets.len(),
        "Feeding schedule created"
    );

    let service = FeedingService::new(state.pool.clone());
    let targets = service.load_target_refs(schedule.schedule_id).await?;
    let response = ScheduleResponse {
        targets,
        ..ScheduleResponse::from_parts(schedule, vec![])
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// List feeding schedules with their targets.
///
/// GET /api/v1/feeding/schedules
pub async fn list_schedules(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Query(query): Query<ListSchedulesQuery>,
) -> Result<Json<ListSchedulesResponse>, ApiError> {
    let schedule_repo = FeedingScheduleRepository::new(state.pool.clone());
    let target_repo = FeedingTargetRepository::new(state.pool.clone());

    let entities = schedule_repo
        .list(auth.organization_id, query.include_inactive)
        .await?;

    let mut schedules = Vec::with_capacity(entities.len());
    for entity in entities {
        let schedule: FeedingSchedule = entity.into();
        let targets = target_repo
            .find_by_schedule_id(schedule.schedule_id)
            .await?
            .into_iter()
            .filter_map(|row| row.into_domain())
            .collect();
        schedules.push(ScheduleResponse::from_parts(schedule, targets));
    }

    let total = schedules.len();
    Ok(Json(ListSchedulesResponse { schedules, total }))
}

/// Get a single feeding schedule with its targets.
///
/// GET /api/v1/feeding/schedules/:schedule_id
pub async fn get_schedule(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule_repo = FeedingScheduleRepository::new(state.pool.clone());
    let target_repo = FeedingTargetRepository::new(state.pool.clone());

    let entity = schedule_repo
        .find_by_schedule_id(auth.organization_id, schedule_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Feeding schedule not found".to_string()))?;

    let schedule: FeedingSchedule = entity.into();
    let targets = target_repo
        .find_by_schedule_id(schedule.schedule_id)
        .await?
        .into_iter()
        .filter_map(|row| row.into_domain())
        .collect();

    Ok(Json(ScheduleResponse::from_parts(schedule, targets)))
}

/// Update a feeding schedule (administrative edits).
///
/// PATCH /api/v1/feeding/schedules/:schedule_id
pub async fn update_schedule(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(schedule_id): Path<Uuid>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    request.validate()?;

    let schedule_repo = FeedingScheduleRepository::new(state.pool.clone());
    let target_repo = FeedingTargetRepository::new(state.pool.clone());

    let entity = schedule_repo
        .update(
            auth.organization_id,
            schedule_id,
            request.name.as_deref(),
            request.end_date,
            request.active,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Feeding schedule not found".to_string()))?;

    let schedule: FeedingSchedule = entity.into();

    if let Some(ref targets) = request.targets {
        target_repo
            .replace_for_schedule(schedule.schedule_id, targets)
            .await?;
        info!(
            schedule_id = %schedule.schedule_id,
            targets = targets.len(),
            "Feeding schedule targets replaced"
        );
    }

    let targets = target_repo
        .find_by_schedule_id(schedule.schedule_id)
        .await?
        .into_iter()
        .filter_map(|row| row.into_domain())
        .collect();

    Ok(Json(ScheduleResponse::from_parts(schedule, targets)))
}

/// Delete a feeding schedule and its targets and events.
///
/// DELETE /api/v1/feeding/schedules/:schedule_id
pub async fn delete_schedule(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(schedule_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let schedule_repo = FeedingScheduleRepository::new(state.pool.clone());
    let rows_affected = schedule_repo
        .delete(auth.organization_id, schedule_id)
        .await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Feeding schedule not found".to_string()));
    }

    info!(schedule_id = %schedule_id, "Feeding schedule deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Bulk-generate feeding events for a schedule.
///
/// POST /api/v1/feeding/schedules/:schedule_id/generate
pub async fn generate_events(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(schedule_id): Path<Uuid>,
    request: Option<Json<GenerateEventsRequest>>,
) -> Result<Json<GenerateEventsResponse>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    let service = FeedingService::new(state.pool.clone());
    let response = service
        .generate_events(auth.organization_id, schedule_id, &request)
        .await?;

    Ok(Json(response))
}

/// Completion status of a schedule for a date (today by default).
///
/// GET /api/v1/feeding/schedules/:schedule_id/status?date=
pub async fn schedule_status(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(schedule_id): Path<Uuid>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<FeedingStatus>, ApiError> {
    let schedule_repo = FeedingScheduleRepository::new(state.pool.clone());
    let event_repo = FeedingEventRepository::new(state.pool.clone());

    let entity = schedule_repo
        .find_by_schedule_id(auth.organization_id, schedule_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Feeding schedule not found".to_string()))?;

    let schedule: FeedingSchedule = entity.into();
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    // The relevant date can be up to a week in the past (weekly fallback,
    // custom scan-back), so fetch that whole window.
    let window_start = date - chrono::Duration::days(7);
    let events: Vec<_> = event_repo
        .list_for_schedule(schedule.schedule_id, Some(window_start), Some(date), None)
        .await?
        .iter()
        .map(|e| e.as_event_day())
        .collect();

    let status = aggregate_status(&schedule.rule(), &events, date);
    Ok(Json(status))
}

/// List a schedule's events.
///
/// GET /api/v1/feeding/schedules/:schedule_id/events?from=&to=&reptileId=
pub async fn list_events(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(schedule_id): Path<Uuid>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<EventResponse>>, ApiError> {
    let schedule_repo = FeedingScheduleRepository::new(state.pool.clone());
    let event_repo = FeedingEventRepository::new(state.pool.clone());

    // Scope check before touching events
    schedule_repo
        .find_by_schedule_id(auth.organization_id, schedule_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Feeding schedule not found".to_string()))?;

    let events = event_repo
        .list_for_schedule(schedule_id, query.from, query.to, query.reptile_id)
        .await?;

    let responses = events
        .into_iter()
        .map(|e| {
            let event: domain::models::FeedingEvent = e.into();
            event.into()
        })
        .collect();

    Ok(Json(responses))
}
