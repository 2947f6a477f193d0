//! Dashboard endpoint handler.

use axum::{extract::State, Json};
use chrono::Utc;
use persistence::repositories::{
    FeedingEventRepository, FeedingScheduleRepository, ReptileRepository,
};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;

/// Collection overview: headcounts plus today's feeding completion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub active_reptiles: i64,
    pub active_schedules: i64,
    pub feedings_due_today: i64,
    pub feedings_completed_today: i64,
    pub feeding_completion_percentage: f64,
}

/// Dashboard summary for the organization.
///
/// GET /api/v1/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> Result<Json<DashboardResponse>, ApiError> {
    let reptiles = ReptileRepository::new(state.pool.clone());
    let schedules = FeedingScheduleRepository::new(state.pool.clone());
    let events = FeedingEventRepository::new(state.pool.clone());

    let today = Utc::now().date_naive();

    let active_reptiles = reptiles.count_active(auth.organization_id).await?;
    let active_schedules = schedules.count_active(auth.organization_id).await?;
    let (due, completed) = events.daily_counts(auth.organization_id, today).await?;

    // Same zero guard as the per-schedule aggregator
    let percentage = if due == 0 {
        0.0
    } else {
        (completed as f64 / due as f64) * 100.0
    };

    Ok(Json(DashboardResponse {
        active_reptiles,
        active_schedules,
        feedings_due_today: due,
        feedings_completed_today: completed,
        feeding_completion_percentage: percentage,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_response_serialization() {
        let response = DashboardResponse {
            active_reptiles: 42,
            active_schedules: 3,
            feedings_due_today: 20,
            feedings_completed_today: 15,
            feeding_completion_percentage: 75.0,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"activeReptiles\":42"));
        assert!(json.contains("\"feedingCompletionPercentage\":75"));
    }
}
