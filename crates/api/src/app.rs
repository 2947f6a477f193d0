use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    breeding, dashboard, expenses, feeding_events, feeding_schedules, health, health_logs,
    locations, racks, reptile_import, reptiles, rooms,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Rate limiting is disabled when rate_limit_per_minute is 0
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Protected routes (require API key authentication)
    // Middleware order: auth runs first, then rate limiting (which needs the auth info)
    let protected_routes = Router::new()
        // Reptile routes
        .route(
            "/api/v1/reptiles",
            post(reptiles::create_reptile).get(reptiles::list_reptiles),
        )
        .route("/api/v1/reptiles/import", post(reptile_import::import_reptiles))
        .route(
            "/api/v1/reptiles/:reptile_id",
            get(reptiles::get_reptile)
                .patch(reptiles::update_reptile)
                .delete(reptiles::delete_reptile),
        )
        // Housing routes
        .route("/api/v1/rooms", post(rooms::create_room).get(rooms::list_rooms))
        .route(
            "/api/v1/rooms/:room_id",
            get(rooms::get_room)
                .patch(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .route("/api/v1/racks", post(racks::create_rack).get(racks::list_racks))
        .route(
            "/api/v1/racks/:rack_id",
            get(racks::get_rack)
                .patch(racks::update_rack)
                .delete(racks::delete_rack),
        )
        .route(
            "/api/v1/locations",
            post(locations::create_location).get(locations::list_locations),
        )
        .route(
            "/api/v1/locations/:location_id",
            get(locations::get_location)
                .patch(locations::update_location)
                .delete(locations::delete_location),
        )
        // Feeding routes
        .route(
            "/api/v1/feeding/schedules",
            post(feeding_schedules::create_schedule).get(feeding_schedules::list_schedules),
        )
        .route(
            "/api/v1/feeding/schedules/:schedule_id",
            get(feeding_schedules::get_schedule)
                .patch(feeding_schedules::update_schedule)
                .delete(feeding_schedules::delete_schedule),
        )
        .route(
            "/api/v1/feeding/schedules/:schedule_id/generate",
            post(feeding_schedules::generate_events),
        )
        .route(
            "/api/v1/feeding/schedules/:schedule_id/status",
            get(feeding_schedules::schedule_status),
        )
        .route(
            "/api/v1/feeding/schedules/:schedule_id/events",
            get(feeding_schedules::list_events),
        )
        .route(
            "/api/v1/feeding/events/:event_id/mark",
            post(feeding_events::mark_event),
        )
        .route(
            "/api/v1/feeding/feeder-sizes",
            get(feeding_events::list_feeder_sizes),
        )
        // Health log routes
        .route(
            "/api/v1/reptiles/:reptile_id/health-logs",
            post(health_logs::create_health_log).get(health_logs::health_log_history),
        )
        .route(
            "/api/v1/health-logs/:log_id",
            delete(health_logs::delete_health_log),
        )
        // Expense routes
        .route(
            "/api/v1/expenses",
            post(expenses::create_expense).get(expenses::list_expenses),
        )
        .route("/api/v1/expenses/summary", get(expenses::expense_summary))
        .route(
            "/api/v1/expenses/:expense_id",
            get(expenses::get_expense)
                .patch(expenses::update_expense)
                .delete(expenses::delete_expense),
        )
        // Breeding routes
        .route(
            "/api/v1/breeding/projects",
            post(breeding::create_project).get(breeding::list_projects),
        )
        .route(
            "/api/v1/breeding/projects/:project_id",
            get(breeding::get_project)
                .patch(breeding::update_project)
                .delete(breeding::delete_project),
        )
        .route(
            "/api/v1/breeding/projects/:project_id/transition",
            post(breeding::transition_project),
        )
        // Dashboard
        .route("/api/v1/dashboard", get(dashboard::dashboard))
        // Rate limiting runs after auth (needs the API key id from auth)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
