use axum::Router;

use backend_application::AppState;

use crate::handlers::{cycle_handlers, ops_handlers, query_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/cycles/presence/run",
            axum::routing::post(cycle_handlers::run_presence),
        )
        .route(
            "/v1/cycles/fame/run",
            axum::routing::post(cycle_handlers::run_fame),
        )
        .route(
            "/v1/cycles/vehicles/run",
            axum::routing::post(cycle_handlers::run_vehicles),
        )
        .route(
            "/v1/cycles/admin-log/run",
            axum::routing::post(cycle_handlers::run_admin_log),
        )
        .route(
            "/v1/cycles/run-all",
            axum::routing::post(cycle_handlers::run_all),
        )
        .route("/v1/players", axum::routing::get(query_handlers::list_players))
        .route(
            "/v1/players/online",
            axum::routing::get(query_handlers::list_online_players),
        )
        .route(
            "/v1/players/:steam_id",
            axum::routing::get(query_handlers::get_player),
        )
        .route(
            "/v1/vehicles/events",
            axum::routing::get(query_handlers::list_vehicle_events),
        )
        .route(
            "/v1/fame/leaderboard",
            axum::routing::get(query_handlers::fame_leaderboard),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .route(
            "/v1/ops/notify-target/check",
            axum::routing::get(ops_handlers::notify_target_check),
        )
        .route(
            "/v1/ops/notify-deliveries",
            axum::routing::get(ops_handlers::list_notify_deliveries),
        )
        .route(
            "/v1/ops/notify-deliveries/last",
            axum::routing::get(ops_handlers::last_notify_delivery),
        )
        .with_state(state)
}
