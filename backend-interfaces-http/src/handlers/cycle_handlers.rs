use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::cycle_commands::{run_all_cycles, run_cycle, RunAllReport};
use backend_application::AppState;
use backend_domain::{CycleOutcome, LogDomain};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn run_presence(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CycleOutcome>, HttpError> {
    trigger(state, headers, LogDomain::Presence).await
}

pub async fn run_fame(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CycleOutcome>, HttpError> {
    trigger(state, headers, LogDomain::Fame).await
}

pub async fn run_vehicles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CycleOutcome>, HttpError> {
    trigger(state, headers, LogDomain::Vehicles).await
}

pub async fn run_admin_log(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CycleOutcome>, HttpError> {
    trigger(state, headers, LogDomain::AdminLog).await
}

pub async fn run_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RunAllReport>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let report = run_all_cycles(&state).await;
    Ok(Json(report))
}

async fn trigger(
    state: AppState,
    headers: HeaderMap,
    domain: LogDomain,
) -> Result<Json<CycleOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let outcome = run_cycle(&state, domain).await?;
    Ok(Json(outcome))
}
