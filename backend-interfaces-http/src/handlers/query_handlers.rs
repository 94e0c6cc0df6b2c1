use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::queries::{fame_queries, player_queries, vehicle_queries};
use backend_application::AppState;
use backend_domain::{FameRecord, PlayerRecord, VehicleRecord};

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(serde::Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

pub async fn list_players(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PlayerRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let players = player_queries::list_players(&state).await?;
    Ok(Json(players))
}

pub async fn get_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(steam_id): Path<String>,
) -> Result<Json<PlayerRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let player = player_queries::get_player(&state, &steam_id).await?;
    Ok(Json(player))
}

pub async fn list_online_players(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PlayerRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let players = player_queries::list_online_players(&state).await?;
    Ok(Json(players))
}

pub async fn list_vehicle_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<VehicleRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let events = vehicle_queries::list_vehicle_events(&state, query.limit).await?;
    Ok(Json(events))
}

pub async fn fame_leaderboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<FameRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let board = fame_queries::fame_leaderboard(&state, query.limit).await?;
    Ok(Json(board))
}
