use tracing::error;

use crate::{AppError, AppState};
use backend_domain::{PlayerRecord, SteamId};

pub async fn list_players(state: &AppState) -> Result<Vec<PlayerRecord>, AppError> {
    let records = state.player_repo.load_all().await.map_err(|err| {
        error!("failed to load player records: {}", err);
        AppError::Internal(err)
    })?;
    Ok(records.into_values().collect())
}

pub async fn get_player(state: &AppState, steam_id: &str) -> Result<PlayerRecord, AppError> {
    let steam_id = steam_id.trim();
    if steam_id.is_empty() {
        return Err(AppError::BadRequest("steam_id is empty".to_string()));
    }
    if !steam_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest("steam_id must be numeric".to_string()));
    }
    let records = state.player_repo.load_all().await.map_err(|err| {
        error!("failed to load player records: {}", err);
        AppError::Internal(err)
    })?;
    records
        .get(&SteamId(steam_id.to_string()))
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("no player with steam_id {}", steam_id)))
}

pub async fn list_online_players(state: &AppState) -> Result<Vec<PlayerRecord>, AppError> {
    let players = list_players(state).await?;
    Ok(players.into_iter().filter(|record| record.is_online).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture;
    use std::collections::BTreeMap;

    fn record(sid: &str, name: &str, online: bool) -> PlayerRecord {
        let mut record = PlayerRecord::new(SteamId(sid.to_string()), name);
        record.is_online = online;
        record
    }

    #[tokio::test]
    async fn filters_online_players() {
        let fx = fixture();
        let mut records = BTreeMap::new();
        records.insert(
            SteamId("76561198000000001".to_string()),
            record("76561198000000001", "Rico", true),
        );
        records.insert(
            SteamId("76561198000000002".to_string()),
            record("76561198000000002", "Vera", false),
        );
        fx.state.player_repo.save_all(&records).await.expect("seed");

        let online = list_online_players(&fx.state).await.expect("query runs");
        assert_eq!(online.len(), 1);
        assert_eq!(online[0].player_name, "Rico");
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let fx = fixture();
        let err = get_player(&fx.state, "76561198000000009").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_steam_id_is_rejected() {
        let fx = fixture();
        let err = get_player(&fx.state, "not-a-steam-id").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
