use tracing::error;

use crate::{AppError, AppState};
use backend_domain::FameRecord;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

/// Highest totals first; ties resolve by SteamID for a stable board.
pub async fn fame_leaderboard(
    state: &AppState,
    limit: Option<usize>,
) -> Result<Vec<FameRecord>, AppError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let records = state.fame_repo.load_all().await.map_err(|err| {
        error!("failed to load fame records: {}", err);
        AppError::Internal(err)
    })?;
    let mut board: Vec<FameRecord> = records.into_values().collect();
    board.sort_by(|a, b| {
        b.total_fame
            .partial_cmp(&a.total_fame)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.steam_id.cmp(&b.steam_id))
    });
    board.truncate(limit);
    Ok(board)
}
