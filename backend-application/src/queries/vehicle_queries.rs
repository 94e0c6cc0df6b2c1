use tracing::error;

use crate::{AppError, AppState};
use backend_domain::VehicleRecord;

const DEFAULT_LIMIT: usize = 200;
const MAX_LIMIT: usize = 2000;

/// Newest events first, capped at `limit`.
pub async fn list_vehicle_events(
    state: &AppState,
    limit: Option<usize>,
) -> Result<Vec<VehicleRecord>, AppError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let mut records = state.vehicle_repo.load_all().await.map_err(|err| {
        error!("failed to load vehicle records: {}", err);
        AppError::Internal(err)
    })?;
    records.sort_by(|a, b| b.raw_timestamp.cmp(&a.raw_timestamp));
    records.truncate(limit);
    Ok(records)
}
