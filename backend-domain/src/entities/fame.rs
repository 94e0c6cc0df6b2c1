// Fame record entity
// Last-write-wins running totals; totals can legitimately decrease

use serde::{Deserialize, Serialize};

use crate::value_objects::SteamId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FameRecord {
    pub steam_id: SteamId,
    pub player_name: String,
    pub total_fame: f64,
    pub updated_at_millis: i64,
}
