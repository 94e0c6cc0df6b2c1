// Player record entity
// Durable per-player presence state, keyed by SteamID, never deleted

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::value_objects::SteamId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub steam_id: SteamId,
    pub player_name: String,
    pub total_play_time_millis: i64,
    pub last_login: Option<NaiveDateTime>,
    pub last_logout: Option<NaiveDateTime>,
    pub is_online: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Replay guard: `<raw_timestamp>_<action>` of every folded presence line.
    /// Grows for the lifetime of the record.
    #[serde(default)]
    pub processed_session_keys: BTreeSet<String>,
}

impl PlayerRecord {
    pub fn new(steam_id: SteamId, player_name: &str) -> Self {
        Self {
            steam_id,
            player_name: player_name.to_string(),
            total_play_time_millis: 0,
            last_login: None,
            last_logout: None,
            is_online: false,
            tags: Vec::new(),
            processed_session_keys: BTreeSet::new(),
        }
    }

    /// A session is open when the newest login has no newer logout.
    pub fn has_open_session(&self) -> bool {
        match (self.last_login, self.last_logout) {
            (Some(login), Some(logout)) => logout < login,
            (Some(_), None) => true,
            _ => false,
        }
    }
}
