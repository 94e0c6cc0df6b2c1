// Extracted log events
// One struct per line grammar; raw timestamps keep the server's own layout

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Position, SteamId, VehicleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceAction {
    Login,
    Logout,
}

impl PresenceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceAction::Login => "login",
            PresenceAction::Logout => "logout",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceEvent {
    pub timestamp: NaiveDateTime,
    pub raw_timestamp: String,
    pub action: PresenceAction,
    pub steam_id: SteamId,
    pub player_name: String,
    pub ip: String,
    pub position: Option<Position>,
    pub detail: Option<String>,
}

impl PresenceEvent {
    /// Replay-guard key, unique per observed line for a given player.
    pub fn session_key(&self) -> String {
        format!("{}_{}", self.raw_timestamp, self.action.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FameEvent {
    pub raw_timestamp: String,
    pub steam_id: SteamId,
    pub player_name: String,
    pub total_fame: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Destroyed,
    Disappeared,
    ForbiddenZoneTimerExpired,
    InactiveTimerReached,
    Other(String),
}

impl VehicleKind {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleKind::Destroyed => "Destroyed",
            VehicleKind::Disappeared => "Disappeared",
            VehicleKind::ForbiddenZoneTimerExpired => "ForbiddenZoneTimerExpired",
            VehicleKind::InactiveTimerReached => "InactiveTimerReached",
            VehicleKind::Other(kind) => kind,
        }
    }
}

impl From<&str> for VehicleKind {
    fn from(s: &str) -> Self {
        match s {
            "Destroyed" => VehicleKind::Destroyed,
            "Disappeared" => VehicleKind::Disappeared,
            "ForbiddenZoneTimerExpired" => VehicleKind::ForbiddenZoneTimerExpired,
            "VehicleInactiveTimerReached" | "InactiveTimerReached" => VehicleKind::InactiveTimerReached,
            other => VehicleKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleEvent {
    pub raw_timestamp: String,
    pub kind: VehicleKind,
    pub vehicle_type: String,
    pub vehicle_id: VehicleId,
    pub owner: crate::entities::vehicle::VehicleOwner,
    pub location: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCommandEvent {
    pub raw_timestamp: String,
    pub steam_id: Option<SteamId>,
    pub actor_name: Option<String>,
    pub command: String,
    pub argument: String,
}
