// Vehicle destruction entities
// Append-only registry rows plus the owner value carried on each event

use serde::{Deserialize, Serialize};

use crate::entities::event::{VehicleEvent, VehicleKind};
use crate::value_objects::{Position, VehicleId};

/// Sentinel the game server writes for events without an owner.
pub const NO_OWNER: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleOwner {
    pub steam_id: String,
    pub in_game_id: i64,
    pub player_name: String,
}

impl VehicleOwner {
    pub fn unowned() -> Self {
        Self {
            steam_id: NO_OWNER.to_string(),
            in_game_id: -1,
            player_name: NO_OWNER.to_string(),
        }
    }

    pub fn is_unowned(&self) -> bool {
        self.steam_id == NO_OWNER
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub raw_timestamp: String,
    pub kind: VehicleKind,
    pub vehicle_type: String,
    pub vehicle_id: VehicleId,
    pub owner: VehicleOwner,
    pub location: Position,
    pub processed_at_millis: i64,
}

impl VehicleRecord {
    pub fn from_event(event: VehicleEvent, processed_at_millis: i64) -> Self {
        Self {
            raw_timestamp: event.raw_timestamp,
            kind: event.kind,
            vehicle_type: event.vehicle_type,
            vehicle_id: event.vehicle_id,
            owner: event.owner,
            location: event.location,
            processed_at_millis,
        }
    }
}
