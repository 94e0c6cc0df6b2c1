// Diff and notify gating
// Pure decisions about whether persisted state differs from the fresh fold

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

use crate::entities::{FameEvent, PlayerRecord, VehicleEvent};
use crate::value_objects::SteamId;

/// Sorted SteamIDs of every player currently flagged online.
pub fn online_roster(records: &BTreeMap<SteamId, PlayerRecord>) -> Vec<String> {
    records
        .values()
        .filter(|record| record.is_online)
        .map(|record| record.steam_id.0.clone())
        .collect()
}

#[derive(Debug, Default, PartialEq)]
pub struct RosterDiff {
    pub joined: Vec<String>,
    pub left: Vec<String>,
}

impl RosterDiff {
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.left.is_empty()
    }
}

pub fn diff_roster(previous: &[String], current: &[String]) -> RosterDiff {
    let prev: BTreeSet<&str> = previous.iter().map(String::as_str).collect();
    let cur: BTreeSet<&str> = current.iter().map(String::as_str).collect();
    RosterDiff {
        joined: cur.difference(&prev).map(|s| s.to_string()).collect(),
        left: prev.difference(&cur).map(|s| s.to_string()).collect(),
    }
}

/// Latest total per player in one fame snapshot, last occurrence winning.
pub fn fame_totals(events: &[FameEvent]) -> BTreeMap<SteamId, (String, f64)> {
    let mut totals = BTreeMap::new();
    for event in events {
        totals.insert(
            event.steam_id.clone(),
            (event.player_name.clone(), event.total_fame),
        );
    }
    totals
}

/// Content digest of one fame snapshot: file identity plus the sorted
/// `steamId:total` pairs. An unchanged digest short-circuits the cycle.
pub fn fame_digest(
    file_name: &str,
    modified_at_millis: i64,
    totals: &BTreeMap<SteamId, (String, f64)>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file_name.as_bytes());
    hasher.update(modified_at_millis.to_le_bytes());
    for (steam_id, (_, total)) in totals {
        hasher.update(steam_id.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(total.to_bits().to_le_bytes());
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

/// Events strictly newer than the checkpoint timestamp, oldest first. The raw
/// timestamp layout sorts lexicographically, so plain string order is
/// chronological order.
pub fn vehicles_past_checkpoint(
    events: Vec<VehicleEvent>,
    last_timestamp: Option<&str>,
) -> Vec<VehicleEvent> {
    let mut fresh: Vec<VehicleEvent> = events
        .into_iter()
        .filter(|event| match last_timestamp {
            Some(seen) => event.raw_timestamp.as_str() > seen,
            None => true,
        })
        .collect();
    fresh.sort_by(|a, b| a.raw_timestamp.cmp(&b.raw_timestamp));
    fresh
}

pub fn latest_vehicle_timestamp(events: &[VehicleEvent]) -> Option<String> {
    events
        .iter()
        .map(|event| event.raw_timestamp.clone())
        .max()
}
