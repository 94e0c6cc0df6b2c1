// Session reconciliation
// Folds presence events into player records keyed by SteamID, then corrects
// online flags against the current file and closes idle open sessions.

use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::entities::{PlayerRecord, PresenceAction, PresenceEvent};
use crate::value_objects::SteamId;

/// Idle time after which the open session of an offline player is closed.
pub const AUTO_CLOSE_MIN_IDLE_MILLIS: i64 = 5 * 60 * 1000;
/// Upper bound on a single session; longer spans earn no playtime credit.
pub const SESSION_CAP_MILLIS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Default, Clone, Copy)]
pub struct ReconcileReport {
    pub folded_events: u64,
    pub replayed_events: u64,
    pub sessions_closed: u64,
    pub auto_closed: u64,
    pub forced_offline: u64,
}

/// Fold one snapshot's presence events into the records. Events are folded in
/// ascending timestamp order regardless of file order, each line exactly once
/// across all cycles (session keys guard replays). The snapshot is
/// authoritative for presence: records flagged online without a login line in
/// this file are forced offline, and open sessions of offline players close at
/// `now` once idle past the threshold.
pub fn reconcile_presence(
    records: &mut BTreeMap<SteamId, PlayerRecord>,
    events: &[PresenceEvent],
    now: NaiveDateTime,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut open_logins: HashMap<SteamId, NaiveDateTime> = HashMap::new();
    let mut seen_logins: HashSet<SteamId> = HashSet::new();

    let mut ordered: Vec<&PresenceEvent> = events.iter().collect();
    ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    for event in ordered {
        if event.action == PresenceAction::Login {
            // replayed logins still count as presence for the correction pass
            seen_logins.insert(event.steam_id.clone());
        }
        let record = records
            .entry(event.steam_id.clone())
            .or_insert_with(|| PlayerRecord::new(event.steam_id.clone(), &event.player_name));
        let key = event.session_key();
        if record.processed_session_keys.contains(&key) {
            report.replayed_events += 1;
            continue;
        }
        record.processed_session_keys.insert(key);
        record.player_name = event.player_name.clone();
        report.folded_events += 1;

        match event.action {
            PresenceAction::Login => {
                record.last_login = Some(event.timestamp);
                record.is_online = true;
                open_logins.insert(event.steam_id.clone(), event.timestamp);
            }
            PresenceAction::Logout => {
                let login = open_logins
                    .remove(&event.steam_id)
                    .or_else(|| persisted_open_login(record));
                if let Some(login) = login {
                    let span = (event.timestamp - login).num_milliseconds();
                    if span > 0 && span < SESSION_CAP_MILLIS {
                        record.total_play_time_millis += span;
                    }
                    report.sessions_closed += 1;
                }
                record.last_logout = Some(event.timestamp);
                record.is_online = false;
            }
        }
    }

    for record in records.values_mut() {
        if record.is_online && !seen_logins.contains(&record.steam_id) {
            record.is_online = false;
            report.forced_offline += 1;
        }
    }

    for record in records.values_mut() {
        if record.is_online || !record.has_open_session() {
            continue;
        }
        let Some(login) = record.last_login else { continue };
        let idle = (now - login).num_milliseconds();
        if idle >= AUTO_CLOSE_MIN_IDLE_MILLIS {
            if idle < SESSION_CAP_MILLIS {
                record.total_play_time_millis += idle;
            }
            record.last_logout = Some(now);
            report.auto_closed += 1;
        }
    }

    report
}

/// A login observed in an earlier cycle can still close a session now: the
/// record itself remembers the open session when the marker map does not.
fn persisted_open_login(record: &PlayerRecord) -> Option<NaiveDateTime> {
    if record.has_open_session() {
        record.last_login
    } else {
        None
    }
}
