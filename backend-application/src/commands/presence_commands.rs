use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};

use crate::commands::cycle_commands::deliver_notification;
use crate::{AppError, AppState};
use backend_domain::services::{diff_roster, extract_presence, online_roster, reconcile_presence, RosterDiff};
use backend_domain::utils::current_millis;
use backend_domain::{CycleOutcome, LogDomain, NotificationMessage, PlayerRecord, SteamId};

const PRESENCE_COLOR: u32 = 0x2ECC71;

pub async fn run_presence_cycle(state: &AppState) -> Result<CycleOutcome, AppError> {
    let domain = LogDomain::Presence;
    let Ok(_guard) = state.cycle_locks.for_domain(domain).try_lock() else {
        state.metrics.record_cycle_skipped();
        return Ok(CycleOutcome::skipped(domain));
    };
    match presence_cycle(state).await {
        Ok(outcome) => {
            state.metrics.record_cycle();
            Ok(outcome)
        }
        Err(err) => {
            state.metrics.record_cycle_error();
            Err(err)
        }
    }
}

async fn presence_cycle(state: &AppState) -> Result<CycleOutcome, AppError> {
    let domain = LogDomain::Presence;
    let Some(meta) = state.log_provider.resolve_latest(domain).await? else {
        debug!("no presence log file yet");
        return Ok(CycleOutcome::idle(domain));
    };
    let content = state.log_provider.read_file(&meta).await?;

    let extraction = extract_presence(&content);
    if extraction.unrecognized > 0 {
        state.metrics.record_unrecognized(extraction.unrecognized);
        debug!(
            "{} unrecognized lines in {}",
            extraction.unrecognized, meta.file_name
        );
    }

    let mut records = state.player_repo.load_all().await?;
    let now = Utc::now().naive_utc();
    let report = reconcile_presence(&mut records, &extraction.events, now);
    state.player_repo.save_all(&records).await?;
    state.metrics.record_folded(report.folded_events);

    let current = online_roster(&records);
    let previous = state.roster_repo.load().await?;
    let diff = diff_roster(&previous, &current);

    let mut notified = false;
    if !diff.is_empty() {
        let message = build_roster_message(&records, &diff, current.len());
        notified = deliver_notification(state, &message).await;
    }
    state.roster_repo.save(&current).await?;

    if report.folded_events > 0 || report.auto_closed > 0 || report.forced_offline > 0 {
        info!(
            "presence cycle: {} folded, {} replayed, {} auto-closed, {} forced offline, {} online",
            report.folded_events,
            report.replayed_events,
            report.auto_closed,
            report.forced_offline,
            current.len()
        );
    }

    Ok(CycleOutcome {
        domain,
        new_events: report.folded_events,
        notified,
        skipped: false,
    })
}

fn build_roster_message(
    records: &BTreeMap<SteamId, PlayerRecord>,
    diff: &RosterDiff,
    online_count: usize,
) -> NotificationMessage {
    let mut message = NotificationMessage::new(
        "Player presence changed",
        &format!("{} player(s) online", online_count),
        PRESENCE_COLOR,
        current_millis(),
    );
    if !diff.joined.is_empty() {
        message = message.with_field("Joined", &named_list(records, &diff.joined));
    }
    if !diff.left.is_empty() {
        message = message.with_field("Left", &named_list(records, &diff.left));
    }
    message
}

fn named_list(records: &BTreeMap<SteamId, PlayerRecord>, steam_ids: &[String]) -> String {
    steam_ids
        .iter()
        .map(|sid| match records.get(&SteamId(sid.clone())) {
            Some(record) => format!("{} ({})", record.player_name, sid),
            None => sid.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
