use tracing::{debug, info};

use crate::commands::cycle_commands::deliver_notification;
use crate::{AppError, AppState};
use backend_domain::services::{extract_fame, fame_digest, fame_totals};
use backend_domain::utils::current_millis;
use backend_domain::{Checkpoint, CycleOutcome, FameRecord, LogDomain, NotificationMessage};

const FAME_COLOR: u32 = 0xF1C40F;
const MAX_LISTED_CHANGES: usize = 8;

pub async fn run_fame_cycle(state: &AppState) -> Result<CycleOutcome, AppError> {
    let domain = LogDomain::Fame;
    let Ok(_guard) = state.cycle_locks.for_domain(domain).try_lock() else {
        state.metrics.record_cycle_skipped();
        return Ok(CycleOutcome::skipped(domain));
    };
    match fame_cycle(state).await {
        Ok(outcome) => {
            if outcome.skipped {
                state.metrics.record_cycle_skipped();
            } else {
                state.metrics.record_cycle();
            }
            Ok(outcome)
        }
        Err(err) => {
            state.metrics.record_cycle_error();
            Err(err)
        }
    }
}

async fn fame_cycle(state: &AppState) -> Result<CycleOutcome, AppError> {
    let domain = LogDomain::Fame;
    let Some(meta) = state.log_provider.resolve_latest(domain).await? else {
        debug!("no fame log file yet");
        return Ok(CycleOutcome::idle(domain));
    };
    let content = state.log_provider.read_file(&meta).await?;

    let extraction = extract_fame(&content);
    if extraction.unrecognized > 0 {
        state.metrics.record_unrecognized(extraction.unrecognized);
        debug!(
            "{} unrecognized lines in {}",
            extraction.unrecognized, meta.file_name
        );
    }

    let totals = fame_totals(&extraction.events);
    let digest = fame_digest(&meta.file_name, meta.modified_at_millis, &totals);
    let checkpoint = state.checkpoint_repo.load(domain).await?;
    if checkpoint
        .as_ref()
        .map_or(false, |c| c.matches_digest(&meta.file_name, meta.modified_at_millis, &digest))
    {
        debug!("fame snapshot unchanged, short-circuiting");
        return Ok(CycleOutcome::skipped(domain));
    }

    let mut records = state.fame_repo.load_all().await?;
    let now_millis = current_millis();
    let mut changed: Vec<FameRecord> = Vec::new();
    for (steam_id, (player_name, total_fame)) in &totals {
        let unchanged = records.get(steam_id).is_some_and(|existing| {
            existing.total_fame == *total_fame && existing.player_name == *player_name
        });
        if unchanged {
            continue;
        }
        let record = FameRecord {
            steam_id: steam_id.clone(),
            player_name: player_name.clone(),
            total_fame: *total_fame,
            updated_at_millis: now_millis,
        };
        records.insert(steam_id.clone(), record.clone());
        changed.push(record);
    }
    state.fame_repo.save_all(&records).await?;
    state.metrics.record_folded(changed.len() as u64);

    let mut notified = false;
    if !changed.is_empty() {
        let message = build_fame_message(&changed, now_millis);
        notified = deliver_notification(state, &message).await;
        info!("fame cycle: {} totals changed", changed.len());
    }

    let advanced = Checkpoint::Hash {
        file_name: meta.file_name.clone(),
        file_modified_at_millis: meta.modified_at_millis,
        content_hash: digest,
    };
    state.checkpoint_repo.save(domain, &advanced).await?;

    Ok(CycleOutcome {
        domain,
        new_events: changed.len() as u64,
        notified,
        skipped: false,
    })
}

fn build_fame_message(changed: &[FameRecord], timestamp_millis: i64) -> NotificationMessage {
    let mut message = NotificationMessage::new(
        "Fame points updated",
        &format!("{} player(s) with new totals", changed.len()),
        FAME_COLOR,
        timestamp_millis,
    );
    for record in changed.iter().take(MAX_LISTED_CHANGES) {
        message = message.with_field(&record.player_name, &format!("{}", record.total_fame));
    }
    if changed.len() > MAX_LISTED_CHANGES {
        message = message.with_field("More", &format!("...and {} more", changed.len() - MAX_LISTED_CHANGES));
    }
    message
}
