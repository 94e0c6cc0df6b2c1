use tracing::{debug, info, warn};

use crate::commands::cycle_commands::deliver_notification;
use crate::{AppError, AppState};
use backend_domain::services::parse_admin_line;
use backend_domain::utils::current_millis;
use backend_domain::value_objects::checkpoint::BEFORE_FIRST_LINE;
use backend_domain::{AdminCommandEvent, Checkpoint, CycleOutcome, LogDomain, NotificationMessage};

const ADMIN_COLOR: u32 = 0x9B59B6;

pub async fn run_admin_log_cycle(state: &AppState) -> Result<CycleOutcome, AppError> {
    let domain = LogDomain::AdminLog;
    let Ok(_guard) = state.cycle_locks.for_domain(domain).try_lock() else {
        state.metrics.record_cycle_skipped();
        return Ok(CycleOutcome::skipped(domain));
    };
    match admin_log_cycle(state).await {
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

async fn admin_log_cycle(state: &AppState) -> Result<CycleOutcome, AppError> {
    let domain = LogDomain::AdminLog;
    let Some(meta) = state.log_provider.resolve_latest(domain).await? else {
        debug!("no admin log file yet");
        return Ok(CycleOutcome::idle(domain));
    };

    let checkpoint = state.checkpoint_repo.load(domain).await?;
    let resume = checkpoint
        .as_ref()
        .map_or(BEFORE_FIRST_LINE, |c| c.resume_index(&meta.file_name));

    let content = state.log_provider.read_file(&meta).await?;
    let lines: Vec<&str> = content.lines().map(|line| line.trim_end_matches('\r')).collect();
    let last_index = lines.len() as i64 - 1;
    if last_index <= resume {
        return Ok(CycleOutcome::idle(domain));
    }

    let now_millis = current_millis();
    let mut new_events = 0u64;
    let mut notified = false;
    let mut failures = 0u64;

    // every new line goes out on its own, oldest first; a failed delivery
    // never holds up the rest of the batch
    for line in lines.iter().skip((resume + 1) as usize) {
        if line.trim().is_empty() {
            continue;
        }
        new_events += 1;
        let message = match parse_admin_line(line) {
            Some(event) => build_admin_message(&event, now_millis),
            None => build_raw_message(line, now_millis),
        };
        if deliver_notification(state, &message).await {
            notified = true;
        } else {
            failures += 1;
        }
    }

    if new_events > 0 {
        state.metrics.record_folded(new_events);
        let advanced = Checkpoint::Offset {
            file_name: meta.file_name.clone(),
            last_line_index: last_index,
        };
        state.checkpoint_repo.save(domain, &advanced).await?;
        if failures > 0 {
            warn!("{} of {} admin log notifications failed", failures, new_events);
        }
        info!("admin log cycle: {} new lines in {}", new_events, meta.file_name);
    }

    Ok(CycleOutcome {
        domain,
        new_events,
        notified,
        skipped: false,
    })
}

fn build_admin_message(event: &AdminCommandEvent, timestamp_millis: i64) -> NotificationMessage {
    let actor = match (&event.actor_name, &event.steam_id) {
        (Some(name), Some(steam_id)) => format!("{} ({})", name, steam_id),
        _ => "server".to_string(),
    };
    let mut message = NotificationMessage::new(
        "Admin command",
        &event.command,
        ADMIN_COLOR,
        timestamp_millis,
    )
    .with_field("Actor", &actor)
    .with_field("When", &event.raw_timestamp);
    if !event.argument.is_empty() {
        message = message.with_field("Argument", &event.argument);
    }
    message
}

fn build_raw_message(line: &str, timestamp_millis: i64) -> NotificationMessage {
    NotificationMessage::new("Admin log entry", line, ADMIN_COLOR, timestamp_millis)
}
