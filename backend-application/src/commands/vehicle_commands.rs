use tracing::{debug, info};

use crate::commands::cycle_commands::deliver_notification;
use crate::{AppError, AppState};
use backend_domain::services::{extract_vehicles, vehicles_past_checkpoint};
use backend_domain::utils::current_millis;
use backend_domain::{
    Checkpoint,
    CycleOutcome,
    LogDomain,
    NotificationMessage,
    VehicleEvent,
    VehicleRecord,
};

const VEHICLE_COLOR: u32 = 0xE74C3C;

pub async fn run_vehicle_cycle(state: &AppState) -> Result<CycleOutcome, AppError> {
    let domain = LogDomain::Vehicles;
    let Ok(_guard) = state.cycle_locks.for_domain(domain).try_lock() else {
        state.metrics.record_cycle_skipped();
        return Ok(CycleOutcome::skipped(domain));
    };
    match vehicle_cycle(state).await {
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

async fn vehicle_cycle(state: &AppState) -> Result<CycleOutcome, AppError> {
    let domain = LogDomain::Vehicles;
    let Some(meta) = state.log_provider.resolve_latest(domain).await? else {
        debug!("no vehicle log file yet");
        return Ok(CycleOutcome::idle(domain));
    };
    let content = state.log_provider.read_file(&meta).await?;

    let extraction = extract_vehicles(&content);
    if extraction.unrecognized > 0 {
        state.metrics.record_unrecognized(extraction.unrecognized);
        debug!(
            "{} unrecognized lines in {}",
            extraction.unrecognized, meta.file_name
        );
    }

    let checkpoint = state.checkpoint_repo.load(domain).await?;
    let last_seen = checkpoint.as_ref().and_then(|c| c.last_timestamp()).map(str::to_string);
    let fresh = vehicles_past_checkpoint(extraction.events, last_seen.as_deref());
    let Some(newest) = fresh.last().cloned() else {
        return Ok(CycleOutcome::idle(domain));
    };

    let now_millis = current_millis();
    let records: Vec<VehicleRecord> = fresh
        .iter()
        .cloned()
        .map(|event| VehicleRecord::from_event(event, now_millis))
        .collect();
    state.vehicle_repo.append(&records).await?;
    state.metrics.record_folded(records.len() as u64);

    // every new event is persisted, only the most recent one is announced
    let message = build_vehicle_message(&newest, now_millis);
    let notified = deliver_notification(state, &message).await;

    let advanced = Checkpoint::Timestamp {
        last_timestamp: newest.raw_timestamp.clone(),
    };
    state.checkpoint_repo.save(domain, &advanced).await?;

    info!(
        "vehicle cycle: {} new events, latest at {}",
        records.len(),
        newest.raw_timestamp
    );

    Ok(CycleOutcome {
        domain,
        new_events: records.len() as u64,
        notified,
        skipped: false,
    })
}

fn build_vehicle_message(event: &VehicleEvent, timestamp_millis: i64) -> NotificationMessage {
    let owner = if event.owner.is_unowned() {
        event.owner.player_name.clone()
    } else {
        format!("{} ({})", event.owner.player_name, event.owner.steam_id)
    };
    NotificationMessage::new(
        "Vehicle lost",
        &format!("{} ({})", event.vehicle_type, event.kind.as_str()),
        VEHICLE_COLOR,
        timestamp_millis,
    )
    .with_field("Vehicle ID", &event.vehicle_id.to_string())
    .with_field("Owner", &owner)
    .with_field("Location", &event.location.to_string())
    .with_field("When", &event.raw_timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture;

    fn vehicle_line(ts: &str, id: i64) -> String {
        format!(
            "{ts}: [LogVehicleDestroyed] Destroyed. Vehicle: BPC_Dirtbike. VehicleId: {id}. Owner: 76561198000000001 (12, Rico). Location: X=1.0, Y=2.0, Z=3.0"
        )
    }

    #[tokio::test]
    async fn appends_all_new_events_but_notifies_only_the_latest() {
        let fx = fixture();
        let content = format!(
            "{}\n{}\n{}\n",
            vehicle_line("2026.08.20-09.00.00", 1),
            vehicle_line("2026.08.20-11.00.00", 2),
            vehicle_line("2026.08.20-12.00.00", 3),
        );
        fx.provider.set_file(LogDomain::Vehicles, "vehicle_destruction_20260820.log", 1000, &content);
        fx.checkpoints
            .set(
                LogDomain::Vehicles,
                Checkpoint::Timestamp {
                    last_timestamp: "2026.08.20-10.00.00".to_string(),
                },
            )
            .await;

        let outcome = run_vehicle_cycle(&fx.state).await.expect("cycle runs");

        assert_eq!(outcome.new_events, 2);
        assert!(outcome.notified);
        let stored = fx.vehicles.all().await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].vehicle_id.0, 2);
        assert_eq!(stored[1].vehicle_id.0, 3);

        let delivered = fx.sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].fields.iter().any(|f| f.value == "3"), "latest event announced");

        assert_eq!(
            fx.checkpoints.get(LogDomain::Vehicles).await,
            Some(Checkpoint::Timestamp {
                last_timestamp: "2026.08.20-12.00.00".to_string()
            })
        );
    }

    #[tokio::test]
    async fn no_events_past_checkpoint_is_idle() {
        let fx = fixture();
        fx.provider.set_file(
            LogDomain::Vehicles,
            "vehicle_destruction_20260820.log",
            1000,
            &vehicle_line("2026.08.20-09.00.00", 1),
        );
        fx.checkpoints
            .set(
                LogDomain::Vehicles,
                Checkpoint::Timestamp {
                    last_timestamp: "2026.08.20-09.00.00".to_string(),
                },
            )
            .await;

        let outcome = run_vehicle_cycle(&fx.state).await.expect("cycle runs");

        assert_eq!(outcome.new_events, 0);
        assert!(!outcome.notified);
        assert!(fx.vehicles.all().await.is_empty());
        assert!(fx.sink.delivered().is_empty());
    }

    #[tokio::test]
    async fn rerun_after_advance_is_quiet() {
        let fx = fixture();
        fx.provider.set_file(
            LogDomain::Vehicles,
            "vehicle_destruction_20260820.log",
            1000,
            &vehicle_line("2026.08.20-09.00.00", 1),
        );

        let first = run_vehicle_cycle(&fx.state).await.expect("first run");
        assert_eq!(first.new_events, 1);
        let second = run_vehicle_cycle(&fx.state).await.expect("second run");
        assert_eq!(second.new_events, 0);
        assert_eq!(fx.vehicles.all().await.len(), 1, "no duplicate rows");
        assert_eq!(fx.sink.delivered().len(), 1);
    }
}
