use std::time::Duration;

use tracing::{debug, info, warn};

use backend_application::commands::cycle_commands::run_all_cycles;
use backend_application::AppState;

/// Periodic driver for all four ingest cycles. Each tick is best-effort: a
/// failing or still-running domain is reported and retried on the next tick.
pub async fn schedule_cycles(state: AppState) {
    let interval_seconds = state.config.cycle_interval_seconds;
    if interval_seconds == 0 {
        info!("cycle scheduler disabled (cycle_interval_seconds = 0)");
        return;
    }
    info!("cycle scheduler running every {}s", interval_seconds);
    let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let report = run_all_cycles(&state).await;
        if !report.failed_domains.is_empty() {
            warn!("cycle tick had failures: {}", report.failed_domains.join(", "));
        }
        let new_events: u64 = report.outcomes.iter().map(|o| o.new_events).sum();
        if new_events > 0 {
            debug!("cycle tick folded {} new events", new_events);
        }
    }
}
