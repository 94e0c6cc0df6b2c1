use serde::Serialize;
use tracing::{debug, warn};

use crate::{AppError, AppState};
use backend_domain::{CycleOutcome, LogDomain, NotificationMessage};

use super::{admin_log_commands, fame_commands, presence_commands, vehicle_commands};

pub async fn run_cycle(state: &AppState, domain: LogDomain) -> Result<CycleOutcome, AppError> {
    match domain {
        LogDomain::Presence => presence_commands::run_presence_cycle(state).await,
        LogDomain::Fame => fame_commands::run_fame_cycle(state).await,
        LogDomain::Vehicles => vehicle_commands::run_vehicle_cycle(state).await,
        LogDomain::AdminLog => admin_log_commands::run_admin_log_cycle(state).await,
    }
}

#[derive(Debug, Serialize)]
pub struct RunAllReport {
    pub outcomes: Vec<CycleOutcome>,
    pub failed_domains: Vec<String>,
}

/// Runs every domain cycle in turn. A failing domain is logged and reported
/// but never stops the others.
pub async fn run_all_cycles(state: &AppState) -> RunAllReport {
    let mut report = RunAllReport {
        outcomes: Vec::with_capacity(LogDomain::ALL.len()),
        failed_domains: Vec::new(),
    };
    for domain in LogDomain::ALL {
        match run_cycle(state, domain).await {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(err) => {
                warn!("{} cycle failed: {}", domain.as_str(), err);
                report.failed_domains.push(domain.as_str().to_string());
            }
        }
    }
    report
}

/// Delivery is off the durability path: failures are logged and counted,
/// never bubbled into the cycle result.
pub(crate) async fn deliver_notification(state: &AppState, message: &NotificationMessage) -> bool {
    if !state.notify_sink.is_configured() {
        debug!("notification sink not configured, skipping delivery");
        return false;
    }
    match state.notify_sink.deliver(message).await {
        Ok(()) => {
            state.metrics.record_notification();
            true
        }
        Err(err) => {
            state.metrics.record_notification_failure();
            warn!("notification delivery failed: {}", err);
            false
        }
    }
}
