use std::sync::Arc;

use backend_domain::ports::{
    CheckpointRepository,
    FameRepository,
    HealthCheckService,
    LogFileProvider,
    NotificationSink,
    PlayerRepository,
    RosterRepository,
    VehicleRepository,
};
use backend_domain::{LogDomain, RuntimeConfig};
use tokio::sync::Mutex;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub log_provider: Arc<dyn LogFileProvider>,
    pub player_repo: Arc<dyn PlayerRepository>,
    pub vehicle_repo: Arc<dyn VehicleRepository>,
    pub fame_repo: Arc<dyn FameRepository>,
    pub roster_repo: Arc<dyn RosterRepository>,
    pub checkpoint_repo: Arc<dyn CheckpointRepository>,
    pub notify_sink: Arc<dyn NotificationSink>,
    pub health_service: Arc<dyn HealthCheckService>,
    pub metrics: Arc<Metrics>,
    pub cycle_locks: Arc<CycleLocks>,
}

/// One guard per log domain. Cycles are single-flight: a trigger that finds
/// its domain's lock held returns a skipped outcome instead of queueing.
#[derive(Debug, Default)]
pub struct CycleLocks {
    presence: Mutex<()>,
    fame: Mutex<()>,
    vehicles: Mutex<()>,
    admin_log: Mutex<()>,
}

impl CycleLocks {
    pub fn for_domain(&self, domain: LogDomain) -> &Mutex<()> {
        match domain {
            LogDomain::Presence => &self.presence,
            LogDomain::Fame => &self.fame,
            LogDomain::Vehicles => &self.vehicles,
            LogDomain::AdminLog => &self.admin_log,
        }
    }
}
