// In-memory port fakes for cycle command tests

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::state::CycleLocks;
use crate::{AppState, Metrics};
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
use backend_domain::{
    Checkpoint,
    DeliveryRecord,
    FameRecord,
    LogDomain,
    LogFileMeta,
    NotificationMessage,
    PlayerRecord,
    RuntimeConfig,
    SteamId,
    VehicleRecord,
};

pub struct Fixture {
    pub state: AppState,
    pub provider: Arc<FakeLogProvider>,
    pub players: Arc<InMemoryPlayers>,
    pub vehicles: Arc<InMemoryVehicles>,
    pub fame: Arc<InMemoryFame>,
    pub roster: Arc<InMemoryRoster>,
    pub checkpoints: Arc<InMemoryCheckpoints>,
    pub sink: Arc<FakeSink>,
}

pub fn fixture() -> Fixture {
    let provider = Arc::new(FakeLogProvider::default());
    let players = Arc::new(InMemoryPlayers::default());
    let vehicles = Arc::new(InMemoryVehicles::default());
    let fame = Arc::new(InMemoryFame::default());
    let roster = Arc::new(InMemoryRoster::default());
    let checkpoints = Arc::new(InMemoryCheckpoints::default());
    let sink = Arc::new(FakeSink::default());

    let state = AppState {
        config: RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: None,
            request_timeout_seconds: 5,
            max_body_bytes: 1024 * 1024,
            cycle_interval_seconds: 0,
        },
        log_provider: provider.clone(),
        player_repo: players.clone(),
        vehicle_repo: vehicles.clone(),
        fame_repo: fame.clone(),
        roster_repo: roster.clone(),
        checkpoint_repo: checkpoints.clone(),
        notify_sink: sink.clone(),
        health_service: Arc::new(AlwaysHealthy),
        metrics: Arc::new(Metrics::default()),
        cycle_locks: Arc::new(CycleLocks::default()),
    };

    Fixture {
        state,
        provider,
        players,
        vehicles,
        fame,
        roster,
        checkpoints,
        sink,
    }
}

#[derive(Default)]
pub struct FakeLogProvider {
    files: StdMutex<HashMap<LogDomain, (LogFileMeta, String)>>,
}

impl FakeLogProvider {
    pub fn set_file(&self, domain: LogDomain, file_name: &str, modified_at_millis: i64, content: &str) {
        let meta = LogFileMeta {
            file_name: file_name.to_string(),
            modified_at_millis,
        };
        self.files
            .lock()
            .unwrap()
            .insert(domain, (meta, content.to_string()));
    }
}

#[async_trait]
impl LogFileProvider for FakeLogProvider {
    async fn resolve_latest(&self, domain: LogDomain) -> anyhow::Result<Option<LogFileMeta>> {
        Ok(self.files.lock().unwrap().get(&domain).map(|(meta, _)| meta.clone()))
    }

    async fn read_file(&self, meta: &LogFileMeta) -> anyhow::Result<String> {
        let files = self.files.lock().unwrap();
        files
            .values()
            .find(|(stored, _)| stored.file_name == meta.file_name)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", meta.file_name))
    }
}

#[derive(Default)]
pub struct InMemoryPlayers {
    records: Mutex<BTreeMap<SteamId, PlayerRecord>>,
}

impl InMemoryPlayers {
    pub async fn snapshot(&self) -> BTreeMap<SteamId, PlayerRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayers {
    async fn load_all(&self) -> anyhow::Result<BTreeMap<SteamId, PlayerRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn save_all(&self, records: &BTreeMap<SteamId, PlayerRecord>) -> anyhow::Result<()> {
        *self.records.lock().await = records.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryVehicles {
    records: Mutex<Vec<VehicleRecord>>,
}

impl InMemoryVehicles {
    pub async fn all(&self) -> Vec<VehicleRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicles {
    async fn load_all(&self) -> anyhow::Result<Vec<VehicleRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn append(&self, records: &[VehicleRecord]) -> anyhow::Result<()> {
        self.records.lock().await.extend_from_slice(records);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryFame {
    records: Mutex<BTreeMap<SteamId, FameRecord>>,
}

impl InMemoryFame {
    pub async fn snapshot(&self) -> BTreeMap<SteamId, FameRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl FameRepository for InMemoryFame {
    async fn load_all(&self) -> anyhow::Result<BTreeMap<SteamId, FameRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn save_all(&self, records: &BTreeMap<SteamId, FameRecord>) -> anyhow::Result<()> {
        *self.records.lock().await = records.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRoster {
    steam_ids: Mutex<Vec<String>>,
}

impl InMemoryRoster {
    pub async fn current(&self) -> Vec<String> {
        self.steam_ids.lock().await.clone()
    }
}

#[async_trait]
impl RosterRepository for InMemoryRoster {
    async fn load(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.steam_ids.lock().await.clone())
    }

    async fn save(&self, steam_ids: &[String]) -> anyhow::Result<()> {
        *self.steam_ids.lock().await = steam_ids.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCheckpoints {
    checkpoints: Mutex<HashMap<LogDomain, Checkpoint>>,
}

impl InMemoryCheckpoints {
    pub async fn get(&self, domain: LogDomain) -> Option<Checkpoint> {
        self.checkpoints.lock().await.get(&domain).cloned()
    }

    pub async fn set(&self, domain: LogDomain, checkpoint: Checkpoint) {
        self.checkpoints.lock().await.insert(domain, checkpoint);
    }
}

#[async_trait]
impl CheckpointRepository for InMemoryCheckpoints {
    async fn load(&self, domain: LogDomain) -> anyhow::Result<Option<Checkpoint>> {
        Ok(self.checkpoints.lock().await.get(&domain).cloned())
    }

    async fn save(&self, domain: LogDomain, checkpoint: &Checkpoint) -> anyhow::Result<()> {
        self.checkpoints.lock().await.insert(domain, checkpoint.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSink {
    messages: StdMutex<VecDeque<NotificationMessage>>,
    failures_remaining: AtomicUsize,
}

impl FakeSink {
    pub fn delivered(&self) -> Vec<NotificationMessage> {
        self.messages.lock().unwrap().iter().cloned().collect()
    }

    /// The next `count` deliveries fail before succeeding again.
    pub fn fail_next(&self, count: usize) {
        self.failures_remaining.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl NotificationSink for FakeSink {
    fn is_configured(&self) -> bool {
        true
    }

    async fn deliver(&self, message: &NotificationMessage) -> anyhow::Result<()> {
        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            anyhow::bail!("injected delivery failure");
        }
        self.messages.lock().unwrap().push_back(message.clone());
        Ok(())
    }

    async fn check_target(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn list_deliveries(&self, _limit: usize) -> Vec<DeliveryRecord> {
        Vec::new()
    }

    async fn last_delivery(&self) -> Option<DeliveryRecord> {
        None
    }
}

struct AlwaysHealthy;

#[async_trait]
impl HealthCheckService for AlwaysHealthy {
    async fn check_log_directory(&self) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn check_state_directory(&self) -> anyhow::Result<bool> {
        Ok(true)
    }
}
