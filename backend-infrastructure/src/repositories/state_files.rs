// JSON-document repositories
// One document per domain under the state directory; writes go to a temp
// file first and rename into place so a crash never leaves a torn document.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use backend_domain::ports::{
    CheckpointRepository,
    FameRepository,
    PlayerRepository,
    RosterRepository,
    VehicleRepository,
};
use backend_domain::{Checkpoint, FameRecord, LogDomain, PlayerRecord, SteamId, VehicleRecord};

const PLAYERS_FILE: &str = "players.json";
const VEHICLES_FILE: &str = "vehicles.json";
const FAME_FILE: &str = "fame.json";
const ROSTER_FILE: &str = "roster.json";
const CHECKPOINTS_FILE: &str = "checkpoints.json";

pub struct StateFileRepository {
    state_dir: PathBuf,
}

impl StateFileRepository {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    async fn load_document<T: DeserializeOwned + Default>(&self, file_name: &str) -> anyhow::Result<T> {
        let path = self.state_dir.join(file_name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn save_document<T: Serialize>(&self, file_name: &str, value: &T) -> anyhow::Result<()> {
        fs::create_dir_all(&self.state_dir).await?;
        let path = self.state_dir.join(file_name);
        let tmp = self.state_dir.join(format!("{}.tmp", file_name));
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl PlayerRepository for StateFileRepository {
    async fn load_all(&self) -> anyhow::Result<BTreeMap<SteamId, PlayerRecord>> {
        self.load_document(PLAYERS_FILE).await
    }

    async fn save_all(&self, records: &BTreeMap<SteamId, PlayerRecord>) -> anyhow::Result<()> {
        self.save_document(PLAYERS_FILE, records).await
    }
}

#[async_trait]
impl VehicleRepository for StateFileRepository {
    async fn load_all(&self) -> anyhow::Result<Vec<VehicleRecord>> {
        self.load_document(VEHICLES_FILE).await
    }

    async fn append(&self, records: &[VehicleRecord]) -> anyhow::Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut all: Vec<VehicleRecord> = self.load_document(VEHICLES_FILE).await?;
        all.extend_from_slice(records);
        self.save_document(VEHICLES_FILE, &all).await
    }
}

#[async_trait]
impl FameRepository for StateFileRepository {
    async fn load_all(&self) -> anyhow::Result<BTreeMap<SteamId, FameRecord>> {
        self.load_document(FAME_FILE).await
    }

    async fn save_all(&self, records: &BTreeMap<SteamId, FameRecord>) -> anyhow::Result<()> {
        self.save_document(FAME_FILE, records).await
    }
}

#[async_trait]
impl RosterRepository for StateFileRepository {
    async fn load(&self) -> anyhow::Result<Vec<String>> {
        self.load_document(ROSTER_FILE).await
    }

    async fn save(&self, steam_ids: &[String]) -> anyhow::Result<()> {
        self.save_document(ROSTER_FILE, &steam_ids).await
    }
}

#[async_trait]
impl CheckpointRepository for StateFileRepository {
    async fn load(&self, domain: LogDomain) -> anyhow::Result<Option<Checkpoint>> {
        let all: BTreeMap<String, Checkpoint> = self.load_document(CHECKPOINTS_FILE).await?;
        Ok(all.get(domain.as_str()).cloned())
    }

    async fn save(&self, domain: LogDomain, checkpoint: &Checkpoint) -> anyhow::Result<()> {
        let mut all: BTreeMap<String, Checkpoint> = self.load_document(CHECKPOINTS_FILE).await?;
        all.insert(domain.as_str().to_string(), checkpoint.clone());
        self.save_document(CHECKPOINTS_FILE, &all).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::{Position, VehicleEvent, VehicleId, VehicleKind, VehicleOwner};

    fn repo() -> (tempfile::TempDir, StateFileRepository) {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = StateFileRepository::new(dir.path().join("state"));
        (dir, repo)
    }

    fn vehicle_row(ts: &str, id: i64) -> VehicleRecord {
        VehicleRecord::from_event(
            VehicleEvent {
                raw_timestamp: ts.to_string(),
                kind: VehicleKind::Destroyed,
                vehicle_type: "BPC_Dirtbike".to_string(),
                vehicle_id: VehicleId(id),
                owner: VehicleOwner::unowned(),
                location: Position { x: 0.0, y: 0.0, z: 0.0 },
            },
            0,
        )
    }

    #[tokio::test]
    async fn missing_documents_load_as_empty() {
        let (_dir, repo) = repo();
        assert!(PlayerRepository::load_all(&repo).await.expect("load").is_empty());
        assert!(VehicleRepository::load_all(&repo).await.expect("load").is_empty());
        assert!(RosterRepository::load(&repo).await.expect("load").is_empty());
        assert!(CheckpointRepository::load(&repo, LogDomain::Fame)
            .await
            .expect("load")
            .is_none());
    }

    #[tokio::test]
    async fn player_records_survive_a_rewrite() {
        let (_dir, repo) = repo();
        let sid = SteamId("76561198000000001".to_string());
        let mut records = BTreeMap::new();
        let mut record = PlayerRecord::new(sid.clone(), "Rico");
        record.total_play_time_millis = 5_400_000;
        record.processed_session_keys.insert("2026.08.20-18.00.00_login".to_string());
        records.insert(sid.clone(), record);

        PlayerRepository::save_all(&repo, &records).await.expect("save");
        let loaded = PlayerRepository::load_all(&repo).await.expect("load");
        assert_eq!(loaded[&sid].total_play_time_millis, 5_400_000);
        assert!(loaded[&sid]
            .processed_session_keys
            .contains("2026.08.20-18.00.00_login"));

        // second save replaces the document in place
        PlayerRepository::save_all(&repo, &loaded).await.expect("save again");
        assert_eq!(PlayerRepository::load_all(&repo).await.expect("load").len(), 1);
    }

    #[tokio::test]
    async fn vehicle_appends_accumulate() {
        let (_dir, repo) = repo();
        repo.append(&[vehicle_row("2026.08.20-09.00.00", 1)])
            .await
            .expect("append");
        repo.append(&[vehicle_row("2026.08.20-10.00.00", 2)])
            .await
            .expect("append");

        let all = VehicleRepository::load_all(&repo).await.expect("load");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].vehicle_id.0, 1);
        assert_eq!(all[1].vehicle_id.0, 2);
    }

    #[tokio::test]
    async fn checkpoints_are_isolated_per_domain() {
        let (_dir, repo) = repo();
        CheckpointRepository::save(
            &repo,
            LogDomain::AdminLog,
            &Checkpoint::Offset {
                file_name: "admin_20260820.log".to_string(),
                last_line_index: 42,
            },
        )
        .await
        .expect("save");
        CheckpointRepository::save(
            &repo,
            LogDomain::Vehicles,
            &Checkpoint::Timestamp {
                last_timestamp: "2026.08.20-10.00.00".to_string(),
            },
        )
        .await
        .expect("save");

        let admin = CheckpointRepository::load(&repo, LogDomain::AdminLog)
            .await
            .expect("load")
            .expect("stored");
        assert_eq!(admin.resume_index("admin_20260820.log"), 42);
        assert_eq!(admin.resume_index("admin_20260821.log"), -1, "rotation voids it");

        let vehicles = CheckpointRepository::load(&repo, LogDomain::Vehicles)
            .await
            .expect("load")
            .expect("stored");
        assert_eq!(vehicles.last_timestamp(), Some("2026.08.20-10.00.00"));
    }

    #[tokio::test]
    async fn roster_round_trips() {
        let (_dir, repo) = repo();
        let roster = vec![
            "76561198000000001".to_string(),
            "76561198000000002".to_string(),
        ];
        RosterRepository::save(&repo, &roster).await.expect("save");
        assert_eq!(RosterRepository::load(&repo).await.expect("load"), roster);
    }
}
