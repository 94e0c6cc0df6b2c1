use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::entities::{FameRecord, PlayerRecord, VehicleRecord};
use crate::value_objects::{Checkpoint, LogDomain, SteamId};

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn load_all(&self) -> anyhow::Result<BTreeMap<SteamId, PlayerRecord>>;
    async fn save_all(&self, records: &BTreeMap<SteamId, PlayerRecord>) -> anyhow::Result<()>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn load_all(&self) -> anyhow::Result<Vec<VehicleRecord>>;
    async fn append(&self, records: &[VehicleRecord]) -> anyhow::Result<()>;
}

#[async_trait]
pub trait FameRepository: Send + Sync {
    async fn load_all(&self) -> anyhow::Result<BTreeMap<SteamId, FameRecord>>;
    async fn save_all(&self, records: &BTreeMap<SteamId, FameRecord>) -> anyhow::Result<()>;
}

#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Sorted SteamIDs that were online after the last presence cycle.
    async fn load(&self) -> anyhow::Result<Vec<String>>;
    async fn save(&self, steam_ids: &[String]) -> anyhow::Result<()>;
}

#[async_trait]
pub trait CheckpointRepository: Send + Sync {
    async fn load(&self, domain: LogDomain) -> anyhow::Result<Option<Checkpoint>>;
    async fn save(&self, domain: LogDomain, checkpoint: &Checkpoint) -> anyhow::Result<()>;
}
