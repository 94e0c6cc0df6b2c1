use async_trait::async_trait;

use crate::entities::{DeliveryRecord, NotificationMessage};
use crate::value_objects::{LogDomain, LogFileMeta};

/// Access to the game server's log directory. `resolve_latest` returns `None`
/// when no file for the domain exists yet; `read_file` snapshots the file
/// before decoding so a concurrently appending writer is never read mid-line.
#[async_trait]
pub trait LogFileProvider: Send + Sync {
    async fn resolve_latest(&self, domain: LogDomain) -> anyhow::Result<Option<LogFileMeta>>;
    async fn read_file(&self, meta: &LogFileMeta) -> anyhow::Result<String>;
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    fn is_configured(&self) -> bool;
    async fn deliver(&self, message: &NotificationMessage) -> anyhow::Result<()>;
    async fn check_target(&self) -> anyhow::Result<()>;
    async fn list_deliveries(&self, limit: usize) -> Vec<DeliveryRecord>;
    async fn last_delivery(&self) -> Option<DeliveryRecord>;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_log_directory(&self) -> anyhow::Result<bool>;
    async fn check_state_directory(&self) -> anyhow::Result<bool>;
}
