use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use backend_domain::ports::HealthCheckService;

/// Readiness boils down to the two directories the engine lives off: the game
/// server's log directory and our own state directory.
pub struct DefaultHealthService {
    log_directory: PathBuf,
    state_directory: PathBuf,
}

impl DefaultHealthService {
    pub fn new(log_directory: impl Into<PathBuf>, state_directory: impl Into<PathBuf>) -> Self {
        Self {
            log_directory: log_directory.into(),
            state_directory: state_directory.into(),
        }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_log_directory(&self) -> anyhow::Result<bool> {
        Ok(fs::metadata(&self.log_directory)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false))
    }

    async fn check_state_directory(&self) -> anyhow::Result<bool> {
        // the state directory is created lazily on first write
        match fs::metadata(&self.state_directory).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(self.state_directory.parent().is_some())
            }
            Err(err) => Err(err.into()),
        }
    }
}
