use std::sync::Arc;

use anyhow::Result;

use backend_application::{AppState, CycleLocks, Metrics};
use backend_infrastructure::{
    AppConfig,
    DefaultHealthService,
    LogFileDirectory,
    LogPrefixes,
    StateFileRepository,
    WebhookNotifySink,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let state_repo = Arc::new(StateFileRepository::new(&config.state_directory));

        let log_provider = Arc::new(LogFileDirectory::new(
            &config.log_directory,
            &config.scratch_directory,
            LogPrefixes {
                presence: config.presence_log_prefix.clone(),
                fame: config.fame_log_prefix.clone(),
                vehicles: config.vehicle_log_prefix.clone(),
                admin_log: config.admin_log_prefix.clone(),
            },
            config.log_encodings.clone(),
        ));

        let notify_sink = Arc::new(WebhookNotifySink::new(
            config.webhook_url.clone(),
            config.notify_timeout_seconds,
            config.notify_retry_attempts,
            config.notify_retry_backoff_ms,
        )?);

        let health_service = Arc::new(DefaultHealthService::new(
            &config.log_directory,
            &config.state_directory,
        ));

        let state = AppState {
            config: runtime_config,
            log_provider,
            player_repo: state_repo.clone(),
            vehicle_repo: state_repo.clone(),
            fame_repo: state_repo.clone(),
            roster_repo: state_repo.clone(),
            checkpoint_repo: state_repo,
            notify_sink,
            health_service,
            metrics: Arc::new(Metrics::default()),
            cycle_locks: Arc::new(CycleLocks::default()),
        };

        Ok(Self { state })
    }
}
