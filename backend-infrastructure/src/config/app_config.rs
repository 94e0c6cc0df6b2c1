use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub log_directory: String,
    pub scratch_directory: String,
    pub state_directory: String,
    pub webhook_url: Option<String>,
    pub notify_timeout_seconds: u64,
    pub notify_retry_attempts: u32,
    pub notify_retry_backoff_ms: u64,
    pub cycle_interval_seconds: u64,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
    pub presence_log_prefix: String,
    pub fame_log_prefix: String,
    pub vehicle_log_prefix: String,
    pub admin_log_prefix: String,
    pub log_encodings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3432".to_string(),
            api_token: None,
            log_directory: "./Logs".to_string(),
            scratch_directory: "./scratch".to_string(),
            state_directory: "./state".to_string(),
            webhook_url: None,
            notify_timeout_seconds: 10,
            notify_retry_attempts: 3,
            notify_retry_backoff_ms: 500,
            cycle_interval_seconds: 60,
            request_timeout_seconds: 15,
            max_body_bytes: 1024 * 1024,
            presence_log_prefix: "login_".to_string(),
            fame_log_prefix: "famepoints_".to_string(),
            vehicle_log_prefix: "vehicle_destruction_".to_string(),
            admin_log_prefix: "admin_".to_string(),
            log_encodings: vec!["utf-16le".to_string(), "windows-1252".to_string()],
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("PALISADE_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(webhook_url) = &self.webhook_url {
            if webhook_url.trim().is_empty() {
                self.webhook_url = None;
            }
        }
        self.log_encodings = normalize_encoding_list(std::mem::take(&mut self.log_encodings));
        if self.log_encodings.is_empty() {
            self.log_encodings = AppConfig::default().log_encodings;
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.log_directory = resolve_path(base, &self.log_directory);
        self.scratch_directory = resolve_path(base, &self.scratch_directory);
        self.state_directory = resolve_path(base, &self.state_directory);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.log_directory.trim().is_empty() {
            return Err(anyhow!("log_directory must not be empty"));
        }
        if self.scratch_directory.trim().is_empty() {
            return Err(anyhow!("scratch_directory must not be empty"));
        }
        if self.state_directory.trim().is_empty() {
            return Err(anyhow!("state_directory must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.notify_timeout_seconds == 0 {
            return Err(anyhow!("notify_timeout_seconds must be greater than 0"));
        }
        if self.notify_retry_attempts == 0 {
            return Err(anyhow!("notify_retry_attempts must be greater than 0"));
        }
        for prefix in [
            &self.presence_log_prefix,
            &self.fame_log_prefix,
            &self.vehicle_log_prefix,
            &self.admin_log_prefix,
        ] {
            if prefix.trim().is_empty() {
                return Err(anyhow!("log file prefixes must not be empty"));
            }
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
            max_body_bytes: self.max_body_bytes,
            cycle_interval_seconds: self.cycle_interval_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("PALISADE_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("PALISADE_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("PALISADE_LOG_DIRECTORY") {
            self.log_directory = value;
        }
        if let Ok(value) = env::var("PALISADE_SCRATCH_DIRECTORY") {
            self.scratch_directory = value;
        }
        if let Ok(value) = env::var("PALISADE_STATE_DIRECTORY") {
            self.state_directory = value;
        }
        if let Ok(value) = env::var("PALISADE_WEBHOOK_URL") {
            self.webhook_url = Some(value);
        }
        if let Ok(value) = env::var("PALISADE_NOTIFY_TIMEOUT_SECONDS") {
            self.notify_timeout_seconds = value.parse().unwrap_or(self.notify_timeout_seconds);
        }
        if let Ok(value) = env::var("PALISADE_NOTIFY_RETRY_ATTEMPTS") {
            self.notify_retry_attempts = value.parse().unwrap_or(self.notify_retry_attempts);
        }
        if let Ok(value) = env::var("PALISADE_NOTIFY_RETRY_BACKOFF_MS") {
            self.notify_retry_backoff_ms = value.parse().unwrap_or(self.notify_retry_backoff_ms);
        }
        if let Ok(value) = env::var("PALISADE_CYCLE_INTERVAL_SECONDS") {
            self.cycle_interval_seconds = value.parse().unwrap_or(self.cycle_interval_seconds);
        }
        if let Ok(value) = env::var("PALISADE_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("PALISADE_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("PALISADE_PRESENCE_LOG_PREFIX") {
            self.presence_log_prefix = value;
        }
        if let Ok(value) = env::var("PALISADE_FAME_LOG_PREFIX") {
            self.fame_log_prefix = value;
        }
        if let Ok(value) = env::var("PALISADE_VEHICLE_LOG_PREFIX") {
            self.vehicle_log_prefix = value;
        }
        if let Ok(value) = env::var("PALISADE_ADMIN_LOG_PREFIX") {
            self.admin_log_prefix = value;
        }
        if let Ok(value) = env::var("PALISADE_LOG_ENCODINGS") {
            self.log_encodings = parse_env_encoding_list(&value);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        let relative = trimmed.strip_prefix("./").unwrap_or(trimmed);
        base.join(relative).to_string_lossy().to_string()
    }
}

fn parse_env_encoding_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn normalize_encoding_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .map(|item| item.trim().to_ascii_lowercase())
        .filter(|item| !item.is_empty())
        .collect();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let config = AppConfig::default();
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn parses_partial_toml_over_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
bind_addr = "0.0.0.0:8080"
log_directory = "/srv/scum/Logs"
webhook_url = "https://discord.example/webhook"
cycle_interval_seconds = 30
"#,
        )
        .expect("toml parses");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.log_directory, "/srv/scum/Logs");
        assert_eq!(config.cycle_interval_seconds, 30);
        assert_eq!(config.presence_log_prefix, "login_", "default survives");
    }

    #[test]
    fn normalize_drops_blank_optionals_and_cleans_encodings() {
        let mut config = AppConfig {
            api_token: Some("   ".to_string()),
            webhook_url: Some(String::new()),
            log_encodings: vec![" UTF-16LE ".to_string(), String::new(), "utf-16le".to_string()],
            ..AppConfig::default()
        };
        config.normalize();
        assert!(config.api_token.is_none());
        assert!(config.webhook_url.is_none());
        assert_eq!(config.log_encodings, vec!["utf-16le".to_string()]);
    }

    #[test]
    fn empty_encoding_list_falls_back_to_defaults() {
        let mut config = AppConfig {
            log_encodings: Vec::new(),
            ..AppConfig::default()
        };
        config.normalize();
        assert_eq!(
            config.log_encodings,
            vec!["utf-16le".to_string(), "windows-1252".to_string()]
        );
    }

    #[test]
    fn rejects_bad_bind_addr_and_empty_directories() {
        let mut config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config.bind_addr = "127.0.0.1:3432".to_string();
        config.state_directory = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn relative_paths_resolve_against_the_config_directory() {
        let mut config = AppConfig::default();
        config.resolve_paths(Some(Path::new("/etc/palisade")));
        assert_eq!(config.log_directory, "/etc/palisade/Logs");
        assert_eq!(config.state_directory, "/etc/palisade/state");
    }

    #[test]
    fn env_encoding_list_splits_on_commas() {
        assert_eq!(
            parse_env_encoding_list("utf-16le, windows-1252 ,"),
            vec!["utf-16le".to_string(), "windows-1252".to_string()]
        );
    }
}
