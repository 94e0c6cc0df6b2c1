use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use backend_domain::ports::LogFileProvider;
use backend_domain::{LogDomain, LogFileMeta};

use super::reader::decode_log_bytes;
use super::resolver::resolve_latest_file;
use super::snapshot::snapshot_file;

const LOG_SUFFIX: &str = ".log";

#[derive(Debug, Clone)]
pub struct LogPrefixes {
    pub presence: String,
    pub fame: String,
    pub vehicles: String,
    pub admin_log: String,
}

impl LogPrefixes {
    fn for_domain(&self, domain: LogDomain) -> &str {
        match domain {
            LogDomain::Presence => &self.presence,
            LogDomain::Fame => &self.fame,
            LogDomain::Vehicles => &self.vehicles,
            LogDomain::AdminLog => &self.admin_log,
        }
    }
}

/// `LogFileProvider` over the game server's log directory. Reads go through a
/// scratch snapshot so the live file, still being appended to, is never read
/// directly.
pub struct LogFileDirectory {
    log_directory: PathBuf,
    scratch_directory: PathBuf,
    prefixes: LogPrefixes,
    encodings: Vec<String>,
}

impl LogFileDirectory {
    pub fn new(
        log_directory: impl Into<PathBuf>,
        scratch_directory: impl Into<PathBuf>,
        prefixes: LogPrefixes,
        encodings: Vec<String>,
    ) -> Self {
        Self {
            log_directory: log_directory.into(),
            scratch_directory: scratch_directory.into(),
            prefixes,
            encodings,
        }
    }
}

#[async_trait]
impl LogFileProvider for LogFileDirectory {
    async fn resolve_latest(&self, domain: LogDomain) -> anyhow::Result<Option<LogFileMeta>> {
        let prefix = self.prefixes.for_domain(domain);
        resolve_latest_file(&self.log_directory, prefix, LOG_SUFFIX).await
    }

    async fn read_file(&self, meta: &LogFileMeta) -> anyhow::Result<String> {
        let source = self.log_directory.join(&meta.file_name);
        let guard = snapshot_file(&source, &self.scratch_directory).await?;
        let bytes = fs::read(guard.path()).await?;
        decode_log_bytes(&meta.file_name, &bytes, &self.encodings)
    }
}
