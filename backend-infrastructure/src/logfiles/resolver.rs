use std::path::Path;

use anyhow::Result;
use tokio::fs;

use backend_domain::LogFileMeta;

/// Newest file in `dir` matching `prefix*suffix`, by modification time with
/// the greater file name breaking ties. `Ok(None)` when the directory is
/// missing or holds no match; the game server may simply not have written
/// that log yet.
pub async fn resolve_latest_file(
    dir: &Path,
    prefix: &str,
    suffix: &str,
) -> Result<Option<LogFileMeta>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let mut best: Option<LogFileMeta> = None;
    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name().to_string_lossy().to_string();
        if !file_name.starts_with(prefix) || !file_name.ends_with(suffix) {
            continue;
        }
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let modified_at_millis = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        let candidate = LogFileMeta {
            file_name,
            modified_at_millis,
        };
        let newer = match &best {
            None => true,
            Some(current) => {
                (candidate.modified_at_millis, &candidate.file_name)
                    > (current.modified_at_millis, &current.file_name)
            }
        };
        if newer {
            best = Some(candidate);
        }
    }
    Ok(best)
}
