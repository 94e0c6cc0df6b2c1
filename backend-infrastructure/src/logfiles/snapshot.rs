use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use uuid::Uuid;

/// Scratch copy of a log file that an external writer may still be appending
/// to. The copy is removed when the guard drops, on every exit path.
pub struct SnapshotGuard {
    path: PathBuf,
}

impl SnapshotGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SnapshotGuard {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to remove snapshot {}: {}", self.path.display(), err);
            }
        }
    }
}

pub async fn snapshot_file(source: &Path, scratch_dir: &Path) -> Result<SnapshotGuard> {
    fs::create_dir_all(scratch_dir)
        .await
        .with_context(|| format!("creating scratch directory {}", scratch_dir.display()))?;
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "snapshot.log".to_string());
    let scratch_path = scratch_dir.join(format!("{}_{}", Uuid::new_v4(), file_name));
    fs::copy(source, &scratch_path)
        .await
        .with_context(|| format!("snapshotting {}", source.display()))?;
    Ok(SnapshotGuard { path: scratch_path })
}
