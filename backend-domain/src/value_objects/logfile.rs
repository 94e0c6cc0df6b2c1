// Resolved log file metadata

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFileMeta {
    pub file_name: String,
    pub modified_at_millis: i64,
}
