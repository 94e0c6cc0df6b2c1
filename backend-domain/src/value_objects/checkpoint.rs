// Checkpoint value object
// Per-domain ingest progress; advances only after derived state is durably written

use serde::{Deserialize, Serialize};

/// Offset value meaning "no line of this file has been read yet".
pub const BEFORE_FIRST_LINE: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Checkpoint {
    /// Line-offset progress within a named file (admin command log).
    Offset { file_name: String, last_line_index: i64 },
    /// Greatest raw timestamp already folded (vehicle log).
    Timestamp { last_timestamp: String },
    /// Digest of the last fully processed file (fame log).
    Hash {
        file_name: String,
        file_modified_at_millis: i64,
        content_hash: String,
    },
}

impl Checkpoint {
    /// Line index to resume after in `file_name`. A different file name means
    /// the log rotated and reading restarts from the top.
    pub fn resume_index(&self, file_name: &str) -> i64 {
        match self {
            Checkpoint::Offset {
                file_name: seen,
                last_line_index,
            } if seen == file_name => *last_line_index,
            _ => BEFORE_FIRST_LINE,
        }
    }

    pub fn matches_digest(&self, file_name: &str, modified_at_millis: i64, digest: &str) -> bool {
        match self {
            Checkpoint::Hash {
                file_name: seen,
                file_modified_at_millis,
                content_hash,
            } => seen == file_name && *file_modified_at_millis == modified_at_millis && content_hash == digest,
            _ => false,
        }
    }

    pub fn last_timestamp(&self) -> Option<&str> {
        match self {
            Checkpoint::Timestamp { last_timestamp } => Some(last_timestamp),
            _ => None,
        }
    }
}
