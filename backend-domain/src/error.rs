// Domain error types
// Cycle-fatal failures carry enough context to log and retry later

use thiserror::Error;

/// None of the configured encodings produced clean text for a log file.
/// The cycle aborts without touching state and retries on the next trigger.
#[derive(Debug, Error)]
#[error("could not decode {file_name}: tried encodings {tried:?}")]
pub struct DecodeFailure {
    pub file_name: String,
    pub tried: Vec<String>,
}

/// The notification target is not configured; delivery cannot be attempted.
#[derive(Debug, Error)]
#[error("notification target is not configured")]
pub struct SinkUnconfigured;
