use chrono::NaiveDateTime;
use time::OffsetDateTime;

/// Timestamp layout the game server writes at the head of every log line.
/// Lexicographic order on the raw string matches chronological order.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S";

pub fn current_millis() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as i64 / 1_000_000
}

pub fn parse_log_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, LOG_TIMESTAMP_FORMAT).ok()
}

pub fn naive_to_millis(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_millis()
}
