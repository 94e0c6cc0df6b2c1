use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub fn millis_to_utc(ms: i64) -> OffsetDateTime {
    let nanos = i128::from(ms).saturating_mul(1_000_000);
    OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn current_millis() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as i64 / 1_000_000
}

/// Webhook embeds want an ISO-8601 timestamp.
pub fn millis_to_rfc3339(ms: i64) -> String {
    millis_to_utc(ms)
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::new())
}
