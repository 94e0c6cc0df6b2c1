// Ingest cycle value objects

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogDomain {
    Presence,
    Fame,
    Vehicles,
    AdminLog,
}

impl LogDomain {
    pub const ALL: [LogDomain; 4] = [
        LogDomain::Presence,
        LogDomain::Fame,
        LogDomain::Vehicles,
        LogDomain::AdminLog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogDomain::Presence => "presence",
            LogDomain::Fame => "fame",
            LogDomain::Vehicles => "vehicles",
            LogDomain::AdminLog => "admin_log",
        }
    }
}

/// Result envelope returned by every cycle trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleOutcome {
    pub domain: LogDomain,
    pub new_events: u64,
    pub notified: bool,
    pub skipped: bool,
}

impl CycleOutcome {
    /// Nothing to do: no source file, or no new content past the checkpoint.
    pub fn idle(domain: LogDomain) -> Self {
        Self {
            domain,
            new_events: 0,
            notified: false,
            skipped: false,
        }
    }

    /// Another cycle already holds this domain, or a digest short-circuit hit.
    pub fn skipped(domain: LogDomain) -> Self {
        Self {
            domain,
            new_events: 0,
            notified: false,
            skipped: true,
        }
    }
}
