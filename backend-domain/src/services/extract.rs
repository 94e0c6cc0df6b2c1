// Log line extraction
// One fixed grammar table per log domain, first match wins.
// A non-blank line matching no pattern is counted, never fatal.

use regex::Regex;
use std::sync::LazyLock;

use crate::entities::{
    AdminCommandEvent,
    FameEvent,
    PresenceAction,
    PresenceEvent,
    VehicleEvent,
    VehicleKind,
    VehicleOwner,
};
use crate::utils::parse_log_timestamp;
use crate::value_objects::{Position, SteamId, VehicleId};

const TS: &str = r"\d{4}\.\d{2}\.\d{2}-\d{2}\.\d{2}\.\d{2}";

static PRESENCE_WITH_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<ts>{TS}): '(?P<ip>[0-9.]+) (?P<sid>\d{{17}}):(?P<name>.+?)\((?P<pid>\d+)\)' logged (?P<action>in|out) at: X=(?P<x>-?[0-9.]+) Y=(?P<y>-?[0-9.]+) Z=(?P<z>-?[0-9.]+)(?P<detail>.*)$"
    ))
    .unwrap()
});

static PRESENCE_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<ts>{TS}): '(?P<ip>[0-9.]+) (?P<sid>\d{{17}}):(?P<name>.+?)\((?P<pid>\d+)\)' logged (?P<action>in|out)(?P<detail>.*)$"
    ))
    .unwrap()
});

static FAME_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<ts>{TS}): (?P<name>.+?)\((?P<sid>\d{{17}})\) famepoints: (?P<total>-?[0-9.]+)\s*$"
    ))
    .unwrap()
});

static VEHICLE_OWNED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<ts>{TS}): \[LogVehicleDestroyed\] (?P<kind>[A-Za-z]+)\. Vehicle: (?P<vtype>.+?)\. VehicleId: (?P<vid>\d+)\. Owner: (?P<osid>\d{{17}}) \((?P<oid>-?\d+), (?P<oname>.+?)\)\. Location: X=(?P<x>-?[0-9.]+), Y=(?P<y>-?[0-9.]+), Z=(?P<z>-?[0-9.]+)\s*$"
    ))
    .unwrap()
});

static VEHICLE_UNOWNED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<ts>{TS}): \[LogVehicleDestroyed\] (?P<kind>[A-Za-z]+)\. Vehicle: (?P<vtype>.+?)\. VehicleId: (?P<vid>\d+)\. Owner: N/A\. Location: X=(?P<x>-?[0-9.]+), Y=(?P<y>-?[0-9.]+), Z=(?P<z>-?[0-9.]+)\s*$"
    ))
    .unwrap()
});

static ADMIN_WITH_ACTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<ts>{TS}): '(?P<sid>\d{{17}}):(?P<name>.+?)\((?P<pid>\d+)\)' Command: '(?P<cmd>.*)'\s*$"
    ))
    .unwrap()
});

static ADMIN_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?P<ts>{TS}): Command: '(?P<cmd>.*)'\s*$")).unwrap()
});

/// Extraction result for one file: events in file order plus the count of
/// non-blank lines no grammar recognized.
#[derive(Debug)]
pub struct Extraction<T> {
    pub events: Vec<T>,
    pub unrecognized: u64,
}

pub fn extract_presence(content: &str) -> Extraction<PresenceEvent> {
    extract_with(content, parse_presence_line)
}

pub fn extract_fame(content: &str) -> Extraction<FameEvent> {
    extract_with(content, parse_fame_line)
}

pub fn extract_vehicles(content: &str) -> Extraction<VehicleEvent> {
    extract_with(content, parse_vehicle_line)
}

fn extract_with<T>(content: &str, parse: impl Fn(&str) -> Option<T>) -> Extraction<T> {
    let mut events = Vec::new();
    let mut unrecognized = 0;
    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        match parse(line) {
            Some(event) => events.push(event),
            None => unrecognized += 1,
        }
    }
    Extraction { events, unrecognized }
}

pub fn parse_presence_line(line: &str) -> Option<PresenceEvent> {
    if let Some(caps) = PRESENCE_WITH_POSITION.captures(line) {
        let position = Position {
            x: caps["x"].parse().ok()?,
            y: caps["y"].parse().ok()?,
            z: caps["z"].parse().ok()?,
        };
        return build_presence(&caps, Some(position));
    }
    let caps = PRESENCE_BARE.captures(line)?;
    build_presence(&caps, None)
}

fn build_presence(caps: &regex::Captures<'_>, position: Option<Position>) -> Option<PresenceEvent> {
    let raw_timestamp = caps["ts"].to_string();
    let timestamp = parse_log_timestamp(&raw_timestamp)?;
    let action = match &caps["action"] {
        "in" => PresenceAction::Login,
        _ => PresenceAction::Logout,
    };
    let detail = caps.name("detail").map(|m| m.as_str().trim()).filter(|d| !d.is_empty());
    Some(PresenceEvent {
        timestamp,
        raw_timestamp,
        action,
        steam_id: SteamId(caps["sid"].to_string()),
        player_name: caps["name"].to_string(),
        ip: caps["ip"].to_string(),
        position,
        detail: detail.map(str::to_string),
    })
}

pub fn parse_fame_line(line: &str) -> Option<FameEvent> {
    let caps = FAME_LINE.captures(line)?;
    let total_fame: f64 = caps["total"].parse().ok()?;
    Some(FameEvent {
        raw_timestamp: caps["ts"].to_string(),
        steam_id: SteamId(caps["sid"].to_string()),
        player_name: caps["name"].to_string(),
        total_fame,
    })
}

pub fn parse_vehicle_line(line: &str) -> Option<VehicleEvent> {
    if let Some(caps) = VEHICLE_OWNED.captures(line) {
        let owner = VehicleOwner {
            steam_id: caps["osid"].to_string(),
            in_game_id: caps["oid"].parse().ok()?,
            player_name: caps["oname"].to_string(),
        };
        return build_vehicle(&caps, owner);
    }
    let caps = VEHICLE_UNOWNED.captures(line)?;
    build_vehicle(&caps, VehicleOwner::unowned())
}

fn build_vehicle(caps: &regex::Captures<'_>, owner: VehicleOwner) -> Option<VehicleEvent> {
    Some(VehicleEvent {
        raw_timestamp: caps["ts"].to_string(),
        kind: VehicleKind::from(&caps["kind"]),
        vehicle_type: caps["vtype"].to_string(),
        vehicle_id: VehicleId(caps["vid"].parse().ok()?),
        owner,
        location: Position {
            x: caps["x"].parse().ok()?,
            y: caps["y"].parse().ok()?,
            z: caps["z"].parse().ok()?,
        },
    })
}

pub fn parse_admin_line(line: &str) -> Option<AdminCommandEvent> {
    if let Some(caps) = ADMIN_WITH_ACTOR.captures(line) {
        let (command, argument) = split_command(&caps["cmd"]);
        return Some(AdminCommandEvent {
            raw_timestamp: caps["ts"].to_string(),
            steam_id: Some(SteamId(caps["sid"].to_string())),
            actor_name: Some(caps["name"].to_string()),
            command,
            argument,
        });
    }
    let caps = ADMIN_BARE.captures(line)?;
    let (command, argument) = split_command(&caps["cmd"]);
    Some(AdminCommandEvent {
        raw_timestamp: caps["ts"].to_string(),
        steam_id: None,
        actor_name: None,
        command,
        argument,
    })
}

fn split_command(raw: &str) -> (String, String) {
    match raw.split_once(' ') {
        Some((command, argument)) => (command.to_string(), argument.trim().to_string()),
        None => (raw.to_string(), String::new()),
    }
}
