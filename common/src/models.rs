//! # Probe Data Model
//!
//! Every value here is created once by the engine and never mutated
//! afterwards; aggregation structures own them exclusively.

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::Serialize;

/// Status codes in this range count as a live HTTP endpoint.
pub const LIVE_STATUS_RANGE: std::ops::Range<u16> = 200..400;

pub fn is_live_status(status: u16) -> bool {
    LIVE_STATUS_RANGE.contains(&status)
}

/// A target after normalization and name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub original_input: String,
    pub host: String,
    /// `None` when the lookup failed.
    pub resolved_address: Option<IpAddr>,
}

impl ResolvedTarget {
    pub fn new(original_input: impl Into<String>, host: impl Into<String>, addr: IpAddr) -> Self {
        Self {
            original_input: original_input.into(),
            host: host.into(),
            resolved_address: Some(addr),
        }
    }

    pub fn unresolved(original_input: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            original_input: original_input.into(),
            host: host.into(),
            resolved_address: None,
        }
    }

    pub fn address_string(&self) -> Option<String> {
        self.resolved_address.map(|addr| addr.to_string())
    }
}

/// Outcome of one (target, port) probe.
///
/// `live` is only ever true after a successful TCP connect or an HTTP
/// response with a status in [`LIVE_STATUS_RANGE`]; the constructors keep it
/// that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub target: String,
    pub port: u16,
    pub live: bool,
    pub address: Option<String>,
    pub http_status: Option<u16>,
}

impl ProbeResult {
    /// Marker result for a target whose name could not be resolved.
    pub fn unresolved(target: impl Into<String>, port: u16) -> Self {
        Self {
            target: target.into(),
            port,
            live: false,
            address: None,
            http_status: None,
        }
    }

    pub fn from_connect(target: impl Into<String>, port: u16, address: String, live: bool) -> Self {
        Self {
            target: target.into(),
            port,
            live,
            address: Some(address),
            http_status: None,
        }
    }

    pub fn from_http_status(
        target: impl Into<String>,
        port: u16,
        address: String,
        status: u16,
    ) -> Self {
        Self {
            target: target.into(),
            port,
            live: is_live_status(status),
            address: Some(address),
            http_status: Some(status),
        }
    }
}

/// Open ports of a single target, strictly ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortScanResult {
    pub target: String,
    pub open_ports: Vec<u16>,
}

impl PortScanResult {
    pub fn new(target: impl Into<String>, mut open_ports: Vec<u16>) -> Self {
        open_ports.sort_unstable();
        open_ports.dedup();
        Self {
            target: target.into(),
            open_ports,
        }
    }
}

/// Whether a host answers on any of a set of common ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostCheck {
    pub target: String,
    pub address: Option<String>,
    pub alive: bool,
    pub open_ports: Vec<u16>,
}

/// Results of a batch, keyed by the input string each one was produced for.
///
/// Inserting a key twice keeps the later result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchResult {
    entries: BTreeMap<String, ProbeResult>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, input: impl Into<String>, result: ProbeResult) -> Option<ProbeResult> {
        self.entries.insert(input.into(), result)
    }

    pub fn get(&self, input: &str) -> Option<&ProbeResult> {
        self.entries.get(input)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.entries.values().filter(|r| r.live).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProbeResult)> {
        self.entries.iter()
    }
}

impl IntoIterator for BatchResult {
    type Item = (String, ProbeResult);
    type IntoIter = std::collections::btree_map::IntoIter<String, ProbeResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
