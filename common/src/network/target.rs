//! # Probe Target Model
//!
//! Defines the possible inputs for a probe.
//!
//! A raw target string can be:
//! * An IPv4 or IPv6 literal (e.g., `192.168.1.5`, `::1`, `[::1]`).
//! * A bare domain name (e.g., `example.com`).
//! * An `http://` or `https://` URL, of which only the hostname is kept.

use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use url::Url;

use crate::error::ProbeError;

pub const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// A normalized probe target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// An address literal, either given directly or as the host of a URL.
    Ip { addr: IpAddr },
    /// A bare domain name.
    Domain { name: String },
    /// The domain extracted from a URL.
    Url { host: String },
}

impl Target {
    /// The hostname a probe should talk to.
    pub fn host(&self) -> String {
        match self {
            Target::Ip { addr } => addr.to_string(),
            Target::Domain { name } => name.clone(),
            Target::Url { host } => host.clone(),
        }
    }

    /// Returns the address when no name lookup is needed.
    pub fn ip_literal(&self) -> Option<IpAddr> {
        match self {
            Target::Ip { addr } => Some(*addr),
            _ => None,
        }
    }
}

impl FromStr for Target {
    type Err = ProbeError;

    /// Parses a string into a `Target`.
    ///
    /// URLs are recognised by their scheme only; anything else is tried as an
    /// address literal and finally taken as a domain name. Whether the name
    /// exists is left to the resolver.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if is_url(s) {
            return parse_url(s);
        }

        if let Some(addr) = parse_ip(s) {
            return Ok(Target::Ip { addr });
        }

        if s.is_empty() || s.contains(char::is_whitespace) {
            return Err(ProbeError::resolution(s, "not a valid host name"));
        }

        Ok(Target::Domain {
            name: s.to_ascii_lowercase(),
        })
    }
}

pub fn is_url(s: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| s.starts_with(scheme))
}

/// Formats a host for use inside a URL authority, bracketing IPv6 literals.
pub fn url_authority(host: &str, port: u16) -> String {
    match host.parse::<Ipv6Addr>() {
        Ok(v6) => format!("[{v6}]:{port}"),
        Err(_) => format!("{host}:{port}"),
    }
}

/// Extracts the hostname of a URL, dropping scheme, credentials, port, path and query.
fn parse_url(s: &str) -> Result<Target, ProbeError> {
    let url = Url::parse(s).map_err(|e| ProbeError::resolution(s, format!("invalid url: {e}")))?;

    match url.host() {
        Some(url::Host::Domain(name)) if !name.is_empty() => Ok(Target::Url {
            host: name.to_string(),
        }),
        Some(url::Host::Ipv4(v4)) => Ok(Target::Ip { addr: IpAddr::V4(v4) }),
        Some(url::Host::Ipv6(v6)) => Ok(Target::Ip { addr: IpAddr::V6(v6) }),
        _ => Err(ProbeError::resolution(s, "url has no host")),
    }
}

/// Parses an address literal, accepting bracketed IPv6 (`[::1]`).
fn parse_ip(s: &str) -> Option<IpAddr> {
    let unbracketed = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);
    unbracketed.parse::<IpAddr>().ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
