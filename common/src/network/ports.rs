//! # Port Selection
//!
//! Parses the port argument of the scan and check commands. Supported forms:
//! * **Single**: `"22"`
//! * **Range**: `"1-1024"`
//! * **List**: `"80,443,8080"`

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::ProbeError;
use crate::network::range::PortRange;

/// Ports tried when checking whether a host is up at all.
pub const COMMON_PORTS: [u16; 10] = [80, 443, 22, 21, 25, 53, 110, 143, 993, 995];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSpec {
    Single(u16),
    Range(PortRange),
    List(Vec<u16>),
}

impl PortSpec {
    /// Expands the selection into unique ports in ascending order.
    pub fn to_ports(&self) -> Vec<u16> {
        match self {
            PortSpec::Single(port) => vec![*port],
            PortSpec::Range(range) => range.to_iter().collect(),
            PortSpec::List(ports) => ports
                .iter()
                .copied()
                .collect::<BTreeSet<u16>>()
                .into_iter()
                .collect(),
        }
    }
}

impl FromStr for PortSpec {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ProbeError::InvalidPortSpec(s.to_string()));
        }

        if s.contains(',') {
            return parse_commas(s);
        }

        if let Some((start, end)) = s.split_once('-') {
            let range = PortRange::new(parse_number(start, s)?, parse_number(end, s)?)?;
            return Ok(PortSpec::Range(range));
        }

        parse_port(s, s).map(PortSpec::Single)
    }
}

fn parse_commas(s: &str) -> Result<PortSpec, ProbeError> {
    let mut ports = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        ports.push(parse_port(part, s)?);
    }

    if ports.is_empty() {
        return Err(ProbeError::InvalidPortSpec(s.to_string()));
    }
    Ok(PortSpec::List(ports))
}

fn parse_port(part: &str, original: &str) -> Result<u16, ProbeError> {
    let port = parse_number(part, original)?;
    PortRange::new(port, port).map(|range| range.start)
}

fn parse_number(part: &str, original: &str) -> Result<u32, ProbeError> {
    part.trim()
        .parse::<u32>()
        .map_err(|_| ProbeError::InvalidPortSpec(original.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_forms() {
        assert_eq!(PortSpec::from_str("22"), Ok(PortSpec::Single(22)));
        assert_eq!(
            PortSpec::from_str("1-1024"),
            Ok(PortSpec::Range(PortRange { start: 1, end: 1024 }))
        );
        assert_eq!(
            PortSpec::from_str("80, 443,8080"),
            Ok(PortSpec::List(vec![80, 443, 8080]))
        );
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(PortSpec::from_str("").is_err());
        assert!(PortSpec::from_str("http").is_err());
        assert!(PortSpec::from_str("0").is_err());
        assert!(PortSpec::from_str("65536").is_err());
        assert!(PortSpec::from_str("100-1").is_err());
        assert!(PortSpec::from_str("1-2-3").is_err());
        assert!(PortSpec::from_str("80,abc").is_err());
        assert!(PortSpec::from_str(",,").is_err());
    }

    #[test]
    fn test_to_ports_collapses_duplicates() {
        let spec = PortSpec::from_str("443,80,443,22").unwrap();
        assert_eq!(spec.to_ports(), vec![22, 80, 443]);

        let range = PortSpec::from_str("79-81").unwrap();
        assert_eq!(range.to_ports(), vec![79, 80, 81]);
    }

    #[test]
    fn test_range_error_keeps_bounds() {
        assert_eq!(
            PortSpec::from_str("10-70000"),
            Err(ProbeError::InvalidRange { start: 10, end: 70000 })
        );
    }
}
