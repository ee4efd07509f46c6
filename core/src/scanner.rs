//! # Port Scanner
//!
//! Drives a [`Connector`] across the ports of one address through the
//! bounded worker pool. Every port is probed exactly once; the open ones are
//! returned in ascending order no matter which worker finished first.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use netprobe_common::ProbeError;
use netprobe_common::models::{HostCheck, ResolvedTarget};
use netprobe_common::network::range::PortRange;
use tracing::debug;

use crate::network::tcp::Connector;
use crate::pool::{self, ProgressFn};

pub struct PortScanner {
    connector: Arc<dyn Connector>,
    progress: Option<ProgressFn>,
}

impl PortScanner {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Scans `start..=end` on `address`.
    ///
    /// Fails with [`ProbeError::InvalidRange`] before any probing unless
    /// `1 <= start <= end <= 65535`.
    pub async fn scan_ports(
        &self,
        address: &str,
        start: u16,
        end: u16,
        timeout: Duration,
        concurrency: usize,
    ) -> Result<Vec<u16>, ProbeError> {
        let range = PortRange::new(start.into(), end.into())?;
        Ok(self
            .scan(address, range.to_iter().collect(), timeout, concurrency)
            .await)
    }

    /// Scans an arbitrary selection of ports. Duplicates are probed once.
    ///
    /// Port 0 is rejected with [`ProbeError::InvalidPortSpec`] before any probing.
    pub async fn scan_port_list(
        &self,
        address: &str,
        ports: &[u16],
        timeout: Duration,
        concurrency: usize,
    ) -> Result<Vec<u16>, ProbeError> {
        if ports.contains(&0) {
            return Err(ProbeError::InvalidPortSpec("0".to_string()));
        }

        let unique: Vec<u16> = ports.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        Ok(self.scan(address, unique, timeout, concurrency).await)
    }

    /// Checks whether a host answers on any of `ports`.
    pub async fn check_host(
        &self,
        target: &ResolvedTarget,
        ports: &[u16],
        timeout: Duration,
        concurrency: usize,
    ) -> Result<HostCheck, ProbeError> {
        let Some(address) = target.address_string() else {
            return Ok(HostCheck {
                target: target.host.clone(),
                address: None,
                alive: false,
                open_ports: Vec::new(),
            });
        };

        let open_ports = self
            .scan_port_list(&address, ports, timeout, concurrency)
            .await?;

        Ok(HostCheck {
            target: target.host.clone(),
            address: Some(address),
            alive: !open_ports.is_empty(),
            open_ports,
        })
    }

    async fn scan(&self, address: &str, ports: Vec<u16>, timeout: Duration, concurrency: usize) -> Vec<u16> {
        debug!(address, ports = ports.len(), concurrency, "scanning ports");

        let connector = self.connector.clone();
        let address: Arc<str> = Arc::from(address);
        let outcomes = pool::run_bounded(ports, concurrency, self.progress.clone(), move |port| {
            let connector = connector.clone();
            let address = address.clone();
            async move {
                let open = connector.connect(&address, port, timeout).await;
                (port, open)
            }
        })
        .await;

        let mut open_ports: Vec<u16> = outcomes
            .into_iter()
            .flatten()
            .filter_map(|(port, open)| open.then_some(port))
            .collect();

        open_ports.sort_unstable();
        open_ports.dedup();
        open_ports
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
