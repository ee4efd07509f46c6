//! Test doubles for the collaborator traits.

use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use netprobe_common::ProbeError;

use crate::network::http::{HttpTransport, TransportError};
use crate::network::tcp::Connector;
use crate::resolver::DnsLookup;

/// Reports a fixed set of ports as open, on any address, and records every call.
#[derive(Default)]
pub struct StubConnector {
    open: HashSet<u16>,
    unreachable: HashSet<String>,
    delay: Duration,
    calls: Mutex<HashMap<u16, usize>>,
    addresses: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl StubConnector {
    pub fn with_open(ports: &[u16]) -> Self {
        Self {
            open: ports.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn unreachable(mut self, address: &str) -> Self {
        self.unreachable.insert(address.to_string());
        self
    }

    pub fn calls_for(&self, port: u16) -> usize {
        self.calls.lock().unwrap().get(&port).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn addresses(&self) -> Vec<String> {
        self.addresses.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for StubConnector {
    async fn connect(&self, address: &str, port: u16, _timeout: Duration) -> bool {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        *self.calls.lock().unwrap().entry(port).or_default() += 1;
        self.addresses.lock().unwrap().push(address.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.open.contains(&port) && !self.unreachable.contains(address)
    }
}

/// Answers every GET with the same canned outcome.
pub struct StubTransport {
    outcome: Result<u16, TransportError>,
    urls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn status(status: u16) -> Self {
        Self {
            outcome: Ok(status),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: TransportError) -> Self {
        Self {
            outcome: Err(err),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<u16, TransportError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.outcome.clone()
    }
}

/// Resolves names from a fixed table; anything else fails like NXDOMAIN.
#[derive(Default)]
pub struct StubDns {
    table: HashMap<String, Vec<IpAddr>>,
    lookups: AtomicUsize,
}

impl StubDns {
    pub fn with(mut self, host: &str, addrs: &[IpAddr]) -> Self {
        self.table.insert(host.to_string(), addrs.to_vec());
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsLookup for StubDns {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ProbeError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.table
            .get(host)
            .cloned()
            .ok_or_else(|| ProbeError::resolution(host, "name does not exist"))
    }
}
