//! # Liveness Probes
//!
//! The two ways a single (target, port) pair is checked:
//!
//! * [`TcpOnlyProbe`]: a bare TCP handshake, used for address targets.
//! * [`HttpFallbackProbe`]: an HTTP GET, degrading to a TCP handshake when
//!   no HTTP response arrives. A port that accepts connections but does not
//!   speak HTTP still counts as live.
//!
//! Both implement [`LivenessProbe`], which is what the batch orchestrator
//! schedules.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use netprobe_common::models::{ProbeResult, ResolvedTarget};
use netprobe_common::network::target::url_authority;
use tracing::debug;

use crate::network::http::HttpTransport;
use crate::network::tcp::Connector;

const HTTPS_PORT: u16 = 443;

/// Selects which [`LivenessProbe`] a batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMode {
    /// TCP handshake only.
    Tcp,
    /// HTTP request with TCP fallback.
    #[default]
    Http,
}

#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// Probes one port of an already resolved target.
    ///
    /// Never fails: an unresolved target or a network error yields a result
    /// with `live == false`.
    async fn probe(&self, target: &ResolvedTarget, port: u16, timeout: Duration) -> ProbeResult;
}

pub struct TcpOnlyProbe {
    connector: Arc<dyn Connector>,
}

impl TcpOnlyProbe {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl LivenessProbe for TcpOnlyProbe {
    async fn probe(&self, target: &ResolvedTarget, port: u16, timeout: Duration) -> ProbeResult {
        let Some(addr) = target.resolved_address else {
            return ProbeResult::unresolved(&target.host, port);
        };

        let address = addr.to_string();
        let live = self.connector.connect(&address, port, timeout).await;
        debug!(host = %target.host, port, live, "tcp probe");

        ProbeResult::from_connect(&target.host, port, address, live)
    }
}

pub struct HttpFallbackProbe {
    transport: Arc<dyn HttpTransport>,
    connector: Arc<dyn Connector>,
}

impl HttpFallbackProbe {
    pub fn new(transport: Arc<dyn HttpTransport>, connector: Arc<dyn Connector>) -> Self {
        Self {
            transport,
            connector,
        }
    }

    /// `https` on 443, `http` everywhere else.
    pub fn probe_url(host: &str, port: u16) -> String {
        let scheme = if port == HTTPS_PORT { "https" } else { "http" };
        format!("{scheme}://{}", url_authority(host, port))
    }
}

#[async_trait]
impl LivenessProbe for HttpFallbackProbe {
    async fn probe(&self, target: &ResolvedTarget, port: u16, timeout: Duration) -> ProbeResult {
        let Some(addr) = target.resolved_address else {
            return ProbeResult::unresolved(&target.host, port);
        };
        let address = addr.to_string();
        let url = Self::probe_url(&target.host, port);

        match self.transport.get(&url, timeout).await {
            Ok(status) => {
                debug!(%url, status, "http probe answered");
                ProbeResult::from_http_status(&target.host, port, address, status)
            }
            Err(e) => {
                debug!(%url, error = %e, "http probe failed, falling back to tcp connect");
                let live = self.connector.connect(&address, port, timeout).await;
                ProbeResult::from_connect(&target.host, port, address, live)
            }
        }
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
