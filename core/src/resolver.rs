//! # Target Resolver
//!
//! Turns a raw target string into a [`ResolvedTarget`]. Address literals
//! resolve to themselves; everything else goes through a [`DnsLookup`].
//! Lookups are attempted once and never retried.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use netprobe_common::{ProbeError, models::ResolvedTarget, network::target::Target};
use tracing::{debug, warn};

/// Name to address lookup.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ProbeError>;
}

/// The operating system resolver, via `tokio::net::lookup_host`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDns;

#[async_trait]
impl DnsLookup for SystemDns {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ProbeError> {
        let addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| ProbeError::resolution(host, e))?;
        Ok(addrs.map(|socket_addr| socket_addr.ip()).collect())
    }
}

pub struct TargetResolver {
    dns: Arc<dyn DnsLookup>,
}

impl TargetResolver {
    pub fn new(dns: Arc<dyn DnsLookup>) -> Self {
        Self { dns }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemDns))
    }

    /// Resolves `raw`, failing with [`ProbeError::Resolution`] when the
    /// input is malformed or the name does not resolve.
    pub async fn try_resolve(&self, raw: &str) -> Result<ResolvedTarget, ProbeError> {
        let target: Target = raw.parse()?;
        let addr = self.lookup_target(&target).await?;
        Ok(ResolvedTarget::new(raw, target.host(), addr))
    }

    /// Like [`TargetResolver::try_resolve`], but a failure is logged and
    /// returned as a target without an address.
    pub async fn resolve(&self, raw: &str) -> ResolvedTarget {
        let target: Target = match raw.parse() {
            Ok(target) => target,
            Err(e) => {
                warn!("{e}");
                return ResolvedTarget::unresolved(raw, raw.trim());
            }
        };

        match self.lookup_target(&target).await {
            Ok(addr) => ResolvedTarget::new(raw, target.host(), addr),
            Err(e) => {
                warn!("{e}");
                ResolvedTarget::unresolved(raw, target.host())
            }
        }
    }

    async fn lookup_target(&self, target: &Target) -> Result<IpAddr, ProbeError> {
        if let Some(addr) = target.ip_literal() {
            return Ok(addr);
        }

        let host = target.host();
        let addrs = self.dns.lookup(&host).await?;
        let addr = pick_address(&addrs)
            .ok_or_else(|| ProbeError::resolution(&host, "lookup returned no addresses"))?;

        debug!(%host, %addr, "resolved");
        Ok(addr)
    }
}

/// Prefers the first IPv4 answer, falling back to whatever came first.
fn pick_address(addrs: &[IpAddr]) -> Option<IpAddr> {
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
