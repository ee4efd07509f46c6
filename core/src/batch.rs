//! # Batch Orchestrator
//!
//! Resolves and probes many targets on one port. Targets are optionally
//! split into sub-batches that run one after another; inside a sub-batch
//! the worker pool keeps at most `concurrency` probes in flight.
//!
//! A batch never fails as a whole. Whatever goes wrong for one target ends
//! up as a `live == false` entry for that target.

use std::sync::Arc;
use std::time::Duration;

use netprobe_common::models::{BatchResult, ProbeResult};
use tracing::{debug, error};

use crate::network::http::HttpTransport;
use crate::network::tcp::Connector;
use crate::pool::{self, ProgressFn};
use crate::probe::{HttpFallbackProbe, LivenessProbe, ProbeMode, TcpOnlyProbe};
use crate::resolver::TargetResolver;

pub struct BatchOrchestrator {
    resolver: Arc<TargetResolver>,
    probe: Arc<dyn LivenessProbe>,
    progress: Option<ProgressFn>,
}

impl BatchOrchestrator {
    pub fn new(resolver: Arc<TargetResolver>, probe: Arc<dyn LivenessProbe>) -> Self {
        Self {
            resolver,
            probe,
            progress: None,
        }
    }

    /// Builds the orchestrator for a front-end mode: `Tcp` probes with a bare
    /// handshake, `Http` with an HTTP request that falls back to one.
    pub fn for_mode(
        mode: ProbeMode,
        resolver: Arc<TargetResolver>,
        connector: Arc<dyn Connector>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let probe: Arc<dyn LivenessProbe> = match mode {
            ProbeMode::Tcp => Arc::new(TcpOnlyProbe::new(connector)),
            ProbeMode::Http => Arc::new(HttpFallbackProbe::new(transport, connector)),
        };
        Self::new(resolver, probe)
    }

    /// Reports the number of finished targets across the whole batch.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Resolves and probes a single target.
    pub async fn probe_one(&self, raw: &str, port: u16, timeout: Duration) -> ProbeResult {
        probe_target(&self.resolver, self.probe.as_ref(), raw, port, timeout).await
    }

    /// Probes every target and returns one entry per distinct input string.
    ///
    /// Duplicates are probed again; the entry for the later input position
    /// is the one kept. `sub_batch_size` of `None` or `Some(0)` runs the
    /// whole list as one batch.
    pub async fn batch_probe(
        &self,
        targets: Vec<String>,
        port: u16,
        timeout: Duration,
        concurrency: usize,
        sub_batch_size: Option<usize>,
    ) -> BatchResult {
        let mut results = BatchResult::new();
        if targets.is_empty() {
            return results;
        }

        let chunk_size = match sub_batch_size {
            Some(size) if size > 0 => size,
            _ => targets.len(),
        };
        let chunks = targets.len().div_ceil(chunk_size);
        debug!(targets = targets.len(), chunks, port, concurrency, "starting batch");

        for (number, chunk) in targets.chunks(chunk_size).enumerate() {
            let offset = number * chunk_size;
            debug!(chunk = number + 1, of = chunks, size = chunk.len(), "probing sub-batch");

            let outcomes = self
                .run_chunk(chunk.to_vec(), offset, port, timeout, concurrency)
                .await;

            for (raw, outcome) in chunk.iter().zip(outcomes) {
                let result = outcome.unwrap_or_else(|| {
                    error!("probe of {raw} did not complete, recording it as down");
                    ProbeResult::unresolved(raw.trim(), port)
                });
                results.insert(raw.clone(), result);
            }
        }

        results
    }

    async fn run_chunk(
        &self,
        chunk: Vec<String>,
        offset: usize,
        port: u16,
        timeout: Duration,
        concurrency: usize,
    ) -> Vec<Option<ProbeResult>> {
        let progress = self.progress.clone().map(|report| -> ProgressFn {
            Arc::new(move |done: usize| report(offset + done))
        });

        let resolver = self.resolver.clone();
        let probe = self.probe.clone();
        pool::run_bounded(chunk, concurrency, progress, move |raw| {
            let resolver = resolver.clone();
            let probe = probe.clone();
            async move { probe_target(&resolver, probe.as_ref(), &raw, port, timeout).await }
        })
        .await
    }
}

async fn probe_target(
    resolver: &TargetResolver,
    probe: &dyn LivenessProbe,
    raw: &str,
    port: u16,
    timeout: Duration,
) -> ProbeResult {
    let target = resolver.resolve(raw).await;
    probe.probe(&target, port, timeout).await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
