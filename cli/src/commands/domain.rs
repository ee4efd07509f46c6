use std::sync::Arc;

use netprobe_common::{config::Config, success, warn};
use netprobe_core::network::http::ReqwestTransport;
use netprobe_core::network::tcp::TcpConnector;
use netprobe_core::probe::HttpFallbackProbe;
use netprobe_core::{BatchOrchestrator, TargetResolver};

use crate::terminal::{output::Report, print};

pub async fn domain(target: &str, port: u16, cfg: &Config) -> anyhow::Result<Report> {
    print::header(&format!("http probe {target}"), cfg.quiet);

    let probe = HttpFallbackProbe::new(
        Arc::new(ReqwestTransport::new(cfg)?),
        Arc::new(TcpConnector::new()),
    );
    let orchestrator = BatchOrchestrator::new(Arc::new(TargetResolver::system()), Arc::new(probe));
    let result = orchestrator.probe_one(target, port, cfg.timeout).await;

    match (result.live, result.http_status) {
        (true, Some(status)) => success!("{} answered with HTTP {status}", result.target),
        (true, None) => success!("{}:{port} is open but did not answer HTTP", result.target),
        (false, Some(status)) => warn!("{} answered with HTTP {status}", result.target),
        (false, None) => warn!("{}:{port} is not reachable", result.target),
    }

    Ok(Report::Probe(result))
}
