use std::sync::Arc;

use netprobe_common::{config::Config, success, warn};
use netprobe_core::network::tcp::TcpConnector;
use netprobe_core::probe::TcpOnlyProbe;
use netprobe_core::{BatchOrchestrator, TargetResolver};

use crate::terminal::{output::Report, print};

pub async fn ip(target: &str, port: u16, cfg: &Config) -> anyhow::Result<Report> {
    print::header(&format!("tcp probe {target}:{port}"), cfg.quiet);

    let orchestrator = BatchOrchestrator::new(
        Arc::new(TargetResolver::system()),
        Arc::new(TcpOnlyProbe::new(Arc::new(TcpConnector::new()))),
    );
    let result = orchestrator.probe_one(target, port, cfg.timeout).await;

    if result.live {
        success!("{}:{} accepts connections", result.target, port);
    } else {
        warn!("{}:{} did not accept a connection", result.target, port);
    }

    Ok(Report::Probe(result))
}
