use std::sync::Arc;

use netprobe_common::config::Config;
use netprobe_common::network::ports::{COMMON_PORTS, PortSpec};
use netprobe_common::{success, warn};
use netprobe_core::network::tcp::TcpConnector;
use netprobe_core::{PortScanner, TargetResolver};

use crate::terminal::{output::Report, print};

pub async fn check(target: &str, ports: Option<PortSpec>, cfg: &Config) -> anyhow::Result<Report> {
    let ports = ports.map_or_else(|| COMMON_PORTS.to_vec(), |spec| spec.to_ports());
    print::header(&format!("checking {target}"), cfg.quiet);

    let resolved = TargetResolver::system().resolve(target).await;
    let scanner = PortScanner::new(Arc::new(TcpConnector::new()));
    let check = scanner
        .check_host(&resolved, &ports, cfg.timeout, cfg.concurrency)
        .await?;

    if check.alive {
        success!("Host {} is alive ({} open)", check.target, check.open_ports.len());
    } else {
        warn!("Host {} appears to be down", check.target);
    }

    Ok(Report::Host(check))
}
