use std::sync::Arc;
use std::time::Instant;

use colored::*;
use netprobe_common::config::Config;
use netprobe_common::models::PortScanResult;
use netprobe_common::network::ports::PortSpec;
use netprobe_common::network::range::PortRange;
use netprobe_common::{success, warn};
use netprobe_core::network::tcp::TcpConnector;
use netprobe_core::{PortScanner, TargetResolver};

use crate::terminal::{output::Report, print, progress::Progress};

pub async fn scan(
    target: &str,
    start_port: u16,
    end_port: u16,
    ports: Option<PortSpec>,
    cfg: &Config,
) -> anyhow::Result<Report> {
    // validated before anything touches the network
    let selected: Option<Vec<u16>> = ports.map(|spec| spec.to_ports());
    let total = match &selected {
        Some(list) => list.len(),
        None => PortRange::new(start_port.into(), end_port.into())?.len(),
    };

    print::header(&format!("scanning {total} ports on {target}"), cfg.quiet);

    let resolved = TargetResolver::system().resolve(target).await;
    let Some(address) = resolved.address_string() else {
        warn!("{target} could not be resolved, nothing scanned");
        return Ok(Report::Scan(PortScanResult::new(resolved.host, Vec::new())));
    };

    let progress = Progress::start(total, &format!("scanning {address}"), cfg.quiet);
    let scanner = PortScanner::new(Arc::new(TcpConnector::new())).with_progress(progress.callback());

    let start_time = Instant::now();
    let open = match &selected {
        Some(list) => {
            scanner
                .scan_port_list(&address, list, cfg.timeout, cfg.concurrency)
                .await
        }
        None => {
            scanner
                .scan_ports(&address, start_port, end_port, cfg.timeout, cfg.concurrency)
                .await
        }
    };
    progress.finish();
    let open = open?;

    let elapsed: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
    success!(
        "Scan complete: {} open of {} in {elapsed}",
        open.len().to_string().green().bold(),
        total
    );

    Ok(Report::Scan(PortScanResult::new(resolved.host, open)))
}
