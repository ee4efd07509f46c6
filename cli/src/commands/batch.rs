use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use colored::*;
use netprobe_common::config::Config;
use netprobe_common::{info, success};
use netprobe_core::network::http::ReqwestTransport;
use netprobe_core::network::tcp::TcpConnector;
use netprobe_core::{BatchOrchestrator, ProbeMode, TargetResolver};

use crate::input;
use crate::mprint;
use crate::terminal::{colors, output::Report, print, progress::Progress};

pub async fn batch(file: &Path, port: u16, mode: ProbeMode, cfg: &Config) -> anyhow::Result<Report> {
    let targets = input::read_targets(file)?;
    print::header(&format!("batch of {} targets", targets.len()), cfg.quiet);
    if targets.is_empty() {
        info!("{} holds no targets", file.display());
    }

    let transport = Arc::new(ReqwestTransport::new(cfg)?);
    let progress = Progress::start(targets.len(), "probing", cfg.quiet);
    let orchestrator = BatchOrchestrator::for_mode(
        mode,
        Arc::new(TargetResolver::system()),
        Arc::new(TcpConnector::new()),
        transport,
    )
    .with_progress(progress.callback());

    let start_time = Instant::now();
    let results = orchestrator
        .batch_probe(targets, port, cfg.timeout, cfg.concurrency, cfg.sub_batch_size)
        .await;
    progress.finish();

    let live: ColoredString = format!("{} live", results.live_count()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
    let summary = format!("Batch complete: {live} of {} targets in {total_time}", results.len())
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&summary);
        }
        _ => {
            mprint!();
            success!("{}", summary)
        }
    }

    Ok(Report::Batch(results))
}
