//! Rendering of final results, either as pretty JSON or as coloured text.
//!
//! Results go to stdout so they can be piped; everything decorative goes
//! through the logger on stderr.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use colored::*;
use netprobe_common::models::{BatchResult, HostCheck, PortScanResult, ProbeResult};
use serde::Serialize;

use crate::terminal::colors;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Probe(ProbeResult),
    Scan(PortScanResult),
    Batch(BatchResult),
    Host(HostCheck),
}

impl Report {
    /// A host check that found nothing open exits with status 1.
    pub fn is_failure(&self) -> bool {
        matches!(self, Report::Host(check) if !check.alive)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub file: Option<PathBuf>,
}

/// Prints the report and, when asked to, writes the same content to a file
/// with colours stripped.
pub fn emit(report: &Report, opts: &OutputOptions) -> anyhow::Result<()> {
    let rendered = if opts.json {
        serde_json::to_string_pretty(report).context("could not serialize results")?
    } else {
        render_text(report)
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("could not write results")?;

    if let Some(path) = &opts.file {
        let plain = console::strip_ansi_codes(&rendered);
        std::fs::write(path, format!("{plain}\n"))
            .with_context(|| format!("could not write results to {}", path.display()))?;
    }

    Ok(())
}

pub fn render_text(report: &Report) -> String {
    match report {
        Report::Probe(result) => probe_line(&result.target, result),
        Report::Scan(scan) => scan_tree(scan),
        Report::Batch(batch) => batch_lines(batch),
        Report::Host(check) => host_lines(check),
    }
}

fn state(live: bool) -> ColoredString {
    if live {
        "LIVE".color(colors::LIVE).bold()
    } else {
        "DOWN".color(colors::DOWN).bold()
    }
}

fn probe_line(label: &str, result: &ProbeResult) -> String {
    let mut line = format!(
        "{} {}{}{}",
        state(result.live),
        label.color(colors::PRIMARY),
        ":".color(colors::SEPARATOR),
        result.port.to_string().color(colors::ACCENT)
    );

    match &result.address {
        Some(address) if address != label => {
            let _ = write!(line, " ({})", address.color(colors::ADDRESS));
        }
        Some(_) => {}
        None => {
            let _ = write!(line, " {}", "(unresolved)".dimmed());
        }
    }

    if let Some(status) = result.http_status {
        let _ = write!(line, " {} {}", "http".color(colors::SEPARATOR), status);
    }

    line
}

fn open_port(port: u16) -> String {
    format!(
        "{}/tcp {}",
        port.to_string().color(colors::ACCENT),
        "open".color(colors::LIVE)
    )
}

fn tree(lines: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        let branch = if i + 1 == items.len() { "└─" } else { "├─" };
        let _ = writeln!(lines, " {} {}", branch.color(colors::SEPARATOR), item);
    }
}

fn scan_tree(scan: &PortScanResult) -> String {
    let mut out = format!("{}\n", scan.target.color(colors::PRIMARY));
    if scan.open_ports.is_empty() {
        tree(&mut out, &[format!("{}", "no open ports".dimmed())]);
    } else {
        let ports: Vec<String> = scan
            .open_ports
            .iter()
            .map(|port| open_port(*port))
            .collect();
        tree(&mut out, &ports);
    }
    let _ = write!(out, "{} open", scan.open_ports.len());
    out
}

fn batch_lines(batch: &BatchResult) -> String {
    let mut out = String::new();
    for (input, result) in batch.iter() {
        let _ = writeln!(out, "{}", probe_line(input, result));
    }
    let _ = write!(
        out,
        "{} of {} targets live",
        batch.live_count().to_string().color(colors::LIVE).bold(),
        batch.len()
    );
    out
}

fn host_lines(check: &HostCheck) -> String {
    let address = check.address.as_deref().unwrap_or("unresolved");
    let mut out = format!(
        "{} {} ({})\n",
        state(check.alive),
        check.target.color(colors::PRIMARY),
        address.color(colors::ADDRESS)
    );

    let ports: Vec<String> = if check.open_ports.is_empty() {
        vec![format!("{}", "no common port answered".dimmed())]
    } else {
        check
            .open_ports
            .iter()
            .map(|port| open_port(*port))
            .collect()
    };
    tree(&mut out, &ports);
    out.truncate(out.trim_end().len());
    out
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
