pub mod batch;
pub mod check;
pub mod domain;
pub mod ip;
pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use netprobe_common::config::{
    Config, DEFAULT_BATCH_CONCURRENCY, DEFAULT_SCAN_CONCURRENCY, DEFAULT_SUB_BATCH_SIZE,
};
use netprobe_common::network::ports::PortSpec;
use netprobe_core::ProbeMode;

use crate::terminal::output::OutputOptions;

#[derive(Parser)]
#[command(name = "netprobe", version)]
#[command(about = "Concurrent liveness prober for hosts, ports and web endpoints.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Timeout for every single connect or HTTP request, in seconds
    #[arg(long, global = true, default_value = "2", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write the results to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less decoration (-q hides headers and progress, -qq only prints results)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a host accepts TCP connections on a port
    #[command(alias = "i")]
    Ip {
        target: String,
        #[arg(short, long, default_value_t = 80)]
        port: u16,
    },
    /// Check a domain or URL over HTTP, falling back to a TCP connect
    #[command(alias = "d")]
    Domain {
        target: String,
        #[arg(short, long, default_value_t = 80)]
        port: u16,
    },
    /// Scan a range or list of TCP ports on one host
    #[command(name = "scan-ip", alias = "s")]
    ScanIp {
        target: String,
        #[arg(long, default_value_t = 1)]
        start_port: u16,
        #[arg(long, default_value_t = 1024)]
        end_port: u16,
        /// Port selection such as "22", "1-1024" or "80,443,8080"; overrides the range
        #[arg(short, long)]
        ports: Option<PortSpec>,
        #[arg(long, default_value_t = DEFAULT_SCAN_CONCURRENCY)]
        threads: usize,
    },
    /// Check every target listed in a file, one per line
    #[command(alias = "b")]
    Batch {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long, default_value_t = 80)]
        port: u16,
        #[arg(long, default_value_t = DEFAULT_BATCH_CONCURRENCY)]
        threads: usize,
        /// Targets probed per sub-batch; 0 probes the whole file at once
        #[arg(long, default_value_t = DEFAULT_SUB_BATCH_SIZE)]
        batch_size: usize,
        #[arg(long, value_enum, default_value_t = Mode::Http)]
        mode: Mode,
    },
    /// Check whether a host answers on any common service port
    #[command(alias = "c")]
    Check {
        target: String,
        /// Ports to try instead of the common service ports
        #[arg(short, long)]
        ports: Option<PortSpec>,
        #[arg(long, default_value_t = DEFAULT_SCAN_CONCURRENCY)]
        threads: usize,
    },
}

/// How `batch` decides whether a target is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// TCP connect only
    Tcp,
    /// HTTP request, TCP connect when HTTP gets no answer
    Http,
}

impl From<Mode> for ProbeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Tcp => ProbeMode::Tcp,
            Mode::Http => ProbeMode::Http,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Runtime settings from the global flags and the chosen subcommand.
    pub fn config(&self) -> Config {
        let mut cfg = Config {
            timeout: self.timeout,
            quiet: self.quiet,
            ..Config::default()
        };

        match &self.command {
            Commands::ScanIp { threads, .. } | Commands::Check { threads, .. } => {
                cfg.concurrency = *threads;
            }
            Commands::Batch {
                threads,
                batch_size,
                ..
            } => {
                cfg.concurrency = *threads;
                cfg.sub_batch_size = Some(*batch_size);
            }
            Commands::Ip { .. } | Commands::Domain { .. } => {}
        }

        cfg
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            file: self.output.clone(),
        }
    }
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number of seconds"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be positive, got {s}"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("timeout {s} is out of range: {e}"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
