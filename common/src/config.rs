use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_SCAN_CONCURRENCY: usize = 50;
pub const DEFAULT_BATCH_CONCURRENCY: usize = 10;
pub const DEFAULT_SUB_BATCH_SIZE: usize = 1000;

/// Runtime settings handed from the command line down to the engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound for every single connect or HTTP request.
    pub timeout: Duration,
    /// Number of workers a scan or batch may run at once.
    pub concurrency: usize,
    /// Splits large batches into sequential chunks of this size.
    pub sub_batch_size: Option<usize>,
    /// Sent with every HTTP probe.
    pub user_agent: String,
    /// Lets HTTPS probes succeed against self-signed or expired certificates.
    pub accept_invalid_certs: bool,
    /// 0 prints everything, 1 hides headers and progress, 2 prints results only.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_SCAN_CONCURRENCY,
            sub_batch_size: Some(DEFAULT_SUB_BATCH_SIZE),
            user_agent: format!("netprobe/{}", env!("CARGO_PKG_VERSION")),
            accept_invalid_certs: true,
            quiet: 0,
        }
    }
}
