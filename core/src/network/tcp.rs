use std::io::{self, ErrorKind};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// What happened to a single connect attempt.
///
/// Callers of [`Connector::connect`] only ever see whether the outcome was
/// [`ConnectOutcome::Open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    Open,
    Refused,
    TimedOut,
    Unreachable,
    Failed,
}

impl ConnectOutcome {
    pub fn is_open(self) -> bool {
        self == ConnectOutcome::Open
    }
}

/// Answers "does (address, port) accept a TCP connection within `timeout`".
///
/// Implementations never fail; every negative outcome is `false`.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, address: &str, port: u16, timeout: Duration) -> bool;
}

/// Plain TCP handshake using tokio sockets.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl TcpConnector {
    pub fn new() -> Self {
        Self
    }

    /// Performs one connect attempt and classifies the result.
    ///
    /// The stream is dropped before returning, so the socket is closed on
    /// every path, including the timeout one.
    pub async fn attempt(&self, address: &str, port: u16, probe_timeout: Duration) -> ConnectOutcome {
        let host = strip_brackets(address);

        match timeout(probe_timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ConnectOutcome::Open
            }
            Ok(Err(e)) => classify(&e),
            Err(_elapsed) => ConnectOutcome::TimedOut,
        }
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, address: &str, port: u16, probe_timeout: Duration) -> bool {
        let outcome = self.attempt(address, port, probe_timeout).await;
        trace!(address, port, ?outcome, "tcp connect");
        outcome.is_open()
    }
}

fn classify(err: &io::Error) -> ConnectOutcome {
    match err.kind() {
        ErrorKind::ConnectionRefused | ErrorKind::ConnectionReset => ConnectOutcome::Refused,
        ErrorKind::TimedOut => ConnectOutcome::TimedOut,
        ErrorKind::HostUnreachable | ErrorKind::NetworkUnreachable => ConnectOutcome::Unreachable,
        _ => ConnectOutcome::Failed,
    }
}

fn strip_brackets(address: &str) -> &str {
    address
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(address)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn connect_succeeds_against_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        assert!(TcpConnector.connect("127.0.0.1", port, PROBE_TIMEOUT).await);
    }

    #[tokio::test]
    async fn connect_fails_when_nothing_listens() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let outcome = TcpConnector.attempt("127.0.0.1", port, PROBE_TIMEOUT).await;
        assert!(!outcome.is_open());
        assert!(!TcpConnector.connect("127.0.0.1", port, PROBE_TIMEOUT).await);
    }

    #[tokio::test]
    async fn invalid_address_is_just_false() {
        assert!(!TcpConnector.connect("not an address", 80, PROBE_TIMEOUT).await);
        assert!(!TcpConnector.connect("", 80, PROBE_TIMEOUT).await);
    }

    #[test]
    fn brackets_are_stripped_from_ipv6() {
        assert_eq!(strip_brackets("[::1]"), "::1");
        assert_eq!(strip_brackets("::1"), "::1");
        assert_eq!(strip_brackets("10.0.0.1"), "10.0.0.1");
    }

    #[tokio::test]
    #[ignore]
    async fn connect_times_out_on_unroutable_address() {
        let outcome = TcpConnector
            .attempt("198.51.100.1", 80, Duration::from_millis(300))
            .await;
        assert!(matches!(
            outcome,
            ConnectOutcome::TimedOut | ConnectOutcome::Unreachable
        ));
    }
}
