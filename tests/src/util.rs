use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use netprobe_common::config::Config;
use netprobe_common::ProbeError;
use netprobe_core::network::http::ReqwestTransport;
use netprobe_core::network::tcp::TcpConnector;
use netprobe_core::probe::HttpFallbackProbe;
use netprobe_core::resolver::DnsLookup;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const TIMEOUT: Duration = Duration::from_secs(1);

/// Serves every connection a minimal HTTP response with `status`.
pub async fn http_server(status: u16) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok"
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    Ok(addr)
}

/// Accepts connections and answers with an SSH banner instead of HTTP.
pub async fn banner_server() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _ = stream.write_all(b"SSH-2.0-OpenSSH_9.6\r\n").await;
                let mut buf = [0u8; 256];
                let _ = stream.read(&mut buf).await;
            });
        }
    });

    Ok(addr)
}

/// A loopback port that nothing listens on.
pub async fn closed_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}

pub fn http_probe() -> anyhow::Result<HttpFallbackProbe> {
    let transport = ReqwestTransport::new(&Config::default())?;
    Ok(HttpFallbackProbe::new(
        Arc::new(transport),
        Arc::new(TcpConnector::new()),
    ))
}

/// A resolver that knows no names at all.
pub struct NoDns;

#[async_trait]
impl DnsLookup for NoDns {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ProbeError> {
        Err(ProbeError::resolution(host, "name does not exist"))
    }
}
