use std::time::Duration;

use async_trait::async_trait;
use netprobe_common::{ProbeError, config::Config};
use thiserror::Error;

/// Why an HTTP request produced no status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Request(String),
}

/// Issues a single GET and reports the response status.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<u16, TransportError>;
}

/// [`HttpTransport`] backed by a shared `reqwest` client.
///
/// Idle connections are not kept, so every probe opens and closes its own
/// connection. Redirects follow reqwest's default policy.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(cfg: &Config) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .danger_accept_invalid_certs(cfg.accept_invalid_certs)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<u16, TransportError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Request(e.to_string())
                }
            })?;

        Ok(response.status().as_u16())
    }
}
