use thiserror::Error;

/// Errors produced by the probing engine.
///
/// Only [`ProbeError::InvalidRange`], [`ProbeError::InvalidPortSpec`] and
/// [`ProbeError::Client`] are ever fatal. A [`ProbeError::Resolution`] is
/// recovered by the caller and recorded as a `live = false` result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("could not resolve '{host}': {reason}")]
    Resolution { host: String, reason: String },

    #[error("invalid port range {start}-{end} (expected 1 <= start <= end <= 65535)")]
    InvalidRange { start: u32, end: u32 },

    #[error("invalid port specification '{0}'")]
    InvalidPortSpec(String),

    #[error("failed to build http client: {0}")]
    Client(String),
}

impl ProbeError {
    pub fn resolution(host: impl Into<String>, reason: impl ToString) -> Self {
        Self::Resolution {
            host: host.into(),
            reason: reason.to_string(),
        }
    }
}
