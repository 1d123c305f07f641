//! Upstream client error types.

use std::sync::Arc;

use ecowatch_core::Error;

/// Errors from the news and generation provider clients.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// No API key was configured for the provider.
    #[error("missing API key: {0} not set")]
    MissingApiKey(&'static str),

    /// The request was rejected before being sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error (connect, DNS, TLS, body read).
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// The provider answered with an error status or payload.
    #[error("provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    /// The provider answered successfully without the expected structure.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl UpstreamError {
    /// True for failures that never reached the provider.
    pub fn is_transport(&self) -> bool {
        matches!(self, UpstreamError::Timeout | UpstreamError::Network(_))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { UpstreamError::Timeout } else { UpstreamError::Network(Arc::new(err)) }
    }
}

impl From<UpstreamError> for Error {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::MissingApiKey(_) => Error::NotConfigured(err.to_string()),
            UpstreamError::InvalidRequest(msg) => Error::InvalidInput(msg),
            UpstreamError::Timeout | UpstreamError::Network(_) => Error::Transport(err.to_string()),
            UpstreamError::Provider { message, .. } => Error::Provider(message),
            UpstreamError::MalformedResponse(msg) => Error::MalformedResponse(msg),
        }
    }
}
