//! GNews search request parameters and validation.

use serde::Serialize;

use crate::UpstreamError;

/// Search request parameters for the GNews search endpoint.
///
/// Serialized as the query string; the API key is added by the client.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Search query; supports `AND`/`OR`/`NOT` operators.
    pub q: String,

    /// Article language (ISO 639-1, e.g., "en").
    pub lang: String,

    /// Maximum number of articles (1-100).
    pub max: u8,
}

impl SearchRequest {
    pub fn new(q: impl Into<String>, lang: impl Into<String>, max: u8) -> Self {
        Self { q: q.into(), lang: lang.into(), max }
    }

    /// Validate the request parameters.
    ///
    /// Returns an error if any parameters are out of range or malformed.
    pub fn validate(&self) -> Result<(), UpstreamError> {
        if self.q.trim().is_empty() {
            return Err(UpstreamError::InvalidRequest("query cannot be empty".to_string()));
        }

        if self.q.len() > 200 {
            return Err(UpstreamError::InvalidRequest(format!(
                "query too long: {} chars (max 200)",
                self.q.len()
            )));
        }

        if !(1..=100).contains(&self.max) {
            return Err(UpstreamError::InvalidRequest(format!("max must be 1-100, got {}", self.max)));
        }

        if self.lang.len() != 2 || !self.lang.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(UpstreamError::InvalidRequest(format!("invalid language code: {:?}", self.lang)));
        }

        Ok(())
    }
}
