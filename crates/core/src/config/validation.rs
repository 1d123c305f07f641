//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::NotConfigured(err.to_string())
    }
}

/// Longest accepted news TTL, which is also the scheduler period.
const MAX_NEWS_TTL_SECS: u64 = 365 * 24 * 60 * 60;

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `news_ttl_secs` is 0 or longer than one year
    /// - `news_max_articles` is outside 1..=100
    /// - `news_query`, `news_lang`, `user_agent` or `gemini_model` is empty
    /// - `enrichment_delay_ms` exceeds one minute
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.news_ttl_secs == 0 {
            return Err(invalid("news_ttl_secs", "must be greater than 0"));
        }
        if self.news_ttl_secs > MAX_NEWS_TTL_SECS {
            return Err(invalid("news_ttl_secs", "must not exceed one year (31536000s)"));
        }

        if !(1..=100).contains(&self.news_max_articles) {
            return Err(invalid("news_max_articles", "must be between 1 and 100"));
        }

        for (field, value) in [
            ("news_query", &self.news_query),
            ("news_lang", &self.news_lang),
            ("user_agent", &self.user_agent),
            ("gemini_model", &self.gemini_model),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }

        if self.enrichment_delay_ms > 60_000 {
            return Err(invalid("enrichment_delay_ms", "must not exceed 1 minute (60000ms)"));
        }

        if self.gnews_api_key.is_none() {
            tracing::warn!("gnews_api_key is not set; the news feed will serve fallback articles");
        }

        Ok(())
    }
}
