//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (ECOWATCH_*)
//! 2. TOML config file (if ECOWATCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (ECOWATCH_*)
/// 2. TOML config file (if ECOWATCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// GNews API key for the environmental news feed.
    ///
    /// Set via ECOWATCH_GNEWS_API_KEY. Without it the feed serves the
    /// bundled fallback articles.
    #[serde(default)]
    pub gnews_api_key: Option<String>,

    /// Gemini API key for impact analyses and Q&A.
    ///
    /// Set via ECOWATCH_GEMINI_API_KEY. Required only by generation operations.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Path to the SQLite database.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for upstream requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upstream request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// News cache lifetime in seconds; also the scheduled refresh period.
    #[serde(default = "default_news_ttl_secs")]
    pub news_ttl_secs: u64,

    /// Fixed query sent to the news provider.
    #[serde(default = "default_news_query")]
    pub news_query: String,

    /// Article language (ISO 639-1).
    #[serde(default = "default_news_lang")]
    pub news_lang: String,

    /// Maximum number of articles requested per refresh.
    #[serde(default = "default_news_max_articles")]
    pub news_max_articles: u8,

    #[serde(default = "default_gnews_base_url")]
    pub gnews_base_url: String,

    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Gemini model used for every generation request.
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Delay between consecutive generation calls in the enrichment job.
    #[serde(default = "default_enrichment_delay_ms")]
    pub enrichment_delay_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./ecowatch.sqlite")
}

fn default_user_agent() -> String {
    "ecowatch/0.1".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_news_ttl_secs() -> u64 {
    30 * 60
}

fn default_news_query() -> String {
    "environment OR climate change OR conservation OR sustainability".into()
}

fn default_news_lang() -> String {
    "en".into()
}

fn default_news_max_articles() -> u8 {
    20
}

fn default_gnews_base_url() -> String {
    "https://gnews.io/api/v4".into()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_gemini_model() -> String {
    "gemini-flash-latest".into()
}

fn default_enrichment_delay_ms() -> u64 {
    2_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gnews_api_key: None,
            gemini_api_key: None,
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            news_ttl_secs: default_news_ttl_secs(),
            news_query: default_news_query(),
            news_lang: default_news_lang(),
            news_max_articles: default_news_max_articles(),
            gnews_base_url: default_gnews_base_url(),
            gemini_base_url: default_gemini_base_url(),
            gemini_model: default_gemini_model(),
            enrichment_delay_ms: default_enrichment_delay_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// News cache TTL, which doubles as the scheduler period.
    pub fn news_ttl(&self) -> Duration {
        Duration::from_secs(self.news_ttl_secs)
    }

    pub fn enrichment_delay(&self) -> Duration {
        Duration::from_millis(self.enrichment_delay_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `ECOWATCH_`
    /// 2. TOML file from `ECOWATCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered figment `load` extracts from.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("ECOWATCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("ECOWATCH_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract and validate a configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Gemini API key, required by every generation operation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_gemini_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "gemini_api_key".into(),
            hint: "Set ECOWATCH_GEMINI_API_KEY environment variable".into(),
        })
    }
}
