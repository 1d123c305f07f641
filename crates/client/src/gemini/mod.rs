//! Gemini text-generation client.
//!
//! Issues one `generateContent` request per prompt and returns the first
//! candidate's text. The client never retries; callers decide whether a
//! failure means fallback, skip or abort.

pub mod request;
pub mod response;

pub use request::GenerateContentRequest;
pub use response::{GeminiErrorBody, GenerateContentResponse};

use async_trait::async_trait;
use ecowatch_core::AppConfig;
use std::time::{Duration, Instant};
use url::Url;

use crate::UpstreamError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = "ecowatch/0.1";

/// Upstream text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a fully assembled prompt.
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Build from application configuration.
    pub fn from_app(config: &AppConfig) -> Result<Self, UpstreamError> {
        let api_key = config
            .gemini_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(UpstreamError::MissingApiKey("ECOWATCH_GEMINI_API_KEY"))?;

        Ok(Self {
            api_key,
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: Url,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, UpstreamError> {
        if config.api_key.is_empty() {
            return Err(UpstreamError::MissingApiKey("ECOWATCH_GEMINI_API_KEY"));
        }

        let endpoint = Url::parse(&format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        ))
        .map_err(|e| UpstreamError::InvalidRequest(format!("invalid Gemini endpoint: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self { http, api_key: config.api_key, endpoint })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let start = Instant::now();
        tracing::debug!(prompt_chars = prompt.len(), "requesting Gemini generation");

        let http_response = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = http_response.status();
        let bytes = http_response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<GeminiErrorBody>(&bytes)
                .map(|body| body.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            tracing::debug!(%status, %message, "Gemini returned an error");
            return Err(UpstreamError::Provider { status: status.as_u16(), message });
        }

        let response: GenerateContentResponse =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;
        let text = response.into_text()?;

        tracing::debug!(elapsed = ?start.elapsed(), chars = text.len(), "Gemini generation completed");
        Ok(text)
    }
}
