//! GNews search API client.
//!
//! Provides the news source behind the cached environmental feed.
//!
//! ### Upstream API
//!
//! - **Endpoint**: `https://gnews.io/api/v4/search`
//! - **Authentication**: `apikey` query parameter.
//! - **Rate Limiting**: requests from one client are spaced at least 1s apart.
//! - **Failures**: timeouts and connection errors are transport errors; non-2xx
//!   statuses carry the provider's `errors` message. No retries.
//! - **Normalization**: articles are converted to [`ecowatch_core::Article`],
//!   with a stock image when the source omits one.

pub mod request;
pub mod response;

pub use request::SearchRequest;
pub use response::{GNewsApiResponse, GNewsArticle, GNewsErrorBody};

use async_trait::async_trait;
use ecowatch_core::{AppConfig, Article};
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use crate::UpstreamError;
use crate::pacing::MinInterval;

/// Default base URL for the GNews API.
const DEFAULT_BASE_URL: &str = "https://gnews.io/api/v4";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "ecowatch/0.1";

/// Minimum interval between requests from one client.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// Upstream news search.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Search for articles, returning them normalized in provider order.
    async fn search(&self, req: &SearchRequest) -> Result<Vec<Article>, UpstreamError>;
}

/// GNews client configuration.
#[derive(Debug, Clone)]
pub struct GNewsConfig {
    pub api_key: String,
    /// Base URL (default: https://gnews.io/api/v4).
    pub base_url: String,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GNewsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GNewsConfig {
    /// Build from application configuration.
    ///
    /// Returns `UpstreamError::MissingApiKey` when no GNews key is configured.
    pub fn from_app(config: &AppConfig) -> Result<Self, UpstreamError> {
        let api_key = config
            .gnews_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(UpstreamError::MissingApiKey("ECOWATCH_GNEWS_API_KEY"))?;

        Ok(Self {
            api_key,
            base_url: config.gnews_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// GNews search API client.
#[derive(Debug, Clone)]
pub struct GNewsClient {
    http: reqwest::Client,
    config: GNewsConfig,
    endpoint: Url,
    rate_limiter: Arc<MinInterval>,
}

impl GNewsClient {
    /// Create a new GNews client with the given configuration.
    pub fn new(config: GNewsConfig) -> Result<Self, UpstreamError> {
        if config.api_key.is_empty() {
            return Err(UpstreamError::MissingApiKey("ECOWATCH_GNEWS_API_KEY"));
        }

        let endpoint = Url::parse(&format!("{}/search", config.base_url.trim_end_matches('/')))
            .map_err(|e| UpstreamError::InvalidRequest(format!("invalid GNews base URL: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, config, endpoint, rate_limiter: Arc::new(MinInterval::new(MIN_REQUEST_INTERVAL)) })
    }
}

#[async_trait]
impl NewsSource for GNewsClient {
    async fn search(&self, req: &SearchRequest) -> Result<Vec<Article>, UpstreamError> {
        req.validate()?;

        self.rate_limiter.acquire().await;

        let start = Instant::now();
        tracing::debug!(query = %req.q, max = req.max, "searching GNews");

        let http_response = self
            .http
            .get(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .query(req)
            .query(&[("apikey", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!(%status, "GNews response status");

        let bytes = http_response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<GNewsErrorBody>(&bytes)
                .map(|body| body.message())
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(UpstreamError::Provider { status: status.as_u16(), message });
        }

        let api_response: GNewsApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

        let articles = api_response.into_articles();
        tracing::debug!(elapsed = ?start.elapsed(), count = articles.len(), "GNews search completed");

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecowatch_core::news::DEFAULT_ARTICLE_IMAGE;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> GNewsClient {
        GNewsClient::new(GNewsConfig {
            api_key: "test-key".to_string(),
            base_url: server.url(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        })
        .unwrap()
    }

    fn request() -> SearchRequest {
        SearchRequest::new("environment OR climate change", "en", 3)
    }

    #[test]
    fn test_client_new_missing_key() {
        let result = GNewsClient::new(GNewsConfig::default());
        assert!(matches!(result, Err(UpstreamError::MissingApiKey(_))));
    }

    #[test]
    fn test_config_from_app() {
        let app = AppConfig { gnews_api_key: Some("abc".into()), ..Default::default() };
        let config = GNewsConfig::from_app(&app).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.timeout, Duration::from_secs(30));

        let app = AppConfig { gnews_api_key: Some(String::new()), ..Default::default() };
        assert!(matches!(GNewsConfig::from_app(&app), Err(UpstreamError::MissingApiKey(_))));
    }

    #[tokio::test]
    async fn test_search_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "environment OR climate change".into()),
                Matcher::UrlEncoded("lang".into(), "en".into()),
                Matcher::UrlEncoded("max".into(), "3".into()),
                Matcher::UrlEncoded("apikey".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "totalArticles": 3,
                    "articles": [
                        {"title": "One", "description": "d1", "content": "c1", "url": "https://a.example/1",
                         "image": "https://a.example/1.jpg", "publishedAt": "2025-01-01T00:00:00Z",
                         "source": {"name": "A", "url": "https://a.example"}},
                        {"title": "Two", "description": "d2", "content": "c2", "url": "https://a.example/2",
                         "image": null, "publishedAt": "2025-01-02T00:00:00Z",
                         "source": {"name": "A", "url": "https://a.example"}},
                        {"title": "Three", "description": "d3", "content": "c3", "url": "https://b.example/3",
                         "publishedAt": "2025-01-03T00:00:00Z", "source": {"name": "B"}}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let articles = client_for(&server).search(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "One");
        assert_eq!(articles[1].image, DEFAULT_ARTICLE_IMAGE);
        assert_eq!(articles[2].image, DEFAULT_ARTICLE_IMAGE);
        assert_eq!(articles[2].source.name, "B");
    }

    #[tokio::test]
    async fn test_search_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"errors": ["You did not provide an API key."]}"#)
            .create_async()
            .await;

        let result = client_for(&server).search(&request()).await;
        match result {
            Err(UpstreamError::Provider { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "You did not provide an API key.");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_provider_error_without_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let result = client_for(&server).search(&request()).await;
        assert!(matches!(result, Err(UpstreamError::Provider { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let result = client_for(&server).search(&request()).await;
        assert!(matches!(result, Err(UpstreamError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_search_transport_error() {
        let client = GNewsClient::new(GNewsConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();

        let err = client.search(&request()).await.unwrap_err();
        assert!(err.is_transport(), "expected transport error, got {err:?}");
    }

    #[tokio::test]
    async fn test_search_rejects_invalid_request() {
        let server = mockito::Server::new_async().await;
        let result = client_for(&server).search(&SearchRequest::new("", "en", 3)).await;
        assert!(matches!(result, Err(UpstreamError::InvalidRequest(_))));
    }
}
