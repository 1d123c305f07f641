//! Cached environmental news feed.
//!
//! The feed lives under a single cache key. A refresh always produces a
//! payload: provider results when the call succeeds, the bundled fallback set
//! (marked `is_fallback`) when it fails or no provider is configured. Only a
//! failed cache write surfaces as an error.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ecowatch_client::{NewsSource, SearchRequest};
use ecowatch_core::news::fallback_articles;
use ecowatch_core::{AppConfig, Article, CacheEntry, CacheStore, Error, NEWS_CACHE_KEY};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{info, warn};

/// Query parameters and freshness window for the feed.
#[derive(Debug, Clone)]
pub struct NewsSettings {
    pub query: String,
    pub lang: String,
    pub max_articles: u8,
    pub ttl: Duration,
}

impl NewsSettings {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            query: config.news_query.clone(),
            lang: config.news_lang.clone(),
            max_articles: config.news_max_articles,
            ttl: config.news_ttl(),
        }
    }

    fn request(&self) -> SearchRequest {
        SearchRequest::new(&self.query, &self.lang, self.max_articles)
    }
}

/// What a reader of the feed sees.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsView {
    pub articles: Vec<Article>,
    /// True when served from a still-fresh cache entry.
    pub cached: bool,
    pub is_fallback: bool,
    pub generated_at: DateTime<Utc>,
    pub expires_in_secs: i64,
}

impl NewsView {
    fn from_entry(entry: CacheEntry, cached: bool, now: DateTime<Utc>) -> Self {
        let expires_in_secs = entry.expires_in_secs(now);
        Self {
            articles: entry.payload,
            cached,
            is_fallback: entry.is_fallback,
            generated_at: entry.generated_at,
            expires_in_secs,
        }
    }
}

impl From<CacheEntry> for NewsView {
    /// View of an entry that was just written.
    fn from(entry: CacheEntry) -> Self {
        let now = entry.generated_at;
        Self::from_entry(entry, false, now)
    }
}

/// Keeps the news cache entry populated.
#[derive(Clone)]
pub struct NewsRefresher {
    cache: Arc<dyn CacheStore>,
    source: Option<Arc<dyn NewsSource>>,
    settings: NewsSettings,
}

impl NewsRefresher {
    pub fn new(cache: Arc<dyn CacheStore>, source: Option<Arc<dyn NewsSource>>, settings: NewsSettings) -> Self {
        Self { cache, source, settings }
    }

    /// Whether a news provider is configured.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.settings.ttl
    }

    /// Fetch from the provider and overwrite the cache entry.
    ///
    /// Provider failures degrade to the fallback set; storage failures are returned.
    pub async fn refresh(&self) -> Result<CacheEntry, Error> {
        let (articles, is_fallback) = self.fetch().await;
        let ttl = chrono::Duration::from_std(self.settings.ttl)
            .map_err(|e| Error::InvalidInput(format!("news ttl out of range: {e}")))?;

        let entry = self.cache.write(NEWS_CACHE_KEY, &articles, ttl, is_fallback).await?;
        info!(
            articles = entry.payload.len(),
            is_fallback,
            expires_at = %entry.expires_at,
            "news cache refreshed"
        );
        Ok(entry)
    }

    /// Serve the feed, refreshing first when the entry is missing or stale.
    pub async fn read(&self) -> Result<NewsView, Error> {
        if let Some(entry) = self.cache.read(NEWS_CACHE_KEY).await?
            && entry.is_fresh()
        {
            tracing::debug!(generated_at = %entry.generated_at, "serving cached news");
            return Ok(NewsView::from_entry(entry, true, Utc::now()));
        }

        Ok(self.refresh().await?.into())
    }

    async fn fetch(&self) -> (Vec<Article>, bool) {
        let Some(source) = &self.source else {
            warn!("news provider not configured, using fallback articles");
            return (fallback_articles(), true);
        };

        match source.search(&self.settings.request()).await {
            Ok(articles) => (articles, false),
            Err(e) => {
                warn!(error = %e, "news provider failed, using fallback articles");
                (fallback_articles(), true)
            }
        }
    }
}
