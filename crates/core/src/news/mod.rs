//! News article types and the cached news entry.

pub mod fallback;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub use fallback::fallback_articles;

use crate::Error;

/// Cache key under which the environmental news feed is stored.
pub const NEWS_CACHE_KEY: &str = "news";

/// Image used for articles whose source did not provide one.
pub const DEFAULT_ARTICLE_IMAGE: &str =
    "https://images.unsplash.com/photo-1611273426858-450d8e3c9fce?auto=format&fit=crop&w=800&q=80";

/// Publisher of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ArticleSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Normalized news article as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub source: ArticleSource,
    pub published_at: String,
    pub content: String,
}

/// One named cached payload plus its freshness metadata.
///
/// Entries are always replaced wholesale; `expires_at` is strictly after
/// `generated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub key: String,
    pub payload: Vec<Article>,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_fallback: bool,
}

impl CacheEntry {
    /// Build an entry generated at `now` that lives for `ttl`.
    ///
    /// Fails with `InvalidInput` when the expiry falls outside the representable range.
    pub fn new(
        key: &str, payload: Vec<Article>, now: DateTime<Utc>, ttl: Duration, is_fallback: bool,
    ) -> Result<Self, Error> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::InvalidInput(format!("cache ttl too large: {ttl}")))?;
        Ok(Self { key: key.to_string(), payload, generated_at: now, expires_at, is_fallback })
    }

    /// Whether the entry is still fresh at the current instant.
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }

    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Whole seconds until expiry, clamped at zero.
    pub fn expires_in_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: "desc".to_string(),
            url: "https://example.com".to_string(),
            image: DEFAULT_ARTICLE_IMAGE.to_string(),
            source: ArticleSource { name: "Example".to_string(), url: None },
            published_at: "2025-01-01T00:00:00Z".to_string(),
            content: "content".to_string(),
        }
    }

    #[test]
    fn test_entry_expiry_window() {
        let now = Utc::now();
        let entry = CacheEntry::new(NEWS_CACHE_KEY, vec![article("a")], now, Duration::seconds(1800), false).unwrap();

        assert_eq!(entry.expires_at - entry.generated_at, Duration::seconds(1800));
        assert!(entry.is_fresh_at(now));
        assert!(entry.is_fresh_at(now + Duration::seconds(1799)));
        assert!(!entry.is_fresh_at(now + Duration::seconds(1800)));
        assert!(!entry.is_fresh_at(now + Duration::seconds(3600)));
    }

    #[test]
    fn test_expires_in_secs_clamps() {
        let now = Utc::now();
        let entry = CacheEntry::new(NEWS_CACHE_KEY, vec![], now, Duration::seconds(60), false).unwrap();
        assert_eq!(entry.expires_in_secs(now), 60);
        assert_eq!(entry.expires_in_secs(now + Duration::seconds(120)), 0);
    }

    #[test]
    fn test_entry_rejects_unrepresentable_expiry() {
        let result = CacheEntry::new(NEWS_CACHE_KEY, vec![], Utc::now(), Duration::seconds(10_000_000_000_000), false);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let json = serde_json::to_value(article("a")).unwrap();
        assert!(json.get("publishedAt").is_some());
        assert!(json["source"].get("url").is_none());
    }
}
