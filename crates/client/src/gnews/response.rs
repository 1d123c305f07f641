//! GNews API response types and normalization.

use ecowatch_core::news::DEFAULT_ARTICLE_IMAGE;
use ecowatch_core::{Article, ArticleSource};
use serde::Deserialize;

/// Raw response from the GNews search endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GNewsApiResponse {
    #[serde(default)]
    pub total_articles: u64,
    pub articles: Vec<GNewsArticle>,
}

/// Individual article from GNews. Any field may be null upstream.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GNewsArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<GNewsSource>,
}

#[derive(Debug, Deserialize)]
pub struct GNewsSource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Error body returned with non-2xx statuses.
///
/// `errors` is either a list of messages or a map of field to message.
#[derive(Debug, Deserialize)]
pub struct GNewsErrorBody {
    pub errors: serde_json::Value,
}

impl GNewsErrorBody {
    pub fn message(&self) -> String {
        match &self.errors {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| format!("{k}: {}", v.as_str().unwrap_or_default()))
                .collect::<Vec<_>>()
                .join("; "),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<GNewsArticle> for Article {
    /// Normalize a GNews article, substituting the stock image when none is given.
    fn from(raw: GNewsArticle) -> Self {
        let source = raw.source.unwrap_or(GNewsSource { name: None, url: None });
        Article {
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            image: raw
                .image
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ARTICLE_IMAGE.to_string()),
            source: ArticleSource { name: source.name.unwrap_or_default(), url: source.url },
            published_at: raw.published_at.unwrap_or_default(),
            content: raw.content.unwrap_or_default(),
        }
    }
}

impl GNewsApiResponse {
    pub fn into_articles(self) -> Vec<Article> {
        self.articles.into_iter().map(Article::from).collect()
    }
}
