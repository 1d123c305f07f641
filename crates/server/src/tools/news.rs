//! news_get and news_refresh tools.

use ecowatch_jobs::{NewsRefresher, NewsView};
use rmcp::{ErrorData as McpError, model::CallToolResult};

use super::json_result;

/// Serve the cached feed, refreshing it first when stale.
pub async fn news_get_impl(news: &NewsRefresher) -> Result<CallToolResult, McpError> {
    let view = news.read().await?;
    json_result(&view)
}

/// Refresh the feed regardless of freshness.
pub async fn news_refresh_impl(news: &NewsRefresher) -> Result<CallToolResult, McpError> {
    let view: NewsView = news.refresh().await?.into();
    json_result(&view)
}
