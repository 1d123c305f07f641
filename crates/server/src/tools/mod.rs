//! MCP tool implementations.
//!
//! Each tool returns its output as pretty-printed JSON text content.

pub mod ask;
pub mod impact;
pub mod news;

pub use ask::{AskParams, ask_impl};
pub use impact::{ImpactAnalyzeParams, ImpactGenerateParams, analyze_impl, generate_impl};
pub use news::{news_get_impl, news_refresh_impl};

use ecowatch_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output).map_err(Error::from)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
