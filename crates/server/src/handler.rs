//! MCP server handler implementation.
//!
//! Routes tool calls to the news, enrichment and analysis operations.
use crate::tools::{
    AskParams, ImpactAnalyzeParams, ImpactGenerateParams, analyze_impl, ask_impl, generate_impl, news_get_impl,
    news_refresh_impl,
};

use ecowatch_jobs::Services;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use std::sync::Arc;

/// The ecowatch MCP server handler.
#[derive(Clone)]
pub struct EcoWatchServer {
    services: Arc<Services>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl EcoWatchServer {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services, tool_router: Self::tool_router() }
    }

    #[tool(
        description = "Get the cached environmental news feed. Refreshes from the news provider when the cache is missing or stale; returns fallback articles when the provider is unavailable."
    )]
    async fn news_get(&self) -> Result<CallToolResult, McpError> {
        news_get_impl(self.services.news()).await
    }

    #[tool(description = "Refresh the environmental news cache now, regardless of freshness.")]
    async fn news_refresh(&self) -> Result<CallToolResult, McpError> {
        news_refresh_impl(self.services.news()).await
    }

    /// Runs the whole batch before returning; with the default 2s pacing
    /// this takes roughly two seconds per zone needing generation.
    #[tool(
        description = "Generate impact analyses for all zones that lack one and store them. Set force to regenerate existing analyses. Returns run counters."
    )]
    async fn impact_generate(&self, params: Parameters<ImpactGenerateParams>) -> Result<CallToolResult, McpError> {
        generate_impl(&self.services, params.0).await
    }

    #[tool(description = "Produce a short HTML impact analysis for one zone without storing it.")]
    async fn impact_analyze(&self, params: Parameters<ImpactAnalyzeParams>) -> Result<CallToolResult, McpError> {
        analyze_impl(&self.services, params.0).await
    }

    #[tool(description = "Answer an environmental science question in 2-3 sentences of HTML.")]
    async fn ask(&self, params: Parameters<AskParams>) -> Result<CallToolResult, McpError> {
        ask_impl(&self.services, params.0).await
    }
}

impl ServerHandler for EcoWatchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "ecowatch".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Environmental news and risk-zone impact analysis. Analyses are returned as HTML fragments.".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
