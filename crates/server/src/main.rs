//! ecowatch-mcp server entry point.
//!
//! Boots the MCP server on stdio transport with the news scheduler running
//! alongside it. Logging goes to stderr to avoid interfering with the
//! JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use ecowatch_core::AppConfig;
use ecowatch_jobs::Services;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let services = Arc::new(Services::open(config).await?);
    tracing::info!(db_path = %services.config.db_path.display(), "starting ecowatch-mcp on stdio transport");

    let scheduler = services.scheduler().start();

    let handler = handler::EcoWatchServer::new(services.clone());
    let server = serve_server(handler, stdio()).await?;
    let result = server.waiting().await;

    scheduler.stop().await;
    result?;

    Ok(())
}
