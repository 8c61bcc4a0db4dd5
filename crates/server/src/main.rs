//! dualsearch server entry point.
//!
//! Boots the MCP server on stdio transport. Logging goes to stderr to avoid
//! interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use dualsearch_client::{RapidClient, SearchProvider, SearchService};
use dualsearch_core::{AppConfig, CacheStore};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    let provider = Arc::new(RapidClient::from_app_config(&config)?);
    if !provider.is_configured() {
        tracing::warn!("DUALSEARCH_RAPIDAPI_KEY is not set; searches will return unauthorized results");
    }

    let cache = CacheStore::connect(&config).await;
    let service = Arc::new(SearchService::new(&config, provider, cache));

    tracing::info!(
        backend = %service.cache().kind(),
        endpoint = %config.provider_base_url,
        "starting dualsearch server on stdio transport"
    );

    let handler = handler::DualSearchServer::new(service);
    let server = serve_server(handler, stdio()).await?;

    server.waiting().await?;

    Ok(())
}
