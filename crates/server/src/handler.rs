//! MCP server handler implementation.
//!
//! Routes tool calls to the implementations in [`crate::tools`], all sharing
//! one [`SearchService`].
use std::sync::Arc;

use crate::tools::cache::{CacheClearParams, clear_impl, stats_impl};
use crate::tools::health::health_impl;
use crate::tools::job_search::{JobSearchParams, job_search_impl};
use crate::tools::web_search::{WebSearchParams, web_search_impl};

use dualsearch_client::SearchService;
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

/// The main MCP server handler for dualsearch.
#[derive(Clone)]
pub struct DualSearchServer {
    service: Arc<SearchService>,
    tool_router: ToolRouter<Self>,
}

/// Tool router for the search and cache tools.
///
/// The `#[tool_router]` macro maps each tool name to the method below.
#[tool_router]
impl DualSearchServer {
    pub fn new(service: Arc<SearchService>) -> Self {
        Self { service, tool_router: Self::tool_router() }
    }

    /// Search job boards for listings.
    ///
    /// Filters on job type, remote, location and experience narrow the
    /// provider query and are part of the cache key.
    #[tool(
        description = "Search job boards (LinkedIn, Indeed, Glassdoor) for listings. Filter by job_type, remote, location or experience. Returns one page of listings with detected job type, remote flag and seniority."
    )]
    async fn job_search(&self, params: Parameters<JobSearchParams>) -> Result<CallToolResult, McpError> {
        job_search_impl(&self.service, params.0).await
    }

    /// General web search, one page of results at a time.
    #[tool(description = "General web search. Returns one page of results with title, URL, snippet and domain.")]
    async fn web_search(&self, params: Parameters<WebSearchParams>) -> Result<CallToolResult, McpError> {
        web_search_impl(&self.service, params.0).await
    }

    /// Cache backend name, entry count and counters.
    #[tool(description = "Show cache backend, entry count and hit/miss counters.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.service).await
    }

    /// Clear cached searches.
    ///
    /// Takes a single key, expired entries only, or everything.
    #[tool(description = "Remove a cached search by key, only expired entries, or everything.")]
    async fn cache_clear(&self, params: Parameters<CacheClearParams>) -> Result<CallToolResult, McpError> {
        clear_impl(&self.service, params.0).await
    }

    /// Service status with provider and cache state.
    #[tool(description = "Report service status, provider configuration and cache state.")]
    async fn health(&self) -> Result<CallToolResult, McpError> {
        health_impl(&self.service).await
    }
}

impl ServerHandler for DualSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "dualsearch".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Use job_search for job listings and web_search for general results. Results are cached; pass force_refresh to bypass.".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{items, service};

    #[test]
    fn test_all_tools_registered() {
        let server = DualSearchServer::new(service(Ok(items(1))));
        let mut names: Vec<String> = server.tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, ["cache_clear", "cache_stats", "health", "job_search", "web_search"]);
    }

    #[test]
    fn test_server_info() {
        let server = DualSearchServer::new(service(Ok(items(1))));
        let info = server.get_info();
        assert_eq!(info.server_info.name, "dualsearch");
        assert!(info.capabilities.tools.is_some());
    }
}
