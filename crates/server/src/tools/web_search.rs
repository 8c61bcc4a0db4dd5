//! web_search tool implementation.

use dualsearch_client::SearchService;
use dualsearch_core::RawSearch;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{SearchOutput, json_result};

/// Input parameters for the web_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// Search query (required).
    pub query: String,

    /// 1-based page number (default 1).
    #[serde(default)]
    pub page: Option<i64>,

    /// Results per page (default 15, capped at 100).
    #[serde(default)]
    pub page_size: Option<i64>,

    /// Force a refresh, bypassing the cache.
    #[serde(default)]
    pub force_refresh: bool,
}

impl From<WebSearchParams> for RawSearch {
    fn from(params: WebSearchParams) -> Self {
        let mut raw = RawSearch::new("general", params.query).force_refresh(params.force_refresh);
        if let Some(page) = params.page {
            raw = raw.page(page);
        }
        if let Some(size) = params.page_size {
            raw = raw.page_size(size);
        }
        raw
    }
}

/// Implementation of the web_search tool.
pub async fn web_search_impl(service: &SearchService, params: WebSearchParams) -> Result<CallToolResult, McpError> {
    let envelope = service.search(params.into()).await?;
    json_result(&SearchOutput::from(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{items, json, service};

    #[tokio::test]
    async fn test_web_search_pages() {
        let service = service(Ok(items(8)));
        let params = WebSearchParams { query: "rust async".into(), page: Some(2), page_size: Some(5), ..Default::default() };

        let value = json(&web_search_impl(&service, params).await.unwrap());
        assert_eq!(value["mode"], "general");
        assert_eq!(value["page"], 2);
        assert_eq!(value["items"].as_array().unwrap().len(), 3);
        assert_eq!(value["items"][0]["type"], "general");
        assert_eq!(value["items"][0]["url"], "https://jobs.example/6");
        assert_eq!(value["has_prev"], true);
        assert_eq!(value["has_next"], false);
    }

    #[tokio::test]
    async fn test_page_zero_is_invalid_params() {
        let service = service(Ok(items(1)));
        let params = WebSearchParams { query: "rust".into(), page: Some(0), ..Default::default() };
        let err = web_search_impl(&service, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_force_refresh_skips_cache() {
        let service = service(Ok(items(2)));
        let params = WebSearchParams { query: "rust".into(), ..Default::default() };
        web_search_impl(&service, params.clone()).await.unwrap();

        let refreshed = WebSearchParams { force_refresh: true, ..params };
        let value = json(&web_search_impl(&service, refreshed).await.unwrap());
        assert_eq!(value["served_from_cache"], false);
    }
}
