//! MCP tool implementations.
//!
//! Each tool is a params struct plus an `*_impl` function that takes the
//! shared [`SearchService`](dualsearch_client::SearchService).

pub mod cache;
pub mod health;
pub mod job_search;
pub mod web_search;

use dualsearch_core::{Error, ResultEnvelope};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Envelope as rendered to a tool caller, with the pagination helpers and
/// the user-facing message filled in.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutput {
    #[serde(flatten)]
    pub envelope: ResultEnvelope,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<ResultEnvelope> for SearchOutput {
    fn from(envelope: ResultEnvelope) -> Self {
        Self {
            total_pages: envelope.total_pages(),
            has_next: envelope.has_next(),
            has_prev: envelope.has_prev(),
            message: envelope.error_message(),
            envelope,
        }
    }
}

/// Pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::Serialize(e.to_string()))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use dualsearch_client::{ProviderError, RawResultItem, SearchProvider, SearchService};
    use dualsearch_core::{AppConfig, CacheStore, ProviderQuery};
    use rmcp::model::CallToolResult;

    /// Provider answering every fetch with the same result.
    pub struct FixedProvider(pub Result<Vec<RawResultItem>, ProviderError>);

    #[async_trait]
    impl SearchProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch(&self, _query: &ProviderQuery) -> Result<Vec<RawResultItem>, ProviderError> {
            self.0.clone()
        }
    }

    pub fn items(n: usize) -> Vec<RawResultItem> {
        (1..=n)
            .map(|i| RawResultItem {
                title: Some(format!("Rust Engineer {i}")),
                url: Some(format!("https://jobs.example/{i}")),
                snippet: Some("Remote contract role".into()),
                ..Default::default()
            })
            .collect()
    }

    pub fn service(result: Result<Vec<RawResultItem>, ProviderError>) -> Arc<SearchService> {
        let config = AppConfig { retry_backoff_ms: 1, ..Default::default() };
        Arc::new(SearchService::new(&config, Arc::new(FixedProvider(result)), CacheStore::in_memory(100)))
    }

    /// Parse the first text content of a tool result as JSON.
    pub fn json(result: &CallToolResult) -> serde_json::Value {
        let content = serde_json::to_value(&result.content[0]).unwrap();
        let text = content.get("text").and_then(|v| v.as_str()).expect("Expected text field in content");
        serde_json::from_str(text).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualsearch_core::query::SearchFilters;
    use dualsearch_core::{CacheKey, Mode, ProviderErrorKind, SearchRequest};

    fn request() -> SearchRequest {
        SearchRequest {
            mode: Mode::General,
            query: "rust".into(),
            filters: SearchFilters::default(),
            page: 1,
            page_size: 10,
            force_refresh: false,
        }
    }

    #[test]
    fn test_degraded_output_carries_message() {
        let req = request();
        let key = CacheKey::for_request(&req);
        let output = SearchOutput::from(ResultEnvelope::degraded(&req, &key, ProviderErrorKind::QuotaExceeded));
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["error"], "quota_exceeded");
        assert_eq!(value["message"], "Search limit reached. Please try again later.");
        assert_eq!(value["total_pages"], 1);
        assert_eq!(value["has_next"], false);
        assert!(value["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_fresh_output_omits_message() {
        let req = request();
        let key = CacheKey::for_request(&req);
        let output = SearchOutput::from(ResultEnvelope::fresh(&req, &key, Vec::new(), 25));
        let value = serde_json::to_value(&output).unwrap();
        assert!(value.get("message").is_none());
        assert!(value.get("error").is_none());
        assert_eq!(value["total_pages"], 3);
        assert_eq!(value["has_next"], true);
        assert_eq!(value["mode"], "general");
    }
}
