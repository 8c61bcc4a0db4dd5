//! cache_stats tool implementation.

use dualsearch_client::SearchService;
use rmcp::{ErrorData as McpError, model::CallToolResult};

use crate::tools::json_result;

/// Backend kind, item count and hit/miss counters.
pub async fn stats_impl(service: &SearchService) -> Result<CallToolResult, McpError> {
    json_result(&service.cache_stats().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{items, json, service};
    use crate::tools::web_search::{WebSearchParams, web_search_impl};

    #[tokio::test]
    async fn test_stats_after_searches() {
        let service = service(Ok(items(2)));
        let params = WebSearchParams { query: "rust".into(), ..Default::default() };
        web_search_impl(&service, params.clone()).await.unwrap();
        web_search_impl(&service, params).await.unwrap();

        let value = json(&stats_impl(&service).await.unwrap());
        assert_eq!(value["backend"], "memory");
        assert_eq!(value["item_count"], 1);
        assert_eq!(value["hits"], 1);
        assert_eq!(value["misses"], 1);
        assert_eq!(value["writes"], 1);
        assert_eq!(value["backend_errors"], 0);
    }
}
