//! cache_clear tool implementation.
//!
//! Removes one entry by key, every entry, or only the expired ones.

use dualsearch_client::SearchService;
use dualsearch_core::{CacheKey, ClearScope};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Parameters for the cache_clear tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheClearParams {
    /// Cache key to remove, as reported in a search result's `cache_key`.
    /// Omit to clear everything.
    #[serde(default)]
    pub key: Option<String>,

    /// Only drop entries whose TTL has elapsed. Ignored when `key` is set.
    #[serde(default)]
    pub expired_only: bool,
}

/// Output from the cache_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheClearOutput {
    pub removed: u64,
}

pub async fn clear_impl(service: &SearchService, params: CacheClearParams) -> Result<CallToolResult, McpError> {
    let removed = match params.key {
        Some(key) => service.clear_cache(ClearScope::Key(CacheKey::from_raw(key.trim()))).await,
        None if params.expired_only => service.purge_expired().await,
        None => service.clear_cache(ClearScope::All).await,
    };

    json_result(&CacheClearOutput { removed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{items, json, service};
    use crate::tools::web_search::{WebSearchParams, web_search_impl};

    async fn seed(service: &SearchService, query: &str) -> String {
        let params = WebSearchParams { query: query.into(), ..Default::default() };
        let value = json(&web_search_impl(service, params).await.unwrap());
        value["cache_key"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_clear_by_key() {
        let service = service(Ok(items(2)));
        let key = seed(&service, "rust").await;
        seed(&service, "tokio").await;

        let params = CacheClearParams { key: Some(key.clone()), ..Default::default() };
        let value = json(&clear_impl(&service, params).await.unwrap());
        assert_eq!(value["removed"], 1);

        let params = CacheClearParams { key: Some(key), ..Default::default() };
        let value = json(&clear_impl(&service, params).await.unwrap());
        assert_eq!(value["removed"], 0);

        assert_eq!(service.cache_stats().await.item_count, Some(1));
    }

    #[tokio::test]
    async fn test_clear_all() {
        let service = service(Ok(items(2)));
        seed(&service, "rust").await;
        seed(&service, "tokio").await;

        let value = json(&clear_impl(&service, CacheClearParams::default()).await.unwrap());
        assert_eq!(value["removed"], 2);
        assert_eq!(service.cache_stats().await.item_count, Some(0));
    }

    #[tokio::test]
    async fn test_expired_only_keeps_live_entries() {
        let service = service(Ok(items(2)));
        seed(&service, "rust").await;

        let params = CacheClearParams { expired_only: true, ..Default::default() };
        let value = json(&clear_impl(&service, params).await.unwrap());
        assert_eq!(value["removed"], 0);
        assert_eq!(service.cache_stats().await.item_count, Some(1));
    }
}
