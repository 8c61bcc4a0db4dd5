//! health tool implementation.

use dualsearch_client::SearchService;
use rmcp::{ErrorData as McpError, model::CallToolResult};

use super::json_result;

pub async fn health_impl(service: &SearchService) -> Result<CallToolResult, McpError> {
    json_result(&service.health().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{items, json, service};

    #[tokio::test]
    async fn test_health_report() {
        let service = service(Ok(items(1)));
        let value = json(&health_impl(&service).await.unwrap());
        assert_eq!(value["status"], "ok");
        assert_eq!(value["provider"], "fixed");
        assert_eq!(value["provider_configured"], true);
        assert_eq!(value["cache"]["backend"], "memory");
        assert_eq!(value["job_cache_ttl_secs"], 3600);
        assert_eq!(value["general_cache_ttl_secs"], 1800);
    }
}
