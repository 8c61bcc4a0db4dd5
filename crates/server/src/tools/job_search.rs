//! job_search tool implementation.
//!
//! Searches job boards through the provider and returns one page of job
//! listings, served from cache when a live entry exists.

use dualsearch_client::SearchService;
use dualsearch_core::RawSearch;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{SearchOutput, json_result};

/// Input parameters for the job_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct JobSearchParams {
    /// Job title, skills or keywords (required).
    pub query: String,

    /// 1-based page number (default 1).
    #[serde(default)]
    pub page: Option<i64>,

    /// Results per page (default 15, capped at 100).
    #[serde(default)]
    pub page_size: Option<i64>,

    /// Employment type: full-time, part-time, contract, internship, or remote.
    #[serde(default)]
    pub job_type: Option<String>,

    /// Only remote positions.
    #[serde(default)]
    pub remote: Option<bool>,

    /// City, region or country.
    #[serde(default)]
    pub location: Option<String>,

    /// Seniority: entry, mid, senior, or executive.
    #[serde(default)]
    pub experience: Option<String>,

    /// Force a refresh, bypassing the cache.
    #[serde(default)]
    pub force_refresh: bool,
}

impl From<JobSearchParams> for RawSearch {
    fn from(params: JobSearchParams) -> Self {
        let mut raw = RawSearch::new("job", params.query).force_refresh(params.force_refresh);
        if let Some(page) = params.page {
            raw = raw.page(page);
        }
        if let Some(size) = params.page_size {
            raw = raw.page_size(size);
        }
        if let Some(job_type) = params.job_type {
            raw = raw.filter("job_type", job_type);
        }
        if let Some(remote) = params.remote {
            raw = raw.filter("remote", remote.to_string());
        }
        if let Some(location) = params.location {
            raw = raw.filter("location", location);
        }
        if let Some(experience) = params.experience {
            raw = raw.filter("experience", experience);
        }
        raw
    }
}

/// Implementation of the job_search tool.
pub async fn job_search_impl(service: &SearchService, params: JobSearchParams) -> Result<CallToolResult, McpError> {
    let envelope = service.search(params.into()).await?;
    json_result(&SearchOutput::from(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{items, json, service};
    use dualsearch_client::ProviderError;

    #[tokio::test]
    async fn test_job_search_returns_listings() {
        let service = service(Ok(items(12)));
        let params = JobSearchParams { query: "rust engineer".into(), page_size: Some(5), ..Default::default() };

        let result = job_search_impl(&service, params).await.unwrap();
        let value = json(&result);
        assert_eq!(value["mode"], "job");
        assert_eq!(value["items"].as_array().unwrap().len(), 5);
        assert_eq!(value["items"][0]["type"], "job");
        assert_eq!(value["items"][0]["job_type"], "contract");
        assert_eq!(value["items"][0]["remote"], true);
        assert_eq!(value["total_estimated"], 12);
        assert_eq!(value["total_pages"], 3);
        assert_eq!(value["served_from_cache"], false);
    }

    #[tokio::test]
    async fn test_second_call_served_from_cache() {
        let service = service(Ok(items(3)));
        let params = JobSearchParams { query: "rust".into(), remote: Some(true), ..Default::default() };

        job_search_impl(&service, params.clone()).await.unwrap();
        let value = json(&job_search_impl(&service, params).await.unwrap());
        assert_eq!(value["served_from_cache"], true);
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid_params() {
        let service = service(Ok(items(3)));
        let err = job_search_impl(&service, JobSearchParams::default()).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_unknown_job_type_is_invalid_params() {
        let service = service(Ok(items(3)));
        let params = JobSearchParams { query: "rust".into(), job_type: Some("gig".into()), ..Default::default() };
        let err = job_search_impl(&service, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_experience_is_part_of_the_cache_key() {
        let service = service(Ok(items(3)));
        let senior = JobSearchParams { query: "rust".into(), experience: Some("Senior".into()), ..Default::default() };
        let entry = JobSearchParams { query: "rust".into(), experience: Some("junior".into()), ..Default::default() };

        let first = json(&job_search_impl(&service, senior.clone()).await.unwrap());
        let other = json(&job_search_impl(&service, entry).await.unwrap());
        assert_eq!(other["served_from_cache"], false);
        assert_ne!(first["cache_key"], other["cache_key"]);

        let again = json(&job_search_impl(&service, senior).await.unwrap());
        assert_eq!(again["served_from_cache"], true);
    }

    #[tokio::test]
    async fn test_unknown_experience_is_invalid_params() {
        let service = service(Ok(items(3)));
        let params = JobSearchParams { query: "rust".into(), experience: Some("guru".into()), ..Default::default() };
        let err = job_search_impl(&service, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_conflicting_remote_filters_rejected() {
        let service = service(Ok(items(3)));
        let params = JobSearchParams {
            query: "rust".into(),
            job_type: Some("remote".into()),
            remote: Some(false),
            ..Default::default()
        };
        let err = job_search_impl(&service, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_a_tool_error() {
        let service = service(Err(ProviderError::Unauthorized("no API key configured".into())));
        let params = JobSearchParams { query: "rust".into(), ..Default::default() };

        let value = json(&job_search_impl(&service, params).await.unwrap());
        assert_eq!(value["error"], "unauthorized");
        assert!(value["message"].is_string());
        assert!(value["items"].as_array().unwrap().is_empty());
    }
}
