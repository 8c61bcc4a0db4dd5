//! RapidAPI real-time web search client.
//!
//! - **Endpoint**: `GET {base_url}/search?q=<text>&limit=<n>`
//! - **Authentication**: `X-RapidAPI-Key` and `X-RapidAPI-Host` headers.
//! - **Failures**: mapped onto [`ProviderError`]. The client never retries;
//!   that is left to the search service.

pub mod response;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dualsearch_core::{AppConfig, ConfigError, ProviderQuery};
use reqwest::{StatusCode, header};
use url::Url;

use crate::provider::{ProviderError, RawResultItem, SearchProvider};

/// RapidAPI client configuration.
#[derive(Debug, Clone)]
pub struct RapidConfig {
    /// Key from `DUALSEARCH_RAPIDAPI_KEY`; fetches fail as unauthorized without it.
    pub api_key: Option<String>,
    pub host: String,
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl From<&AppConfig> for RapidConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_key: config.rapidapi_key.clone().filter(|k| !k.trim().is_empty()),
            host: config.rapidapi_host.clone(),
            base_url: config.provider_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for RapidConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// RapidAPI search client.
#[derive(Debug, Clone)]
pub struct RapidClient {
    http: reqwest::Client,
    endpoint: Url,
    config: RapidConfig,
}

impl RapidClient {
    /// Create a client.
    ///
    /// A missing API key is not an error here; it surfaces per request as
    /// `Unauthorized` so the server can still start and report health.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the base URL does not parse or the
    /// HTTP client cannot be built.
    pub fn new(config: RapidConfig) -> Result<Self, ConfigError> {
        let base = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let endpoint = Url::parse(&base)
            .and_then(|u| u.join("search"))
            .map_err(|e| ConfigError::Invalid { field: "provider_base_url".into(), reason: e.to_string() })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::Invalid { field: "provider".into(), reason: e.to_string() })?;

        Ok(Self { http, endpoint, config })
    }

    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::new(RapidConfig::from(config))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn status_error(status: StatusCode) -> Option<ProviderError> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Some(ProviderError::Unauthorized(format!("provider rejected credentials ({status})")))
        }
        StatusCode::TOO_MANY_REQUESTS => Some(ProviderError::QuotaExceeded),
        s if !s.is_success() => Some(ProviderError::UpstreamUnavailable(format!("HTTP {}", s.as_u16()))),
        _ => None,
    }
}

#[async_trait]
impl SearchProvider for RapidClient {
    fn name(&self) -> &'static str {
        "rapidapi"
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<RawResultItem>, ProviderError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(ProviderError::Unauthorized("no API key configured".into()));
        };

        let start = Instant::now();
        tracing::debug!(q = %query.q, limit = query.limit, "querying provider");

        let response = self
            .http
            .get(self.endpoint.clone())
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.config.host)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, "provider response status");
        if let Some(err) = status_error(status) {
            return Err(err);
        }

        let body = response.bytes().await?;
        let items = response::parse(&body)?;

        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, items = items.len(), "provider fetch completed");
        Ok(items)
    }
}
