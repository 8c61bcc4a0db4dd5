//! The search path: normalize, consult the cache, fetch, shape, store.
//!
//! `SearchService::search` only returns an error for invalid input. Provider
//! failures produce a degraded envelope and cache failures are absorbed by
//! [`CacheStore`], so a caller always has something to render.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dualsearch_core::query::normalize;
use dualsearch_core::{
    AppConfig, CacheStats, CacheStore, ClearScope, Error, NormalizedSearch, ProviderQuery, RawSearch,
    ResultEnvelope, SearchLimits,
};
use serde::Serialize;

use crate::provider::{ProviderError, RawResultItem, SearchProvider};
use crate::shape::shape;

/// Liveness and configuration summary.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: &'static str,
    pub provider_configured: bool,
    pub cache: CacheStats,
    pub results_per_page: u32,
    pub max_results_per_request: u32,
    pub job_cache_ttl_secs: u64,
    pub general_cache_ttl_secs: u64,
}

/// Orchestrates one search end to end.
///
/// Cheap to share behind an `Arc`; every field is either immutable or
/// internally synchronized.
pub struct SearchService {
    provider: Arc<dyn SearchProvider>,
    cache: CacheStore,
    limits: SearchLimits,
    retry_backoff: Duration,
    config: AppConfig,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("provider", &self.provider.name())
            .field("cache", &self.cache)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    pub fn new(config: &AppConfig, provider: Arc<dyn SearchProvider>, cache: CacheStore) -> Self {
        Self {
            provider,
            cache,
            limits: config.search_limits(),
            retry_backoff: config.retry_backoff(),
            config: config.clone(),
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Run one search.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` when the request fails normalization.
    /// Neither the cache nor the provider is touched in that case.
    pub async fn search(&self, raw: RawSearch) -> Result<ResultEnvelope, Error> {
        let NormalizedSearch { request, key, provider_query } = normalize(raw, &self.limits)?;

        if request.force_refresh {
            tracing::debug!(key = %key, "force_refresh set, skipping cache read");
        } else if let Some(entry) = self.cache.get(&key).await {
            let mut envelope = entry.payload;
            envelope.served_from_cache = true;
            return Ok(envelope);
        }

        let start = Instant::now();
        match self.fetch_with_retry(&provider_query).await {
            Ok(raw_items) => {
                let fetched = raw_items.len();
                let page = shape(request.mode, &raw_items, request.page, request.page_size);
                let envelope = ResultEnvelope::fresh(&request, &key, page.items, page.total);

                tracing::info!(
                    mode = %request.mode,
                    key = %key,
                    fetched,
                    total = page.total,
                    returned = envelope.items.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "search served from provider"
                );

                self.cache.set(&key, &envelope, self.config.ttl_for(request.mode)).await;
                Ok(envelope)
            }
            Err(err) => {
                tracing::warn!(mode = %request.mode, key = %key, kind = %err.kind(), error = %err, "search degraded");
                Ok(ResultEnvelope::degraded(&request, &key, err.kind()))
            }
        }
    }

    /// One attempt, plus a single retry after a fixed backoff for
    /// timeouts and upstream unavailability.
    async fn fetch_with_retry(&self, query: &ProviderQuery) -> Result<Vec<RawResultItem>, ProviderError> {
        match self.provider.fetch(query).await {
            Err(err) if err.kind().is_retryable() => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %err,
                    backoff_ms = self.retry_backoff.as_millis() as u64,
                    "provider fetch failed, retrying once"
                );
                tokio::time::sleep(self.retry_backoff).await;
                self.provider.fetch(query).await
            }
            other => other,
        }
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub async fn clear_cache(&self, scope: ClearScope) -> u64 {
        self.cache.clear(scope).await
    }

    pub async fn purge_expired(&self) -> u64 {
        self.cache.purge_expired().await
    }

    pub async fn health(&self) -> HealthReport {
        HealthReport {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            provider: self.provider.name(),
            provider_configured: self.provider.is_configured(),
            cache: self.cache.stats().await,
            results_per_page: self.config.results_per_page,
            max_results_per_request: self.config.max_results_per_request,
            job_cache_ttl_secs: self.config.job_cache_ttl_secs,
            general_cache_ttl_secs: self.config.general_cache_ttl_secs,
        }
    }
}
