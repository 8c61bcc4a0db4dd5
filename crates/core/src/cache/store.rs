//! The cache façade the search path talks to.
//!
//! `CacheStore` never returns an error. A failed `get` is a miss, a failed
//! `set` is a no-op, and both are counted in [`CacheStats::backend_errors`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::{BackendKind, CacheBackend, CacheEntry, MemoryBackend, RedisBackend};
use crate::config::AppConfig;
use crate::envelope::ResultEnvelope;
use crate::query::CacheKey;

/// What `clear` removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearScope {
    Key(CacheKey),
    All,
}

/// Diagnostics snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub backend: BackendKind,
    /// `None` when the backend could not be asked.
    pub item_count: Option<u64>,
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub backend_errors: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    backend_errors: AtomicU64,
}

/// Cache handle shared by concurrent requests.
#[derive(Clone)]
pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
    counters: Arc<Counters>,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("backend", &self.backend.kind())
            .field("counters", &self.counters)
            .finish()
    }
}

impl CacheStore {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend, counters: Arc::new(Counters::default()) }
    }

    /// In-process store, used directly in tests and as the fallback.
    pub fn in_memory(max_entries: usize) -> Self {
        Self::new(Arc::new(MemoryBackend::new(max_entries)))
    }

    /// Select the backend once, at startup.
    ///
    /// Uses Redis when `redis_url` is set and the server answers in time;
    /// otherwise the in-process backend.
    pub async fn connect(config: &AppConfig) -> Self {
        let Some(url) = config.redis_url.as_deref().filter(|u| !u.trim().is_empty()) else {
            tracing::info!(backend = %BackendKind::Memory, "no redis_url configured, using in-process cache");
            return Self::in_memory(config.memory_max_entries);
        };

        match RedisBackend::connect(url, config.redis_connect_timeout(), config.redis_op_timeout()).await {
            Ok(backend) => {
                tracing::info!(backend = %BackendKind::Redis, "redis cache connected");
                Self::new(Arc::new(backend))
            }
            Err(e) => {
                tracing::warn!(error = %e, "redis unavailable, falling back to in-process cache");
                Self::in_memory(config.memory_max_entries)
            }
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    fn record_error(&self, op: &str, error: &super::CacheError) {
        self.counters.backend_errors.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(op, backend = %self.backend.kind(), error = %error, "cache backend error absorbed");
    }

    /// Look up a live entry. Backend failures read as a miss.
    pub async fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let found = match self.backend.get(key).await {
            Ok(found) => found,
            Err(e) => {
                self.record_error("get", &e);
                None
            }
        };

        if found.is_some() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key = %key, "cache hit");
        } else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key = %key, "cache miss");
        }
        found
    }

    /// Store an envelope. Backend failures are dropped.
    pub async fn set(&self, key: &CacheKey, payload: &ResultEnvelope, ttl_seconds: u64) {
        let entry = CacheEntry::new(key.clone(), payload.clone(), ttl_seconds);
        match self.backend.set(entry).await {
            Ok(()) => {
                self.counters.writes.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => self.record_error("set", &e),
        }
    }

    /// Remove one entry or all of them. Returns how many were removed.
    pub async fn clear(&self, scope: ClearScope) -> u64 {
        let result = match &scope {
            ClearScope::Key(key) => self.backend.remove(key).await.map(u64::from),
            ClearScope::All => self.backend.clear_all().await,
        };
        match result {
            Ok(removed) => {
                tracing::info!(?scope, removed, "cache cleared");
                removed
            }
            Err(e) => {
                self.record_error("clear", &e);
                0
            }
        }
    }

    /// Drop expired entries. Returns how many were removed.
    pub async fn purge_expired(&self) -> u64 {
        match self.backend.purge_expired().await {
            Ok(removed) => removed,
            Err(e) => {
                self.record_error("purge_expired", &e);
                0
            }
        }
    }

    pub async fn stats(&self) -> CacheStats {
        let item_count = match self.backend.count().await {
            Ok(count) => Some(count),
            Err(e) => {
                self.record_error("count", &e);
                None
            }
        };

        CacheStats {
            backend: self.backend.kind(),
            item_count,
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            writes: self.counters.writes.load(Ordering::Relaxed),
            backend_errors: self.counters.backend_errors.load(Ordering::Relaxed),
        }
    }
}
