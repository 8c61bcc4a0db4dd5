//! The capability set every cache backend provides.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CacheEntry, CacheError};
use crate::query::CacheKey;

/// Which backend is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    Redis,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Memory => f.write_str("memory"),
            BackendKind::Redis => f.write_str("redis"),
        }
    }
}

/// A key-value store for cache entries with time-based expiry.
///
/// Implementations report failures honestly; `CacheStore` decides what a
/// failure means for the caller.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Fetch a live entry. Expired entries are removed and reported absent.
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError>;

    /// Store an entry, replacing any previous one under the same key.
    async fn set(&self, entry: CacheEntry) -> Result<(), CacheError>;

    /// Remove one entry. Returns whether it existed.
    async fn remove(&self, key: &CacheKey) -> Result<bool, CacheError>;

    /// Remove every entry this crate owns. Returns the number removed.
    async fn clear_all(&self) -> Result<u64, CacheError>;

    /// Number of stored entries, possibly including expired ones.
    async fn count(&self) -> Result<u64, CacheError>;

    /// Drop expired entries. Returns the number removed.
    async fn purge_expired(&self) -> Result<u64, CacheError>;
}
