//! In-process cache backend.
//!
//! Thread-safe via `DashMap`. Expired entries are evicted eagerly when a
//! `get()` touches them, and the map is bounded: once `max_entries` is
//! reached a write first purges expired entries, then evicts the oldest one.
//! Writes are serialized so the bound holds under concurrent writers; reads
//! never take the write lock.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::{BackendKind, CacheBackend, CacheEntry, CacheError};
use crate::query::CacheKey;

/// Per-process cache backend.
#[derive(Debug)]
pub struct MemoryBackend {
    entries: DashMap<String, Arc<CacheEntry>>,
    max_entries: usize,
    write_lock: Mutex<()>,
}

impl MemoryBackend {
    pub fn new(max_entries: usize) -> Self {
        Self { entries: DashMap::new(), max_entries: max_entries.max(1), write_lock: Mutex::new(()) }
    }

    fn remove_expired(&self) -> u64 {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before.saturating_sub(self.entries.len()) as u64
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|e| e.value().stored_at)
            .map(|e| e.key().clone());
        if let Some(key) = oldest {
            tracing::debug!(key = %key, "evicting oldest in-process cache entry");
            self.entries.remove(&key);
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let Some(entry) = self.entries.get(key.as_str()).map(|e| Arc::clone(e.value())) else {
            return Ok(None);
        };

        if entry.is_expired() {
            self.entries.remove_if(key.as_str(), |_, e| Arc::ptr_eq(e, &entry));
            return Ok(None);
        }

        Ok(Some(CacheEntry::clone(&entry)))
    }

    async fn set(&self, entry: CacheEntry) -> Result<(), CacheError> {
        let key = entry.key.as_str().to_string();
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.remove_expired();
            if self.entries.len() >= self.max_entries {
                self.evict_oldest();
            }
        }
        self.entries.insert(key, Arc::new(entry));
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> Result<bool, CacheError> {
        Ok(self.entries.remove(key.as_str()).is_some())
    }

    async fn clear_all(&self) -> Result<u64, CacheError> {
        let count = self.entries.len() as u64;
        self.entries.clear();
        Ok(count)
    }

    async fn count(&self) -> Result<u64, CacheError> {
        Ok(self.entries.len() as u64)
    }

    async fn purge_expired(&self) -> Result<u64, CacheError> {
        Ok(self.remove_expired())
    }
}
