//! Cache entries.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::ResultEnvelope;
use crate::query::CacheKey;

/// A stored envelope with its expiry metadata.
///
/// Entries are immutable once stored; a newer write replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub payload: ResultEnvelope,
    pub stored_at: DateTime<Utc>,
    pub ttl_seconds: u64,
}

impl CacheEntry {
    /// Create an entry stored now.
    pub fn new(key: CacheKey, payload: ResultEnvelope, ttl_seconds: u64) -> Self {
        Self { key, payload, stored_at: Utc::now(), ttl_seconds }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        self.stored_at
            .checked_add_signed(Duration::try_seconds(ttl).unwrap_or(Duration::MAX))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// An entry stored at T with TTL S is expired at any time >= T+S.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Seconds left before expiry, rounded up; 0 once expired.
    pub fn remaining_ttl_secs(&self) -> u64 {
        let left = self.expires_at() - Utc::now();
        let millis = left.num_milliseconds();
        if millis <= 0 { 0 } else { (millis as u64).div_ceil(1000) }
    }
}
