//! Cache key derivation.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::SearchRequest;

/// Prefix shared by every key this crate writes, used for scans and clears.
pub const KEY_PREFIX: &str = "dualsearch:";

/// Deterministic cache key for a normalized search request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a normalized request.
    ///
    /// The canonical form is `v1|mode|query|name=value;...|page|page_size`
    /// with filters in sorted-name order, hashed with SHA-256.
    pub fn for_request(request: &SearchRequest) -> Self {
        let filters = request
            .filters
            .sorted_pairs()
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(";");

        let mut hasher = Sha256::new();
        hasher.update(b"v1|");
        hasher.update(request.mode.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(request.query.as_bytes());
        hasher.update(b"|");
        hasher.update(filters.as_bytes());
        hasher.update(b"|");
        hasher.update(request.page.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(request.page_size.to_string().as_bytes());
        Self(format!("{KEY_PREFIX}{}", hex::encode(hasher.finalize())))
    }

    /// Wrap an existing key string, e.g. one echoed back by a caller.
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Mode, SearchFilters};

    fn request(mode: Mode, query: &str, page: u32) -> SearchRequest {
        SearchRequest {
            mode,
            query: query.into(),
            filters: SearchFilters::default(),
            page,
            page_size: 10,
            force_refresh: false,
        }
    }

    #[test]
    fn test_key_stability() {
        let a = CacheKey::for_request(&request(Mode::Job, "rust developer", 1));
        let b = CacheKey::for_request(&request(Mode::Job, "rust developer", 1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_format() {
        let key = CacheKey::for_request(&request(Mode::General, "rust", 1));
        let hash = key.as_str().strip_prefix(KEY_PREFIX).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_varies_by_mode_and_page() {
        let base = CacheKey::for_request(&request(Mode::Job, "rust", 1));
        assert_ne!(base, CacheKey::for_request(&request(Mode::General, "rust", 1)));
        assert_ne!(base, CacheKey::for_request(&request(Mode::Job, "rust", 2)));
    }

    #[test]
    fn test_key_varies_by_page_size() {
        let a = request(Mode::Job, "rust", 1);
        let b = SearchRequest { page_size: 20, ..a.clone() };
        assert_ne!(CacheKey::for_request(&a), CacheKey::for_request(&b));
    }

    #[test]
    fn test_force_refresh_does_not_change_key() {
        let a = request(Mode::Job, "rust", 1);
        let b = SearchRequest { force_refresh: true, ..a.clone() };
        assert_eq!(CacheKey::for_request(&a), CacheKey::for_request(&b));
    }
}
