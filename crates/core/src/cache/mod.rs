//! Search result cache with interchangeable backends.
//!
//! This module provides a TTL cache for result envelopes. It supports:
//!
//! - An in-process backend (`DashMap`) for single-process deployments
//! - A Redis backend shared by every worker process
//! - Backend selection once at startup, falling back to in-process when
//!   Redis is not configured or unreachable
//! - Failure absorption: backend errors become misses or no-ops and are
//!   only visible through [`CacheStats`]

pub mod backend;
pub mod entry;
pub mod memory;
pub mod redis;
pub mod store;

pub use crate::error::CacheError;

pub use backend::{BackendKind, CacheBackend};
pub use entry::CacheEntry;
pub use memory::MemoryBackend;
pub use self::redis::RedisBackend;
pub use store::{CacheStats, CacheStore, ClearScope};
