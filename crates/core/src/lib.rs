//! Core types and shared functionality for dualsearch.
//!
//! This crate provides:
//! - Query normalization and cache key derivation
//! - The result envelope returned to callers
//! - A TTL cache with in-process and Redis backends
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod envelope;
pub mod error;
pub mod query;

pub use cache::{BackendKind, CacheEntry, CacheStats, CacheStore, ClearScope};
pub use config::{AppConfig, ConfigError};
pub use envelope::{JobListing, ResultEnvelope, ResultRecord, WebResult};
pub use error::{CacheError, Error, ProviderErrorKind, ValidationError};
pub use query::{CacheKey, ExperienceLevel, JobType, Mode, NormalizedSearch, ProviderQuery, RawSearch, SearchLimits, SearchRequest};
