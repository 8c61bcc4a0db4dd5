//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `redis_op_timeout_ms` is 0 or exceeds 60 seconds
    /// - `results_per_page` is 0 or above `max_results_per_request`
    /// - `max_results_per_request` is 0 or above 1000
    /// - either cache TTL is 0
    /// - `memory_max_entries` is 0
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.redis_op_timeout_ms == 0 {
            return Err(invalid("redis_op_timeout_ms", "must be greater than 0"));
        }
        if self.redis_op_timeout_ms > 60_000 {
            return Err(invalid("redis_op_timeout_ms", "must not exceed 60000ms"));
        }

        if self.max_results_per_request == 0 {
            return Err(invalid("max_results_per_request", "must be greater than 0"));
        }
        if self.max_results_per_request > 1_000 {
            return Err(invalid("max_results_per_request", "must not exceed 1000"));
        }

        if self.results_per_page == 0 {
            return Err(invalid("results_per_page", "must be greater than 0"));
        }
        if self.results_per_page > self.max_results_per_request {
            return Err(invalid("results_per_page", "must not exceed max_results_per_request"));
        }

        if self.job_cache_ttl_secs == 0 {
            return Err(invalid("job_cache_ttl_secs", "must be greater than 0"));
        }
        if self.general_cache_ttl_secs == 0 {
            return Err(invalid("general_cache_ttl_secs", "must be greater than 0"));
        }

        if self.memory_max_entries == 0 {
            return Err(invalid("memory_max_entries", "must be greater than 0"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if self.general_cache_ttl_secs > self.job_cache_ttl_secs {
            tracing::warn!(
                job_ttl = self.job_cache_ttl_secs,
                general_ttl = self.general_cache_ttl_secs,
                "general results outlive job results in the cache"
            );
        }

        Ok(())
    }
}
