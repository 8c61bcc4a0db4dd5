//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (DUALSEARCH_*)
//! 2. TOML config file (if DUALSEARCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::query::{Mode, SearchLimits};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loaded once at startup and handed by reference to every component
/// constructor. Nothing reads the environment after this point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// RapidAPI key for the web search provider.
    ///
    /// Set via DUALSEARCH_RAPIDAPI_KEY environment variable.
    #[serde(default)]
    pub rapidapi_key: Option<String>,

    /// RapidAPI host identifier sent with every provider call.
    #[serde(default = "default_rapidapi_host")]
    pub rapidapi_host: String,

    /// Base URL of the provider; `/search` is appended.
    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,

    /// User-Agent string for provider requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upper bound on a single provider call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Delay before the single retry of a transient provider failure.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Redis connection URL. When absent the in-process cache is used.
    ///
    /// Set via DUALSEARCH_REDIS_URL environment variable.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// How long startup waits for Redis before falling back.
    #[serde(default = "default_redis_connect_timeout_ms")]
    pub redis_connect_timeout_ms: u64,

    /// Bound on every Redis command once connected. A command that runs
    /// past it counts as a connection failure.
    #[serde(default = "default_redis_op_timeout_ms")]
    pub redis_op_timeout_ms: u64,

    /// Page size used when a request does not name one.
    #[serde(default = "default_results_per_page")]
    pub results_per_page: u32,

    /// Ceiling for page size and the number of items asked of the provider.
    #[serde(default = "default_max_results_per_request")]
    pub max_results_per_request: u32,

    /// Longest accepted query, in characters.
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,

    /// Cache lifetime of job search envelopes.
    #[serde(default = "default_job_cache_ttl_secs")]
    pub job_cache_ttl_secs: u64,

    /// Cache lifetime of general search envelopes.
    #[serde(default = "default_general_cache_ttl_secs")]
    pub general_cache_ttl_secs: u64,

    /// Entry ceiling for the in-process cache backend.
    #[serde(default = "default_memory_max_entries")]
    pub memory_max_entries: usize,
}

fn default_rapidapi_host() -> String {
    "real-time-web-search.p.rapidapi.com".into()
}

fn default_provider_base_url() -> String {
    "https://real-time-web-search.p.rapidapi.com".into()
}

fn default_user_agent() -> String {
    "dualsearch/0.1".into()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_retry_backoff_ms() -> u64 {
    300
}

fn default_redis_connect_timeout_ms() -> u64 {
    2_000
}

fn default_redis_op_timeout_ms() -> u64 {
    500
}

fn default_results_per_page() -> u32 {
    15
}

fn default_max_results_per_request() -> u32 {
    100
}

fn default_max_query_chars() -> usize {
    400
}

fn default_job_cache_ttl_secs() -> u64 {
    3_600
}

fn default_general_cache_ttl_secs() -> u64 {
    1_800
}

fn default_memory_max_entries() -> usize {
    10_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rapidapi_key: None,
            rapidapi_host: default_rapidapi_host(),
            provider_base_url: default_provider_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            retry_backoff_ms: default_retry_backoff_ms(),
            redis_url: None,
            redis_connect_timeout_ms: default_redis_connect_timeout_ms(),
            redis_op_timeout_ms: default_redis_op_timeout_ms(),
            results_per_page: default_results_per_page(),
            max_results_per_request: default_max_results_per_request(),
            max_query_chars: default_max_query_chars(),
            job_cache_ttl_secs: default_job_cache_ttl_secs(),
            general_cache_ttl_secs: default_general_cache_ttl_secs(),
            memory_max_entries: default_memory_max_entries(),
        }
    }
}

impl AppConfig {
    /// Provider timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn redis_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_connect_timeout_ms)
    }

    pub fn redis_op_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_op_timeout_ms)
    }

    /// Limits applied by the query normalizer.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            default_page_size: self.results_per_page,
            max_page_size: self.max_results_per_request,
            fetch_limit: self.max_results_per_request,
            max_query_chars: self.max_query_chars,
        }
    }

    /// Cache TTL in seconds for envelopes of the given mode.
    pub fn ttl_for(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Job => self.job_cache_ttl_secs,
            Mode::General => self.general_cache_ttl_secs,
        }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `DUALSEARCH_`
    /// 2. TOML file from `DUALSEARCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed, or
    /// if validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("DUALSEARCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("DUALSEARCH_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Whether the provider has credentials to work with.
    pub fn provider_configured(&self) -> bool {
        self.rapidapi_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}
