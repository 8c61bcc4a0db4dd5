//! Unified error types for dualsearch.
//!
//! Only validation failures are ever returned to a caller of the search path.
//! Cache failures are absorbed by `CacheStore` and provider failures become an
//! annotation on a degraded envelope.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Unified error type for dualsearch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request failed normalization.
    #[error("INVALID_INPUT: {0}")]
    Validation(#[from] ValidationError),

    /// A cache backend operation failed.
    #[error("CACHE_ERROR: {0}")]
    Cache(#[from] CacheError),

    /// Configuration could not be loaded or is invalid.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    /// Output could not be serialized.
    #[error("SERIALIZE_FAILED: {0}")]
    Serialize(String),
}

/// Rejections produced while normalizing a raw search request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("query too long: {len} chars (max {max})")]
    QueryTooLong { len: usize, max: usize },

    #[error("page must be a positive integer, got {0}")]
    InvalidPage(i64),

    #[error("unknown search mode: {0}")]
    UnknownMode(String),

    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    #[error("filter given more than once: {0}")]
    DuplicateFilter(String),

    #[error("invalid value for filter {name}: {value}")]
    InvalidFilterValue { name: String, value: String },
}

/// Errors raised by a cache backend.
///
/// These never leave `CacheStore`; they are logged and counted in its stats.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("command failed: {0}")]
    Command(String),

    #[error("entry could not be encoded or decoded: {0}")]
    Codec(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout() || err.is_io_error() {
            CacheError::Connection(err.to_string())
        } else {
            CacheError::Command(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Codec(err.to_string())
    }
}

/// Classification of an upstream provider failure.
///
/// This is the only part of a provider error that crosses the core boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    Unauthorized,
    QuotaExceeded,
    Timeout,
    UpstreamUnavailable,
    MalformedResponse,
}

impl ProviderErrorKind {
    /// Whether a second attempt could plausibly succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, ProviderErrorKind::Timeout | ProviderErrorKind::UpstreamUnavailable)
    }

    /// Fixed, renderable message for an end user.
    pub fn user_message(self) -> &'static str {
        match self {
            ProviderErrorKind::Unauthorized => "Search is not available right now. Please try again later.",
            ProviderErrorKind::QuotaExceeded => "Search limit reached. Please try again later.",
            ProviderErrorKind::Timeout => "The search took too long. Please try again.",
            ProviderErrorKind::UpstreamUnavailable => "No results right now. Please try again later.",
            ProviderErrorKind::MalformedResponse => "No results right now. Please try again later.",
        }
    }
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProviderErrorKind::Unauthorized => "unauthorized",
            ProviderErrorKind::QuotaExceeded => "quota_exceeded",
            ProviderErrorKind::Timeout => "timeout",
            ProviderErrorKind::UpstreamUnavailable => "upstream_unavailable",
            ProviderErrorKind::MalformedResponse => "malformed_response",
        };
        f.write_str(s)
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::Validation(e) => (-32602, e.to_string()),
            Error::Cache(e) => (-32002, e.to_string()),
            Error::Config(e) => (-32003, e.to_string()),
            Error::Serialize(msg) => (-32000, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::from(ValidationError::EmptyQuery);
        assert!(err.to_string().contains("INVALID_INPUT"));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_validation_error_to_mcp_error() {
        let err = Error::from(ValidationError::InvalidPage(0));
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
        assert!(mcp_err.message.contains("positive"));
    }

    #[test]
    fn test_cache_error_to_mcp_error() {
        let err = Error::from(CacheError::Connection("refused".into()));
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32002);
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(ProviderErrorKind::Timeout.is_retryable());
        assert!(ProviderErrorKind::UpstreamUnavailable.is_retryable());
        assert!(!ProviderErrorKind::Unauthorized.is_retryable());
        assert!(!ProviderErrorKind::QuotaExceeded.is_retryable());
        assert!(!ProviderErrorKind::MalformedResponse.is_retryable());
    }

    #[test]
    fn test_provider_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ProviderErrorKind::QuotaExceeded).unwrap();
        assert_eq!(json, r#""quota_exceeded""#);
        assert_eq!(ProviderErrorKind::QuotaExceeded.to_string(), "quota_exceeded");
    }

    #[test]
    fn test_serde_error_is_codec() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(CacheError::from(err), CacheError::Codec(_)));
    }
}
