//! Provider error types.

use dualsearch_core::ProviderErrorKind;

/// Errors from an upstream search provider.
///
/// The carried strings are for logs only; callers see [`ProviderErrorKind`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Missing or rejected credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The account's request quota is exhausted.
    #[error("quota exceeded")]
    QuotaExceeded,

    /// The request did not finish within the configured bound.
    #[error("request timeout")]
    Timeout,

    /// Network failure or a non-success status from the provider.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The response body did not have the expected structure.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::Unauthorized(_) => ProviderErrorKind::Unauthorized,
            ProviderError::QuotaExceeded => ProviderErrorKind::QuotaExceeded,
            ProviderError::Timeout => ProviderErrorKind::Timeout,
            ProviderError::UpstreamUnavailable(_) => ProviderErrorKind::UpstreamUnavailable,
            ProviderError::MalformedResponse(_) => ProviderErrorKind::MalformedResponse,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else {
            ProviderError::UpstreamUnavailable(err.to_string())
        }
    }
}
