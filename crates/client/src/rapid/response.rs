//! RapidAPI real-time web search response envelope.

use serde::Deserialize;

use crate::provider::{ProviderError, RawResultItem};

/// Raw response body as returned by the API.
///
/// `data` is required; a body without it is malformed even if it parses.
#[derive(Debug, Deserialize)]
pub struct RapidApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    pub data: Vec<RawResultItem>,
}

/// Decode a response body into result items.
///
/// # Errors
///
/// `MalformedResponse` when the body is not the expected JSON shape, and
/// `UpstreamUnavailable` when the provider reports a non-OK status inside an
/// otherwise successful response.
pub fn parse(body: &[u8]) -> Result<Vec<RawResultItem>, ProviderError> {
    let api: RapidApiResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    if let Some(status) = api.status.as_deref()
        && !status.eq_ignore_ascii_case("ok")
    {
        return Err(ProviderError::UpstreamUnavailable(format!("provider reported status {status}")));
    }

    tracing::trace!(request_id = ?api.request_id, items = api.data.len(), "decoded provider response");
    Ok(api.data)
}
