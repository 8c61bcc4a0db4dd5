//! The seam between the search path and an upstream search API.

pub mod error;

use async_trait::async_trait;
use dualsearch_core::ProviderQuery;
use serde::Deserialize;

pub use error::ProviderError;

/// Provider-native result record.
///
/// Only lives for the duration of a cache miss; never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawResultItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

impl RawResultItem {
    pub fn title(&self) -> Option<String> {
        non_blank(self.title.as_ref())
    }

    /// `url`, falling back to `link`.
    pub fn target_url(&self) -> Option<String> {
        non_blank(self.url.as_ref()).or_else(|| non_blank(self.link.as_ref()))
    }

    /// `snippet`, falling back to `description`.
    pub fn text(&self) -> Option<String> {
        non_blank(self.snippet.as_ref()).or_else(|| non_blank(self.description.as_ref()))
    }

    pub fn domain(&self) -> Option<String> {
        non_blank(self.domain.as_ref())
    }

    pub fn source(&self) -> Option<String> {
        non_blank(self.source.as_ref())
    }

    pub fn date(&self) -> Option<String> {
        non_blank(self.date.as_ref())
    }

    pub fn company(&self) -> Option<String> {
        non_blank(self.company.as_ref())
    }

    pub fn location(&self) -> Option<String> {
        non_blank(self.location.as_ref())
    }
}

/// An upstream search API.
///
/// One call to `fetch` is at most one network request; retries are the
/// caller's decision.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether credentials are present. A provider without them fails every
    /// fetch as `Unauthorized`.
    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<RawResultItem>, ProviderError>;
}
