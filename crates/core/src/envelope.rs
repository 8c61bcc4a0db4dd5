//! The response envelope handed back to callers, and the shaped records it carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderErrorKind;
use crate::query::{CacheKey, ExperienceLevel, JobType, Mode, SearchRequest};

/// A job listing extracted from a raw result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub remote: bool,
    pub experience: Option<ExperienceLevel>,
    pub apply_url: String,
    pub snippet: Option<String>,
    pub source: Option<String>,
    pub posted: Option<String>,
}

/// A general web result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResult {
    pub title: String,
    pub url: String,
    pub snippet: Option<String>,
    pub domain: Option<String>,
    pub source: Option<String>,
    pub date: Option<String>,
}

/// One shaped result, in whichever shape the search mode calls for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultRecord {
    Job(JobListing),
    General(WebResult),
}

impl ResultRecord {
    /// URL used for deduplication and linking.
    pub fn url(&self) -> &str {
        match self {
            ResultRecord::Job(job) => &job.apply_url,
            ResultRecord::General(web) => &web.url,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ResultRecord::Job(job) => &job.title,
            ResultRecord::General(web) => &web.title,
        }
    }
}

/// Uniform response for a search, whether served from cache, freshly
/// fetched, or degraded after a provider failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub mode: Mode,
    pub query: String,
    pub cache_key: CacheKey,
    pub items: Vec<ResultRecord>,
    /// Deduplicated result count across all pages; `None` when unknown.
    pub total_estimated: Option<u64>,
    pub page: u32,
    pub page_size: u32,
    pub served_from_cache: bool,
    pub fetched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProviderErrorKind>,
}

impl ResultEnvelope {
    /// Envelope for a fresh provider result.
    pub fn fresh(request: &SearchRequest, key: &CacheKey, items: Vec<ResultRecord>, total: u64) -> Self {
        Self {
            mode: request.mode,
            query: request.query.clone(),
            cache_key: key.clone(),
            items,
            total_estimated: Some(total),
            page: request.page,
            page_size: request.page_size,
            served_from_cache: false,
            fetched_at: Utc::now(),
            error: None,
        }
    }

    /// Empty envelope annotated with the provider failure.
    pub fn degraded(request: &SearchRequest, key: &CacheKey, kind: ProviderErrorKind) -> Self {
        Self {
            mode: request.mode,
            query: request.query.clone(),
            cache_key: key.clone(),
            items: Vec::new(),
            total_estimated: None,
            page: request.page,
            page_size: request.page_size,
            served_from_cache: false,
            fetched_at: Utc::now(),
            error: Some(kind),
        }
    }

    /// Number of pages implied by `total_estimated`; at least 1.
    pub fn total_pages(&self) -> u32 {
        let total = self.total_estimated.unwrap_or(0);
        let size = u64::from(self.page_size.max(1));
        total.div_ceil(size).max(1).try_into().unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Renderable message when the search degraded.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(ProviderErrorKind::user_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchFilters;

    fn request(page: u32, page_size: u32) -> SearchRequest {
        SearchRequest {
            mode: Mode::General,
            query: "rust".into(),
            filters: SearchFilters::default(),
            page,
            page_size,
            force_refresh: false,
        }
    }

    fn web(url: &str) -> ResultRecord {
        ResultRecord::General(WebResult {
            title: "t".into(),
            url: url.into(),
            snippet: None,
            domain: None,
            source: None,
            date: None,
        })
    }

    #[test]
    fn test_pagination_helpers() {
        let req = request(1, 10);
        let key = CacheKey::for_request(&req);
        let envelope = ResultEnvelope::fresh(&req, &key, vec![web("https://a.example")], 25);
        assert_eq!(envelope.total_pages(), 3);
        assert!(envelope.has_next());
        assert!(!envelope.has_prev());

        let last = ResultEnvelope { page: 3, ..envelope };
        assert!(!last.has_next());
        assert!(last.has_prev());
    }

    #[test]
    fn test_degraded_envelope() {
        let req = request(2, 10);
        let key = CacheKey::for_request(&req);
        let envelope = ResultEnvelope::degraded(&req, &key, ProviderErrorKind::Timeout);
        assert!(envelope.items.is_empty());
        assert!(!envelope.served_from_cache);
        assert_eq!(envelope.total_estimated, None);
        assert_eq!(envelope.total_pages(), 1);
        assert_eq!(envelope.error_message(), Some(ProviderErrorKind::Timeout.user_message()));
    }

    #[test]
    fn test_record_serializes_with_type_tag() {
        let json = serde_json::to_value(web("https://a.example")).unwrap();
        assert_eq!(json["type"], "general");
        assert_eq!(json["url"], "https://a.example");
    }

    #[test]
    fn test_envelope_json_roundtrip_keeps_error_annotation() {
        let req = request(1, 10);
        let key = CacheKey::for_request(&req);
        let envelope = ResultEnvelope::degraded(&req, &key, ProviderErrorKind::QuotaExceeded);
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains(r#""error":"quota_exceeded""#));
        let back: ResultEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
    }
}
