//! Turn raw provider items into the records a caller sees.
//!
//! Shaping is pure: convert each raw item for the mode, drop what cannot be
//! converted, remove duplicate URLs keeping the first, then slice one page.

pub mod job;

use std::collections::HashSet;

use dualsearch_core::{JobListing, Mode, ResultRecord, WebResult};
use url::Url;

use crate::provider::RawResultItem;

/// One page of shaped records plus the deduplicated total.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedPage {
    pub items: Vec<ResultRecord>,
    pub total: u64,
}

fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// A job listing needs both a title and an apply URL.
pub fn to_listing(raw: &RawResultItem) -> Option<JobListing> {
    let title = raw.title()?;
    let apply_url = raw.target_url()?;
    let snippet = raw.text();

    let haystack = match &snippet {
        Some(s) => format!("{title} {s}"),
        None => title.clone(),
    };

    Some(JobListing {
        company: raw.company().or_else(|| raw.domain()).or_else(|| raw.source()),
        location: raw.location(),
        job_type: job::detect_job_type(&haystack),
        remote: job::detect_remote(&haystack),
        experience: job::detect_experience(&haystack),
        source: raw.source(),
        posted: raw.date(),
        title,
        apply_url,
        snippet,
    })
}

/// A web result needs a URL; the title falls back to it.
pub fn to_web_result(raw: &RawResultItem) -> Option<WebResult> {
    let url = raw.target_url()?;
    Some(WebResult {
        title: raw.title().unwrap_or_else(|| url.clone()),
        snippet: raw.text(),
        domain: raw.domain().or_else(|| host_of(&url)),
        source: raw.source(),
        date: raw.date(),
        url,
    })
}

/// Shape `raw` for `mode` and return page `page` of size `page_size`.
///
/// Pages are 1-based. A page past the end is empty; `total` is unaffected by
/// slicing.
pub fn shape(mode: Mode, raw: &[RawResultItem], page: u32, page_size: u32) -> ShapedPage {
    let mut seen = HashSet::new();
    let deduped: Vec<ResultRecord> = raw
        .iter()
        .filter_map(|item| match mode {
            Mode::Job => to_listing(item).map(ResultRecord::Job),
            Mode::General => to_web_result(item).map(ResultRecord::General),
        })
        .filter(|record| seen.insert(record.url().trim().to_string()))
        .collect();

    let total = deduped.len() as u64;
    let size = page_size.max(1) as usize;
    let skip = (page.max(1) as usize - 1).saturating_mul(size);
    let items = deduped.into_iter().skip(skip).take(size).collect();

    ShapedPage { items, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualsearch_core::{ExperienceLevel, JobType};

    fn item(title: Option<&str>, url: Option<&str>) -> RawResultItem {
        RawResultItem {
            title: title.map(str::to_string),
            url: url.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_job_listing_detection() {
        let raw = RawResultItem {
            title: Some("Senior Rust Engineer (Remote)".into()),
            url: Some("https://www.linkedin.com/jobs/1".into()),
            snippet: Some("Full-time position at Acme".into()),
            domain: Some("linkedin.com".into()),
            source: Some("LinkedIn".into()),
            date: Some("2 days ago".into()),
            ..Default::default()
        };
        let listing = to_listing(&raw).unwrap();
        assert_eq!(listing.job_type, Some(JobType::FullTime));
        assert!(listing.remote);
        assert_eq!(listing.experience, Some(ExperienceLevel::Senior));
        assert_eq!(listing.company.as_deref(), Some("linkedin.com"));
        assert_eq!(listing.posted.as_deref(), Some("2 days ago"));
    }

    #[test]
    fn test_company_fallback_order() {
        let mut raw = item(Some("Engineer"), Some("https://x.example/1"));
        raw.source = Some("Indeed".into());
        assert_eq!(to_listing(&raw).unwrap().company.as_deref(), Some("Indeed"));

        raw.company = Some("Acme".into());
        raw.domain = Some("indeed.com".into());
        assert_eq!(to_listing(&raw).unwrap().company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_job_requires_title_and_url() {
        assert!(to_listing(&item(None, Some("https://a.example"))).is_none());
        assert!(to_listing(&item(Some("Engineer"), None)).is_none());
    }

    #[test]
    fn test_web_result_title_falls_back_to_url() {
        let web = to_web_result(&item(None, Some("https://www.rust-lang.org/learn"))).unwrap();
        assert_eq!(web.title, "https://www.rust-lang.org/learn");
        assert_eq!(web.domain.as_deref(), Some("rust-lang.org"));
        assert!(to_web_result(&item(Some("no url"), None)).is_none());
    }

    #[test]
    fn test_dedup_keeps_first_seen() {
        let raw = vec![
            item(Some("first"), Some("https://a.example")),
            item(Some("second"), Some(" https://a.example ")),
            item(Some("third"), Some("https://b.example")),
        ];
        let page = shape(Mode::General, &raw, 1, 10);
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].title(), "first");
        assert_eq!(page.items[1].title(), "third");
    }

    #[test]
    fn test_pagination() {
        let raw: Vec<_> = (1..=25)
            .map(|i| item(Some(&format!("r{i}")), Some(&format!("https://e.example/{i}"))))
            .collect();

        let p1 = shape(Mode::General, &raw, 1, 10);
        assert_eq!(p1.items.len(), 10);
        assert_eq!(p1.total, 25);
        assert_eq!(p1.items[0].title(), "r1");

        let p3 = shape(Mode::General, &raw, 3, 10);
        assert_eq!(p3.items.len(), 5);
        assert_eq!(p3.items[0].title(), "r21");

        let p4 = shape(Mode::General, &raw, 4, 10);
        assert!(p4.items.is_empty());
        assert_eq!(p4.total, 25);
    }

    #[test]
    fn test_mode_drops_differ() {
        let raw = vec![item(None, Some("https://a.example")), item(Some("t"), Some("https://b.example"))];
        assert_eq!(shape(Mode::Job, &raw, 1, 10).total, 1);
        assert_eq!(shape(Mode::General, &raw, 1, 10).total, 2);
    }

    #[test]
    fn test_empty_input() {
        let page = shape(Mode::Job, &[], 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}
