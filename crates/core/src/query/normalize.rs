//! Query normalization.
//!
//! ### Rules
//! - Query text is trimmed, lower-cased, and internal whitespace collapsed.
//! - Filter names are case-insensitive; filters are keyed by sorted name so
//!   input order never affects the cache key.
//! - `job_type=remote` folds into `remote=true`.
//! - General searches keep only the `location` filter.
//! - `experience` narrows job searches by seniority.
//! - Page size is clamped to `[1, max_page_size]`, never rejected.

use crate::error::ValidationError;

use super::{CacheKey, ExperienceLevel, JobType, Mode, NormalizedSearch, ProviderQuery, RawSearch, SearchFilters, SearchLimits, SearchRequest};

/// Job boards the job-mode provider query is restricted to.
const JOB_SITES: &str = "site:linkedin.com OR site:indeed.com OR site:glassdoor.com";

/// Normalize raw caller input into a request, its cache key and the provider query.
///
/// # Errors
///
/// Returns a `ValidationError` for an unknown mode, empty or overlong query
/// text, a non-positive page, or an unknown/unparsable/conflicting filter.
pub fn normalize(raw: RawSearch, limits: &SearchLimits) -> Result<NormalizedSearch, ValidationError> {
    let mode: Mode = raw.mode.parse()?;

    let query = collapse(&raw.query);
    if query.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    let len = query.chars().count();
    if len > limits.max_query_chars {
        return Err(ValidationError::QueryTooLong { len, max: limits.max_query_chars });
    }

    if raw.page < 1 {
        return Err(ValidationError::InvalidPage(raw.page));
    }
    let page = u32::try_from(raw.page).map_err(|_| ValidationError::InvalidPage(raw.page))?;

    let max_page_size = limits.max_page_size.max(1);
    let page_size = match raw.page_size {
        Some(size) => size.clamp(1, i64::from(max_page_size)) as u32,
        None => limits.default_page_size.clamp(1, max_page_size),
    };

    let mut filters = parse_filters(&raw.filters)?;
    if mode == Mode::General
        && (filters.job_type.is_some() || filters.remote.is_some() || filters.experience.is_some())
    {
        tracing::debug!("dropping job-only filters from a general search");
        filters.job_type = None;
        filters.remote = None;
        filters.experience = None;
    }

    let request = SearchRequest { mode, query, filters, page, page_size, force_refresh: raw.force_refresh };
    let key = CacheKey::for_request(&request);
    let provider_query = ProviderQuery { q: provider_text(&request), limit: limits.fetch_limit };

    Ok(NormalizedSearch { request, key, provider_query })
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

enum FilterName {
    JobType,
    Remote,
    Location,
    Experience,
}

fn filter_name(name: &str) -> Option<FilterName> {
    let name = name.trim().to_lowercase().replace('-', "_");
    match name.as_str() {
        "job_type" | "jobtype" | "type" => Some(FilterName::JobType),
        "remote" => Some(FilterName::Remote),
        "location" => Some(FilterName::Location),
        "experience" | "experience_level" | "level" | "seniority" => Some(FilterName::Experience),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Set `slot` to `value`, rejecting a second, different value.
fn assign<T: PartialEq>(slot: &mut Option<T>, value: T, name: &str) -> Result<(), ValidationError> {
    match slot {
        Some(existing) if *existing != value => Err(ValidationError::DuplicateFilter(name.to_string())),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

fn parse_filters(raw: &[(String, String)]) -> Result<SearchFilters, ValidationError> {
    let mut filters = SearchFilters::default();

    for (name, value) in raw {
        let kind = filter_name(name).ok_or_else(|| ValidationError::UnknownFilter(name.clone()))?;
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let invalid = || ValidationError::InvalidFilterValue { name: name.trim().to_lowercase(), value: value.to_string() };

        match kind {
            FilterName::JobType => {
                if value.eq_ignore_ascii_case("remote") {
                    assign(&mut filters.remote, true, "remote")?;
                } else {
                    let job_type = JobType::parse(value).ok_or_else(invalid)?;
                    assign(&mut filters.job_type, job_type, "job_type")?;
                }
            }
            FilterName::Remote => {
                let remote = parse_bool(value).ok_or_else(invalid)?;
                assign(&mut filters.remote, remote, "remote")?;
            }
            FilterName::Location => {
                assign(&mut filters.location, collapse(value), "location")?;
            }
            FilterName::Experience => {
                let level = ExperienceLevel::parse(value).ok_or_else(invalid)?;
                assign(&mut filters.experience, level, "experience")?;
            }
        }
    }

    Ok(filters)
}

fn provider_text(request: &SearchRequest) -> String {
    match request.mode {
        Mode::General => match &request.filters.location {
            Some(location) => format!("{} {location}", request.query),
            None => request.query.clone(),
        },
        Mode::Job => {
            let mut parts = vec![request.query.clone(), "job".to_string()];
            if let Some(job_type) = request.filters.job_type {
                parts.push(job_type.as_str().to_string());
            }
            if let Some(experience) = request.filters.experience {
                parts.push(experience.search_term().to_string());
            }
            if request.filters.remote == Some(true) {
                parts.push("remote".to_string());
            }
            if let Some(location) = &request.filters.location {
                parts.push(location.clone());
            }
            parts.push(JOB_SITES.to_string());
            parts.join(" ")
        }
    }
}
