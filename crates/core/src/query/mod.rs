//! Search request model and normalization.
//!
//! Raw caller input becomes a [`SearchRequest`], its [`CacheKey`] and the
//! provider-ready [`ProviderQuery`] in one pass through [`normalize`].

pub mod key;
pub mod normalize;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use key::CacheKey;
pub use normalize::normalize;

/// Which output shape a search produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Job,
    General,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Job => "job",
            Mode::General => "general",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "job" | "jobs" => Ok(Mode::Job),
            "general" | "web" => Ok(Mode::General),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

/// Employment type tag, used both as a filter and as a detected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
        }
    }

    /// Parse a loosely written job type (`Full Time`, `full_time`, `intern`).
    pub fn parse(value: &str) -> Option<Self> {
        let v: String = value
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();
        match v.as_str() {
            "full-time" | "fulltime" => Some(JobType::FullTime),
            "part-time" | "parttime" => Some(JobType::PartTime),
            "contract" | "freelance" => Some(JobType::Contract),
            "internship" | "intern" => Some(JobType::Internship),
            _ => None,
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seniority, used both as a filter and as a detected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }

    /// Words added to a job search's provider text.
    pub fn search_term(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry level",
            ExperienceLevel::Mid => "mid level",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }

    /// Parse a loosely written level (`Entry-Level`, `junior`, `sr`).
    pub fn parse(value: &str) -> Option<Self> {
        let v: String = value
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();
        match v.as_str() {
            "entry" | "entry-level" | "junior" | "jr" | "graduate" => Some(ExperienceLevel::Entry),
            "mid" | "mid-level" | "intermediate" => Some(ExperienceLevel::Mid),
            "senior" | "sr" | "lead" => Some(ExperienceLevel::Senior),
            "executive" | "director" | "exec" => Some(ExperienceLevel::Executive),
            _ => None,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional narrowing of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceLevel>,
}

impl SearchFilters {
    /// Filter pairs sorted by name, as used for key derivation.
    pub fn sorted_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(experience) = self.experience {
            pairs.push(("experience", experience.as_str().to_string()));
        }
        if let Some(job_type) = self.job_type {
            pairs.push(("job_type", job_type.as_str().to_string()));
        }
        if let Some(location) = &self.location {
            pairs.push(("location", location.clone()));
        }
        if let Some(remote) = self.remote {
            pairs.push(("remote", remote.to_string()));
        }
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.job_type.is_none() && self.remote.is_none() && self.location.is_none() && self.experience.is_none()
    }
}

/// Search input as received from a caller, before any validation.
#[derive(Debug, Clone, Default)]
pub struct RawSearch {
    pub mode: String,
    pub query: String,
    pub filters: Vec<(String, String)>,
    pub page: i64,
    pub page_size: Option<i64>,
    pub force_refresh: bool,
}

impl RawSearch {
    pub fn new(mode: impl Into<String>, query: impl Into<String>) -> Self {
        Self { mode: mode.into(), query: query.into(), page: 1, ..Default::default() }
    }

    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((name.into(), value.into()));
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn force_refresh(mut self, force: bool) -> Self {
        self.force_refresh = force;
        self
    }
}

/// A validated, canonical search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub mode: Mode,
    pub query: String,
    pub filters: SearchFilters,
    /// 1-indexed.
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub force_refresh: bool,
}

/// Bounds the normalizer enforces, derived from `AppConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub fetch_limit: u32,
    pub max_query_chars: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self { default_page_size: 15, max_page_size: 100, fetch_limit: 100, max_query_chars: 400 }
    }
}

/// Parameters sent to the upstream provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderQuery {
    pub q: String,
    pub limit: u32,
}

/// Output of the normalizer.
#[derive(Debug, Clone)]
pub struct NormalizedSearch {
    pub request: SearchRequest,
    pub key: CacheKey,
    pub provider_query: ProviderQuery,
}
