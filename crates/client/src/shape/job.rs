//! Keyword detection over a listing's title and snippet.

use std::sync::LazyLock;

use dualsearch_core::{ExperienceLevel, JobType};
use regex::Regex;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern")
}

static JOB_TYPES: LazyLock<Vec<(JobType, Regex)>> = LazyLock::new(|| {
    vec![
        (JobType::FullTime, pattern(r"(?i)\bfull[\s-]?time\b")),
        (JobType::PartTime, pattern(r"(?i)\bpart[\s-]?time\b")),
        (JobType::Contract, pattern(r"(?i)\b(contract|contractor|freelance|temporary)\b")),
        (JobType::Internship, pattern(r"(?i)\b(intern|internship|interns)\b")),
    ]
});

static REMOTE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\b(remote|work from home|wfh|telecommute|distributed team|anywhere)\b"));

static EXPERIENCE: LazyLock<Vec<(ExperienceLevel, Regex)>> = LazyLock::new(|| {
    vec![
        (ExperienceLevel::Executive, pattern(r"(?i)\b(executive|director|vp|vice president|head of|chief)\b")),
        (ExperienceLevel::Senior, pattern(r"(?i)\b(senior|sr|lead|principal|staff)\b")),
        (ExperienceLevel::Mid, pattern(r"(?i)\b(mid[\s-]?level|intermediate)\b")),
        (ExperienceLevel::Entry, pattern(r"(?i)\b(junior|jr|entry[\s-]level|graduate|new grad)\b")),
    ]
});

/// First job type mentioned, in full-time, part-time, contract, internship order.
pub fn detect_job_type(text: &str) -> Option<JobType> {
    JOB_TYPES.iter().find(|(_, re)| re.is_match(text)).map(|(t, _)| *t)
}

pub fn detect_remote(text: &str) -> bool {
    REMOTE.is_match(text)
}

/// Seniority, most senior match first.
pub fn detect_experience(text: &str) -> Option<ExperienceLevel> {
    EXPERIENCE.iter().find(|(_, re)| re.is_match(text)).map(|(l, _)| *l)
}
