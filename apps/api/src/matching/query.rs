//! Query Engine: score, filter and sort the catalog for one request.
//!
//! Pipeline order is fixed: every job is scored, then filtered, then sorted
//! with a stable sort so ties keep catalog order.

use std::cmp::Reverse;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;

use crate::matching::salary::max_salary_figure;
use crate::matching::scorer::MatchScorer;
use crate::models::{Experience, Job, Location, Preferences, Source, WorkMode};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortKey {
    /// Most recent first.
    #[default]
    Latest,
    Oldest,
    /// Highest match score first.
    Match,
    /// Highest salary figure first.
    Salary,
}

impl SortKey {
    /// Unknown or missing keys fall back to `Latest`.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        raw.parse().unwrap_or_else(|_| {
            debug!(sort = raw, "Unknown sort key, using latest");
            Self::default()
        })
    }
}

/// Parses an exact-match filter value. Empty or unknown values mean "no filter".
pub fn parse_filter<T: FromStr>(field: &str, raw: Option<&str>) -> Option<T> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(field, value = raw, "Ignoring unknown filter value");
            None
        }
    }
}

/// Parses a boolean switch. Only "true" (any case) turns it on; anything else
/// leaves it off.
pub fn parse_flag(field: &str, raw: Option<&str>) -> bool {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return false;
    };
    if raw.eq_ignore_ascii_case("true") {
        true
    } else {
        if !raw.eq_ignore_ascii_case("false") {
            debug!(field, value = raw, "Ignoring unknown flag value");
        }
        false
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryCriteria {
    pub search_term: String,
    pub location: Option<Location>,
    pub mode: Option<WorkMode>,
    pub experience: Option<Experience>,
    pub source: Option<Source>,
    pub sort_key: SortKey,
    /// Hide jobs scoring below `preferences.min_match_score`.
    pub restrict_to_threshold: bool,
    pub preferences: Preferences,
}

/// A job with its score for the current preferences. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: Job,
    pub match_score: u8,
}

impl ScoredJob {
    pub fn new(job: &Job, prefs: &Preferences, scorer: &dyn MatchScorer) -> Self {
        Self {
            job: job.clone(),
            match_score: scorer.score(job, prefs),
        }
    }
}

pub fn query(catalog: &[Job], criteria: &QueryCriteria, scorer: &dyn MatchScorer) -> Vec<ScoredJob> {
    let scored: Vec<ScoredJob> = catalog
        .iter()
        .map(|job| ScoredJob::new(job, &criteria.preferences, scorer))
        .collect();

    let needle = criteria.search_term.trim().to_lowercase();
    let mut results: Vec<ScoredJob> = scored
        .into_iter()
        .filter(|s| matches_criteria(s, criteria, &needle))
        .collect();

    sort_jobs(&mut results, criteria.sort_key);

    debug!(
        total = catalog.len(),
        matched = results.len(),
        sort = %criteria.sort_key,
        "Query evaluated"
    );
    results
}

fn matches_criteria(scored: &ScoredJob, criteria: &QueryCriteria, needle: &str) -> bool {
    let job = &scored.job;

    let search_ok = needle.is_empty()
        || job.title.to_lowercase().contains(needle)
        || job.company.to_lowercase().contains(needle);

    search_ok
        && criteria.location.map_or(true, |l| l == job.location)
        && criteria.mode.map_or(true, |m| m == job.mode)
        && criteria.experience.map_or(true, |e| e == job.experience)
        && criteria.source.map_or(true, |s| s == job.source)
        && (!criteria.restrict_to_threshold
            || scored.match_score >= criteria.preferences.min_match_score)
}

/// Stable sort by the chosen key.
pub fn sort_jobs(jobs: &mut [ScoredJob], key: SortKey) {
    match key {
        SortKey::Latest => jobs.sort_by_key(|s| s.job.posted_days_ago),
        SortKey::Oldest => jobs.sort_by_key(|s| Reverse(s.job.posted_days_ago)),
        SortKey::Match => jobs.sort_by_key(|s| Reverse(s.match_score)),
        SortKey::Salary => jobs.sort_by_cached_key(|s| Reverse(max_salary_figure(&s.job.salary_range))),
    }
}
