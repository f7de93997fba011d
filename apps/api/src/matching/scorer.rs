//! Match Scoring: how well a single job lines up with the user's preferences.
//!
//! Default: `WeightedMatchScorer`, an additive point system where every signal
//! is gated on its own. `AppState` holds an `Arc<dyn MatchScorer>` so tests and
//! future backends can swap it without touching the query engine.

use crate::models::{Job, Preferences, Source};

pub const MAX_MATCH_SCORE: u32 = 100;

/// Jobs posted this many days ago or fewer earn the recency bonus.
pub const RECENT_POSTING_DAYS: u32 = 2;

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

/// Points awarded per signal. The defaults sum to exactly 100.
#[derive(Debug, Clone)]
pub struct MatchWeights {
    pub title_keyword: u32,
    pub description_keyword: u32,
    pub location: u32,
    pub mode: u32,
    pub experience: u32,
    pub skills: u32,
    pub recent_posting: u32,
    pub preferred_source: u32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            title_keyword: 25,
            description_keyword: 15,
            location: 15,
            mode: 10,
            experience: 10,
            skills: 15,
            recent_posting: 5,
            preferred_source: 5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends. Implementations must be pure:
/// identical inputs give identical scores, always within 0–100.
pub trait MatchScorer: Send + Sync {
    fn score(&self, job: &Job, prefs: &Preferences) -> u8;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. role keywords: +title_keyword if any is in the title, +description_keyword
///    if any is in the description (case-insensitive substring)
/// 2. +location / +mode when the job's value is in the preferred set
/// 3. +experience when the bracket equals the preferred one
/// 4. +skills when any user skill and any job skill contain one another
/// 5. +recent_posting when posted within `RECENT_POSTING_DAYS`
/// 6. +preferred_source for LinkedIn postings
/// 7. total capped at 100
#[derive(Debug, Clone, Default)]
pub struct WeightedMatchScorer {
    pub weights: MatchWeights,
}

impl MatchScorer for WeightedMatchScorer {
    fn score(&self, job: &Job, prefs: &Preferences) -> u8 {
        compute_match_score(job, prefs, &self.weights)
    }
}

fn compute_match_score(job: &Job, prefs: &Preferences, weights: &MatchWeights) -> u8 {
    let mut total = 0u32;

    let keywords = prefs.keyword_tokens();
    if !keywords.is_empty() {
        let title = job.title.to_lowercase();
        let description = job.description.to_lowercase();
        if keywords.iter().any(|k| title.contains(k.as_str())) {
            total += weights.title_keyword;
        }
        if keywords.iter().any(|k| description.contains(k.as_str())) {
            total += weights.description_keyword;
        }
    }

    if prefs
        .preferred_locations
        .iter()
        .any(|l| l == job.location.as_ref())
    {
        total += weights.location;
    }

    if prefs.preferred_mode.iter().any(|m| m == job.mode.as_ref()) {
        total += weights.mode;
    }

    if !prefs.experience_level.is_empty() && prefs.experience_level == job.experience.as_ref() {
        total += weights.experience;
    }

    let user_skills = prefs.skill_tokens();
    if !user_skills.is_empty() && skills_overlap(&user_skills, &job.skills) {
        total += weights.skills;
    }

    if job.posted_days_ago <= RECENT_POSTING_DAYS {
        total += weights.recent_posting;
    }

    if job.source == Source::LinkedIn {
        total += weights.preferred_source;
    }

    total.min(MAX_MATCH_SCORE) as u8
}

/// Bidirectional, case-insensitive substring test between user and job skills.
fn skills_overlap(user_skills: &[String], job_skills: &[String]) -> bool {
    job_skills.iter().any(|skill| {
        let skill = skill.to_lowercase();
        user_skills
            .iter()
            .any(|u| skill.contains(u.as_str()) || u.contains(skill.as_str()))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
