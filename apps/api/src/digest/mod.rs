//! Daily Digest: the day's best matches, frozen once generated.

pub mod handlers;
pub mod store;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::matching::query::{sort_jobs, ScoredJob, SortKey};
use crate::matching::scorer::MatchScorer;
use crate::models::{Job, Preferences};

pub use store::DigestStore;

pub const DEFAULT_DIGEST_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Digest {
    pub date: NaiveDate,
    pub jobs: Vec<ScoredJob>,
}

/// Picks jobs at or above the user's threshold, best score first, newer
/// postings first among equal scores, truncated to `limit`.
pub fn generate_digest(
    catalog: &[Job],
    prefs: &Preferences,
    scorer: &dyn MatchScorer,
    limit: usize,
    date: NaiveDate,
) -> Digest {
    let mut jobs: Vec<ScoredJob> = catalog
        .iter()
        .map(|job| ScoredJob::new(job, prefs, scorer))
        .filter(|s| s.match_score >= prefs.min_match_score)
        .collect();

    // Two stable passes: recency first, then score, gives score-then-recency order.
    sort_jobs(&mut jobs, SortKey::Latest);
    sort_jobs(&mut jobs, SortKey::Match);
    jobs.truncate(limit);

    Digest { date, jobs }
}

impl Digest {
    /// Shareable plain-text body, e.g. for an email draft.
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("Top {} Jobs For You ({})\n", self.jobs.len(), self.date);

        if self.jobs.is_empty() {
            out.push_str("\nNo matching roles today. Check again tomorrow.\n");
            return out;
        }

        for (i, scored) in self.jobs.iter().enumerate() {
            let job = &scored.job;
            out.push_str(&format!(
                "\n{}. {} at {}\n   {} | {} | Match {}%\n   Apply: {}\n",
                i + 1,
                job.title,
                job.company,
                job.location,
                job.experience,
                scored.match_score,
                job.apply_url
            ));
        }
        out
    }
}
