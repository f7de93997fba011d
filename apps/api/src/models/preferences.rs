use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_MATCH_SCORE: u8 = 40;

/// The user's matching configuration, persisted as a whole record.
///
/// Strings are kept exactly as the user entered them so a stored record always
/// round-trips; the scorer compares them against job fields by exact equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Comma-delimited role keywords, e.g. "frontend, react developer".
    pub role_keywords: String,
    pub preferred_locations: Vec<String>,
    pub preferred_mode: Vec<String>,
    /// Single experience bracket, empty means any.
    pub experience_level: String,
    /// Comma-delimited skills.
    pub skills: String,
    pub min_match_score: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            role_keywords: String::new(),
            preferred_locations: Vec::new(),
            preferred_mode: Vec::new(),
            experience_level: String::new(),
            skills: String::new(),
            min_match_score: DEFAULT_MIN_MATCH_SCORE,
        }
    }
}

impl Preferences {
    /// True once the user has set any matching signal. `min_match_score` alone
    /// does not count.
    pub fn has_preferences(&self) -> bool {
        !self.role_keywords.is_empty()
            || !self.preferred_locations.is_empty()
            || !self.preferred_mode.is_empty()
            || !self.experience_level.is_empty()
            || !self.skills.is_empty()
    }

    pub fn keyword_tokens(&self) -> Vec<String> {
        split_tokens(&self.role_keywords)
    }

    pub fn skill_tokens(&self) -> Vec<String> {
        split_tokens(&self.skills)
    }

    /// Caps `min_match_score` at 100 for records coming in from clients.
    pub fn normalized(mut self) -> Self {
        self.min_match_score = self.min_match_score.min(100);
        self
    }
}

/// Splits comma-separated free text into trimmed, lower-cased, non-empty tokens.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
