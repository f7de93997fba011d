use serde::Deserialize;

pub const DEFAULT_SESSION: &str = "default";

/// `?session=` selector shared by every stateful endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub session: Option<String>,
}

impl SessionQuery {
    pub fn id(&self) -> &str {
        resolve_session(self.session.as_deref())
    }
}

pub fn resolve_session(raw: Option<&str>) -> &str {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SESSION)
}
