use std::sync::Arc;

use tracing::info;

use crate::models::Preferences;
use crate::storage::{load_record, save_record, session_key, KeyValueStore, StoreError};

pub const PREFERENCES_KEY: &str = "jobTrackerPreferences";

/// Load/save contract for a session's `Preferences` record.
#[derive(Clone)]
pub struct PreferenceStore {
    kv: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Defaults when nothing was saved or the stored record cannot be decoded.
    pub async fn load(&self, session: &str) -> Preferences {
        load_record(self.kv.as_ref(), &session_key(PREFERENCES_KEY, session))
            .await
            .unwrap_or_default()
    }

    /// Replaces the stored record wholesale.
    pub async fn save(&self, session: &str, prefs: &Preferences) -> Result<(), StoreError> {
        save_record(self.kv.as_ref(), &session_key(PREFERENCES_KEY, session), prefs).await?;
        info!(session, has_preferences = prefs.has_preferences(), "Preferences saved");
        Ok(())
    }
}
