use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::storage::{load_record, save_record, session_key, KeyValueStore, StoreError};

pub const SAVED_JOBS_KEY: &str = "savedJobs";

/// Result of flipping a job's saved flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub job_id: u32,
    /// Saved state after the toggle.
    pub saved: bool,
    /// False when the id is not in the catalog and nothing was written.
    pub changed: bool,
    pub ids: BTreeSet<u32>,
}

/// Load/save contract for a session's set of saved job ids.
#[derive(Clone)]
pub struct SavedSetStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SavedSetStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub async fn load(&self, session: &str) -> BTreeSet<u32> {
        load_record(self.kv.as_ref(), &session_key(SAVED_JOBS_KEY, session))
            .await
            .unwrap_or_default()
    }

    pub async fn save(&self, session: &str, ids: &BTreeSet<u32>) -> Result<(), StoreError> {
        save_record(self.kv.as_ref(), &session_key(SAVED_JOBS_KEY, session), ids).await
    }

    /// Adds the id if absent, removes it if present. Ids missing from the
    /// catalog leave the set untouched.
    pub async fn toggle(
        &self,
        session: &str,
        job_id: u32,
        catalog: &Catalog,
    ) -> Result<ToggleOutcome, StoreError> {
        let mut ids = self.load(session).await;

        if !catalog.contains(job_id) {
            debug!(session, job_id, "Toggle for unknown job ignored");
            return Ok(ToggleOutcome {
                job_id,
                saved: ids.contains(&job_id),
                changed: false,
                ids,
            });
        }

        let saved = if ids.remove(&job_id) {
            false
        } else {
            ids.insert(job_id);
            true
        };
        self.save(session, &ids).await?;
        info!(session, job_id, saved, "Saved set updated");

        Ok(ToggleOutcome {
            job_id,
            saved,
            changed: true,
            ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn make_store(kv: InMemoryStore) -> SavedSetStore {
        SavedSetStore::new(Arc::new(kv))
    }

    #[tokio::test]
    async fn test_absent_set_is_empty() {
        let store = make_store(InMemoryStore::new());
        assert!(store.load("default").await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = make_store(InMemoryStore::new());
        let ids: BTreeSet<u32> = [3, 1, 7].into_iter().collect();
        store.save("default", &ids).await.unwrap();
        assert_eq!(store.load("default").await, ids);
    }

    #[tokio::test]
    async fn test_persisted_as_integer_array() {
        let kv = InMemoryStore::new();
        let store = make_store(kv.clone());
        let ids: BTreeSet<u32> = [2, 1].into_iter().collect();
        store.save("default", &ids).await.unwrap();
        let raw = kv.get("savedJobs:default").await.unwrap().unwrap();
        assert_eq!(raw, "[1,2]");
    }

    #[tokio::test]
    async fn test_malformed_set_falls_back_to_empty() {
        let kv = InMemoryStore::new().with_value("savedJobs:default", r#"["one", "two"]"#);
        assert!(make_store(kv).load("default").await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let catalog = Catalog::embedded().unwrap();
        let id = catalog.jobs()[0].id;
        let store = make_store(InMemoryStore::new());

        let added = store.toggle("default", id, &catalog).await.unwrap();
        assert!(added.saved && added.changed);
        assert!(store.load("default").await.contains(&id));

        let removed = store.toggle("default", id, &catalog).await.unwrap();
        assert!(!removed.saved && removed.changed);
        assert!(store.load("default").await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_noop() {
        let catalog = Catalog::embedded().unwrap();
        let kv = InMemoryStore::new();
        let store = make_store(kv.clone());

        let outcome = store.toggle("default", 999_999, &catalog).await.unwrap();
        assert!(!outcome.changed);
        assert!(!outcome.saved);
        assert!(outcome.ids.is_empty());
        assert_eq!(kv.len(), 0);
    }
}
