use std::sync::Arc;

use chrono::NaiveDate;

use crate::digest::Digest;
use crate::storage::{load_record, save_record, session_key, KeyValueStore, StoreError};

pub const DIGEST_KEY: &str = "jobTrackerDigest";

/// One digest per session per calendar day.
#[derive(Clone)]
pub struct DigestStore {
    kv: Arc<dyn KeyValueStore>,
}

impl DigestStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn key(session: &str, date: NaiveDate) -> String {
        format!("{}:{}", session_key(DIGEST_KEY, session), date)
    }

    pub async fn load(&self, session: &str, date: NaiveDate) -> Option<Digest> {
        load_record(self.kv.as_ref(), &Self::key(session, date)).await
    }

    pub async fn save(&self, session: &str, digest: &Digest) -> Result<(), StoreError> {
        save_record(self.kv.as_ref(), &Self::key(session, digest.date), digest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[tokio::test]
    async fn test_digest_keyed_by_day() {
        let kv = InMemoryStore::new();
        let store = DigestStore::new(Arc::new(kv.clone()));
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let tomorrow = today.succ_opt().unwrap();

        let digest = Digest {
            date: today,
            jobs: vec![],
        };
        store.save("default", &digest).await.unwrap();

        assert_eq!(store.load("default", today).await, Some(digest));
        assert_eq!(store.load("default", tomorrow).await, None);
        assert!(kv
            .get("jobTrackerDigest:default:2026-10-16")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_malformed_digest_is_treated_as_missing() {
        let kv = InMemoryStore::new().with_value("jobTrackerDigest:default:2026-10-16", "[]");
        let store = DigestStore::new(Arc::new(kv));
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(store.load("default", today).await, None);
    }
}
