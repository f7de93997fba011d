//! Key-value persistence used by the preference, saved-set and digest stores.
//!
//! Backends only move opaque strings; the typed stores above them own the
//! record shapes and the fallback-to-default behaviour.

pub mod memory;
pub mod redis_store;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

pub use self::memory::InMemoryStore;
pub use self::redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Whole-value key-value store. `set` always overwrites.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Key for a record owned by one session, e.g. `savedJobs:default`.
pub fn session_key(prefix: &str, session: &str) -> String {
    format!("{prefix}:{session}")
}

/// Reads and decodes a JSON record.
///
/// Absent, malformed and unreadable values all come back as `None`; callers
/// substitute their defaults. Nothing here is surfaced to the user.
pub async fn load_record<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match kv.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            error!("Store read failed for {key}: {e}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Malformed value under {key}, using defaults: {e}");
            None
        }
    }
}

/// Encodes and writes a JSON record, replacing whatever was there.
pub async fn save_record<T: Serialize>(
    kv: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    kv.set(key, raw).await
}
