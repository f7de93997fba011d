use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::digest::DigestStore;
use crate::matching::scorer::{MatchScorer, WeightedMatchScorer};
use crate::preferences::PreferenceStore;
use crate::saved::SavedSetStore;
use crate::storage::KeyValueStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Pluggable match scorer. Default: WeightedMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
    pub preferences: PreferenceStore,
    pub saved: SavedSetStore,
    pub digests: DigestStore,
    pub digest_size: usize,
}

impl AppState {
    pub fn new(config: &Config, catalog: Catalog, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            scorer: Arc::new(WeightedMatchScorer::default()),
            preferences: PreferenceStore::new(kv.clone()),
            saved: SavedSetStore::new(kv.clone()),
            digests: DigestStore::new(kv),
            digest_size: config.digest_size,
        }
    }

    /// Embedded catalog over the given in-memory store.
    #[cfg(test)]
    pub fn for_tests(kv: crate::storage::InMemoryStore) -> Self {
        let kv: Arc<dyn KeyValueStore> = Arc::new(kv);
        Self {
            catalog: Arc::new(Catalog::embedded().expect("embedded catalog")),
            scorer: Arc::new(WeightedMatchScorer::default()),
            preferences: PreferenceStore::new(kv.clone()),
            saved: SavedSetStore::new(kv.clone()),
            digests: DigestStore::new(kv),
            digest_size: crate::digest::DEFAULT_DIGEST_SIZE,
        }
    }
}
