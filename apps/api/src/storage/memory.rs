use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{KeyValueStore, StoreError};

/// Process-local store. Used as the default backend and in tests.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing any typed store.
    #[cfg(test)]
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}
