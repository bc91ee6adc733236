use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::backend::{parse_records, StorageBackend, StorageError};

/// Key/value storage held in process memory.
///
/// Values are kept as serialized JSON strings, the same shape a browser's
/// local storage would hold.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw string under a key, bypassing serialization
    #[cfg(test)]
    pub async fn put_raw(&self, collection: &str, raw: &str) {
        self.entries
            .write()
            .await
            .insert(collection.to_string(), raw.to_string());
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, collection: &str) -> Result<Option<Vec<Value>>, StorageError> {
        let entries = self.entries.read().await;
        entries
            .get(collection)
            .map(|raw| parse_records(collection, raw))
            .transpose()
    }

    async fn save(&self, collection: &str, records: &[Value]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records).map_err(|e| StorageError::json(collection, e))?;
        self.entries
            .write()
            .await
            .insert(collection.to_string(), raw);
        Ok(())
    }

    async fn remove(&self, collection: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(collection);
        Ok(())
    }
}
