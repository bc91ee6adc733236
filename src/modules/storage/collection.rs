use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use super::backend::{StorageBackend, StorageError};

/// Typed view over one named collection.
///
/// Every read-modify-write runs under the collection mutex, so ID
/// allocation from the loaded records cannot interleave within a process.
pub struct Collection<T> {
    name: String,
    backend: Arc<dyn StorageBackend>,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    pub fn new(backend: Arc<dyn StorageBackend>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            backend,
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All records in stored order; an unwritten collection is empty
    pub async fn all(&self) -> Result<Vec<T>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load_unlocked().await?.unwrap_or_default())
    }

    /// True once the collection has been written at least once
    pub async fn is_seeded(&self) -> Result<bool, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.backend.load(&self.name).await?.is_some())
    }

    pub async fn replace(&self, records: &[T]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.save_unlocked(records).await
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.backend.remove(&self.name).await
    }

    /// Load, apply `f`, and write back only if `f` succeeded
    pub async fn mutate<R, E>(&self, f: impl FnOnce(&mut Vec<T>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StorageError>,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.load_unlocked().await?.unwrap_or_default();
        let result = f(&mut records)?;
        self.save_unlocked(&records).await?;
        Ok(result)
    }

    async fn load_unlocked(&self) -> Result<Option<Vec<T>>, StorageError> {
        let Some(values) = self.backend.load(&self.name).await? else {
            return Ok(None);
        };

        values
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(|e| StorageError::json(&self.name, e)))
            .collect::<Result<Vec<T>, _>>()
            .map(Some)
    }

    async fn save_unlocked(&self, records: &[T]) -> Result<(), StorageError> {
        let values = records
            .iter()
            .map(|r| serde_json::to_value(r).map_err(|e| StorageError::json(&self.name, e)))
            .collect::<Result<Vec<_>, _>>()?;
        self.backend.save(&self.name, &values).await
    }
}
