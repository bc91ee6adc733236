use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::backend::{parse_records, StorageBackend, StorageError};

/// Flat JSON files, one `<collection>.json` per collection
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }
}

#[async_trait]
impl StorageBackend for JsonFileStorage {
    fn name(&self) -> &'static str {
        "json"
    }

    async fn load(&self, collection: &str) -> Result<Option<Vec<Value>>, StorageError> {
        let path = self.path_for(collection);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => parse_records(collection, &raw).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(collection, e)),
        }
    }

    async fn save(&self, collection: &str, records: &[Value]) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::io(collection, e))?;

        let raw =
            serde_json::to_string_pretty(records).map_err(|e| StorageError::json(collection, e))?;

        // Write to a sibling file first so readers never see a partial document
        let path = self.path_for(collection);
        let tmp_path = self.dir.join(format!(".{}.json.tmp", collection));
        tokio::fs::write(&tmp_path, raw)
            .await
            .map_err(|e| StorageError::io(collection, e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StorageError::io(collection, e))?;

        debug!(
            "Saved {} records to {}",
            records.len(),
            path.to_string_lossy()
        );
        Ok(())
    }

    async fn remove(&self, collection: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(collection)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(collection, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn temp_storage() -> JsonFileStorage {
        let dir = std::env::temp_dir().join(format!("sabores-json-{}", Uuid::new_v4()));
        JsonFileStorage::new(dir)
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let storage = temp_storage();
        assert!(storage.load("services").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_file() {
        let storage = temp_storage();
        let records = vec![json!({"id": 1, "title": "Catering Empresarial"})];

        storage.save("services", &records).await.unwrap();
        assert!(storage.dir().join("services.json").exists());

        let loaded = storage.load("services").await.unwrap().unwrap();
        assert_eq!(loaded, records);

        storage.remove("services").await.unwrap();
        storage.remove("services").await.unwrap();
        assert!(storage.load("services").await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(storage.dir());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_malformed() {
        let storage = temp_storage();
        std::fs::create_dir_all(storage.dir()).unwrap();
        std::fs::write(storage.dir().join("tips.json"), "[{\"id\": ").unwrap();

        let err = storage.load("tips").await.unwrap_err();
        assert!(err.is_malformed());

        let _ = std::fs::remove_dir_all(storage.dir());
    }
}
