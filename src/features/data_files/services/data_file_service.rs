use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::modules::storage::StorageError;
use crate::shared::validation::DATA_FILENAME_REGEX;

/// Raw JSON documents in the fixtures directory, addressed by file name
pub struct DataFileService {
    dir: PathBuf,
}

impl DataFileService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf> {
        if !DATA_FILENAME_REGEX.is_match(filename) {
            return Err(AppError::BadRequest(format!(
                "Invalid data file name '{}'",
                filename
            )));
        }
        Ok(self.dir.join(filename))
    }

    pub async fn read(&self, filename: &str) -> Result<Value> {
        let path = self.path_for(filename)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "Data file '{}' not found",
                    filename
                )))
            }
            Err(e) => return Err(StorageError::io(filename, e).into()),
        };

        serde_json::from_str(&raw).map_err(|e| {
            tracing::warn!("Data file {} is not valid JSON: {}", filename, e);
            AppError::BadRequest(format!("Data file '{}' is not valid JSON", filename))
        })
    }

    /// Replace the whole document, pretty-printed
    pub async fn write(&self, filename: &str, document: &Value) -> Result<()> {
        let path = self.path_for(filename)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::io(filename, e))?;

        let raw =
            serde_json::to_string_pretty(document).map_err(|e| StorageError::json(filename, e))?;
        tokio::fs::write(&path, raw)
            .await
            .map_err(|e| StorageError::io(filename, e))?;

        tracing::info!("Saved data file {}", path.display());
        Ok(())
    }
}
