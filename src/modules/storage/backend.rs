use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on collection '{collection}': {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in collection '{collection}': {source}")]
    Json {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    pub fn io(collection: &str, source: std::io::Error) -> Self {
        Self::Io {
            collection: collection.to_string(),
            source,
        }
    }

    pub fn json(collection: &str, source: serde_json::Error) -> Self {
        Self::Json {
            collection: collection.to_string(),
            source,
        }
    }

    /// True when the stored payload exists but cannot be parsed
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Json { .. })
    }
}

/// Whole-collection persistence.
///
/// `load` returns `None` when the collection has never been written, which
/// is distinct from an empty collection.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn load(&self, collection: &str) -> Result<Option<Vec<Value>>, StorageError>;

    async fn save(&self, collection: &str, records: &[Value]) -> Result<(), StorageError>;

    async fn remove(&self, collection: &str) -> Result<(), StorageError>;
}

/// Parse a serialized collection; accepts a bare array only
pub(crate) fn parse_records(collection: &str, raw: &str) -> Result<Vec<Value>, StorageError> {
    serde_json::from_str::<Vec<Value>>(raw).map_err(|e| StorageError::json(collection, e))
}
