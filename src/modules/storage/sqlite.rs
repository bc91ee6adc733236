use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;

use super::backend::{StorageBackend, StorageError};

/// SQLite-backed storage; one row per record, replaced per collection
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageBackend for SqliteStorage {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn load(&self, collection: &str) -> Result<Option<Vec<Value>>, StorageError> {
        let exists: Option<String> =
            sqlx::query_scalar("SELECT name FROM collections WHERE name = ?")
                .bind(collection)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to look up collection {}: {:?}", collection, e);
                    StorageError::Database(e)
                })?;

        if exists.is_none() {
            return Ok(None);
        }

        let payloads: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT payload
            FROM collection_records
            WHERE collection = ?
            ORDER BY position
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load collection {}: {:?}", collection, e);
            StorageError::Database(e)
        })?;

        payloads
            .iter()
            .map(|raw| serde_json::from_str(raw).map_err(|e| StorageError::json(collection, e)))
            .collect::<Result<Vec<Value>, _>>()
            .map(Some)
    }

    async fn save(&self, collection: &str, records: &[Value]) -> Result<(), StorageError> {
        let payloads = records
            .iter()
            .map(|r| serde_json::to_string(r).map_err(|e| StorageError::json(collection, e)))
            .collect::<Result<Vec<String>, _>>()?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO collections (name, updated_at)
            VALUES (?, ?)
            ON CONFLICT(name) DO UPDATE SET updated_at = excluded.updated_at
            "#,
        )
        .bind(collection)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM collection_records WHERE collection = ?")
            .bind(collection)
            .execute(&mut *tx)
            .await?;

        for (position, payload) in payloads.iter().enumerate() {
            sqlx::query(
                "INSERT INTO collection_records (collection, position, payload) VALUES (?, ?, ?)",
            )
            .bind(collection)
            .bind(position as i64)
            .bind(payload)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit collection {}: {:?}", collection, e);
            StorageError::Database(e)
        })?;

        Ok(())
    }

    async fn remove(&self, collection: &str) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM collection_records WHERE collection = ?")
            .bind(collection)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM collections WHERE name = ?")
            .bind(collection)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
