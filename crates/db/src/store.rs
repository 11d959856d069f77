//! SQLite-backed key-value store.
//!
//! Each key holds one whole JSON collection. Callers read, modify and write
//! the entire blob, so two overlapping read-modify-write cycles on the same
//! key resolve as last-write-wins. The store does not lock across calls.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use wardrobe_core::errors::StorageError;
use wardrobe_core::storage::KeyValueStore;

use crate::DbPool;

#[derive(Clone)]
pub struct SqlKeyValueStore {
    pool: DbPool,
}

impl SqlKeyValueStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Stored keys starting with `prefix`, sorted.
    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let pattern = format!("{}%", escape_like(prefix));
        let rows =
            sqlx::query("SELECT key FROM kv_store WHERE key LIKE ? ESCAPE '\\' ORDER BY key")
                .bind(pattern)
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::backend)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("key").map_err(StorageError::backend))
            .collect()
    }
}

#[async_trait]
impl KeyValueStore for SqlKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::backend)?;

        row.map(|row| row.try_get::<String, _>("value")).transpose().map_err(|error| {
            StorageError::Decode { key: key.to_string(), message: error.to_string() }
        })
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::backend)?;

        tracing::trace!(event_name = "kv_store.set", key, "blob written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(StorageError::backend)?;
        Ok(())
    }
}

fn escape_like(value: &str) -> String {
    value.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
