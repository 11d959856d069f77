//! Key-value persistence port.
//!
//! Every collection is one JSON blob under a fixed key. Services read the
//! whole blob, mutate it in memory and write it back. There is no locking: two
//! interleaved read-modify-write cycles on the same key resolve as last write
//! wins and the earlier mutation is lost.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::StorageError;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key was never written or has been removed.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Logical keys, all sharing one namespace prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    pub const DEFAULT_NAMESPACE: &'static str = "wardrobe";

    pub fn new(namespace: impl Into<String>) -> Self {
        Self { namespace: namespace.into() }
    }

    pub fn catalog(&self) -> String {
        format!("{}_catalog", self.namespace)
    }

    pub fn wear_history(&self) -> String {
        format!("{}_wear_history", self.namespace)
    }

    pub fn weekly_outfit(&self, week: u32) -> String {
        format!("{}_weekly_outfit_{week}", self.namespace)
    }

    pub fn favorite_outfits(&self) -> String {
        format!("{}_favorite_outfits", self.namespace)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAMESPACE)
    }
}

/// Reads and decodes a JSON blob. A missing key is `Ok(None)`.
pub async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|error| StorageError::Decode { key: key.to_string(), message: error.to_string() })
}

pub async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)
        .map_err(|error| StorageError::Encode { key: key.to_string(), message: error.to_string() })?;
    store.set(key, raw).await
}

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

/// Store whose every call fails. Exercises the lenient error policy.
#[cfg(test)]
pub(crate) struct FailingKeyValueStore;

#[cfg(test)]
#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::backend("store offline"))
    }

    async fn set(&self, _key: &str, _value: String) -> Result<(), StorageError> {
        Err(StorageError::backend("store offline"))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::backend("store offline"))
    }
}

#[cfg(test)]
mod tests {
    use super::{read_json, write_json, InMemoryKeyValueStore, KeyValueStore, StorageKeys};
    use crate::errors::StorageError;

    #[test]
    fn keys_share_the_namespace() {
        let keys = StorageKeys::new("closet");

        assert_eq!(keys.catalog(), "closet_catalog");
        assert_eq!(keys.wear_history(), "closet_wear_history");
        assert_eq!(keys.weekly_outfit(11), "closet_weekly_outfit_11");
        assert_eq!(keys.favorite_outfits(), "closet_favorite_outfits");
    }

    #[tokio::test]
    async fn in_memory_store_round_trip() {
        let store = InMemoryKeyValueStore::new();

        assert_eq!(store.get("k").await.expect("get"), None);
        store.set("k", "v".to_string()).await.expect("set");
        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
        store.remove("k").await.expect("remove");
        store.remove("k").await.expect("remove absent key");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn json_helpers_treat_missing_keys_as_none() {
        let store = InMemoryKeyValueStore::new();

        let missing: Option<Vec<u32>> = read_json(&store, "numbers").await.expect("read");
        assert_eq!(missing, None);

        write_json(&store, "numbers", &vec![1u32, 2, 3]).await.expect("write");
        let found: Option<Vec<u32>> = read_json(&store, "numbers").await.expect("read");
        assert_eq!(found, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn corrupt_blob_is_a_decode_error() {
        let store = InMemoryKeyValueStore::new();
        store.set("numbers", "{not json".to_string()).await.expect("set");

        let result: Result<Option<Vec<u32>>, _> = read_json(&store, "numbers").await;
        assert!(matches!(result, Err(StorageError::Decode { ref key, .. }) if key == "numbers"));
    }
}
