use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::log_storage_failure;
use crate::domain::clothing::{ClothingItem, ClothingItemPatch, ItemId, NewClothingItem, Wardrobe};
use crate::errors::StorageError;
use crate::storage::{read_json, write_json, KeyValueStore, StorageKeys};

/// Owner of the catalog blob (`{shirts, pants}`).
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl CatalogService {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Both collections; empty when nothing is stored or the read fails.
    pub async fn list(&self) -> Wardrobe {
        match self.load().await {
            Ok(wardrobe) => wardrobe,
            Err(error) => {
                log_storage_failure("catalog.read_failed", &self.keys.catalog(), &error);
                Wardrobe::default()
            }
        }
    }

    pub async fn find(&self, id: &ItemId) -> Option<ClothingItem> {
        self.list().await.find(id).cloned()
    }

    /// Assigns a time-ordered id, `date_added = now` and a zero wear count,
    /// then appends to the collection named by the item's category. Returns
    /// the stored item, or `None` when the write was dropped.
    pub async fn add(&self, item: NewClothingItem) -> Option<ClothingItem> {
        let item = item.into_item(ItemId(Uuid::now_v7().to_string()), Utc::now());
        let result = async {
            let mut wardrobe = self.load().await?;
            wardrobe.insert(item.clone());
            self.persist(&wardrobe).await
        }
        .await;

        match result {
            Ok(()) => {
                tracing::info!(
                    event_name = "catalog.item_added",
                    item_id = %item.id,
                    category = %item.category,
                    "clothing item added"
                );
                Some(item)
            }
            Err(error) => {
                log_storage_failure("catalog.add_failed", &self.keys.catalog(), &error);
                None
            }
        }
    }

    /// Merges `patch` into the item with `id`. Reports whether an item was
    /// found and written; unknown ids leave the catalog untouched.
    pub async fn update(&self, id: &ItemId, patch: ClothingItemPatch) -> bool {
        self.modify("catalog.update_failed", |wardrobe| match wardrobe.find_mut(id) {
            Some(item) => {
                patch.apply_to(item);
                true
            }
            None => false,
        })
        .await
    }

    /// Removes `id` from both collections.
    pub async fn delete(&self, id: &ItemId) -> bool {
        let result = async {
            let mut wardrobe = self.load().await?;
            let removed = wardrobe.remove(id);
            self.persist(&wardrobe).await?;
            Ok::<bool, StorageError>(removed)
        }
        .await;

        match result {
            Ok(removed) => {
                tracing::debug!(event_name = "catalog.item_deleted", item_id = %id, removed, "delete applied");
                removed
            }
            Err(error) => {
                log_storage_failure("catalog.delete_failed", &self.keys.catalog(), &error);
                false
            }
        }
    }

    /// `wear_count += 1` and `last_worn = now`, shirts searched first.
    pub async fn increment_wear(&self, id: &ItemId) -> bool {
        self.modify("catalog.increment_failed", |wardrobe| match wardrobe.find_mut(id) {
            Some(item) => {
                item.wear_count = item.wear_count.saturating_add(1);
                item.last_worn = Some(Utc::now());
                true
            }
            None => false,
        })
        .await
    }

    pub async fn clear(&self) {
        let key = self.keys.catalog();
        if let Err(error) = self.store.remove(&key).await {
            log_storage_failure("catalog.clear_failed", &key, &error);
        }
    }

    /// Read, apply `change`, and write back only when `change` reports a hit.
    async fn modify<F>(&self, event_name: &'static str, change: F) -> bool
    where
        F: FnOnce(&mut Wardrobe) -> bool + Send,
    {
        let result = async {
            let mut wardrobe = self.load().await?;
            if !change(&mut wardrobe) {
                return Ok(false);
            }
            self.persist(&wardrobe).await?;
            Ok::<bool, StorageError>(true)
        }
        .await;

        result.unwrap_or_else(|error| {
            log_storage_failure(event_name, &self.keys.catalog(), &error);
            false
        })
    }

    async fn load(&self) -> Result<Wardrobe, StorageError> {
        Ok(read_json(self.store.as_ref(), &self.keys.catalog()).await?.unwrap_or_default())
    }

    async fn persist(&self, wardrobe: &Wardrobe) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), &self.keys.catalog(), wardrobe).await
    }
}
