//! Wardrobe services over the key-value port.
//!
//! Services never surface storage failures: a failed read is logged and
//! treated as an empty collection, a failed write is logged and dropped.
//! Missing ids are no-ops.

pub mod catalog;
pub mod export;
pub mod history;
pub mod outfits;

use std::sync::Arc;

pub use catalog::CatalogService;
pub use export::WardrobeExport;
pub use history::{CalendarDay, HistoryService, WearCalendar};
pub use outfits::{OutfitService, WeeklyPick};

use crate::errors::StorageError;
use crate::storage::{KeyValueStore, StorageKeys};
use crate::suggestions::RecommendationEngine;

/// The three services wired to one store.
#[derive(Clone)]
pub struct WardrobeServices {
    pub catalog: CatalogService,
    pub history: HistoryService,
    pub outfits: OutfitService,
}

impl WardrobeServices {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys, engine: RecommendationEngine) -> Self {
        let catalog = CatalogService::new(store.clone(), keys.clone());
        let history = HistoryService::new(store.clone(), keys.clone());
        let outfits = OutfitService::new(store, keys, engine, catalog.clone(), history.clone());
        Self { catalog, history, outfits }
    }
}

pub(crate) fn log_storage_failure(event_name: &'static str, key: &str, error: &StorageError) {
    tracing::error!(event_name, key, error = %error, "storage operation failed; continuing without it");
}
