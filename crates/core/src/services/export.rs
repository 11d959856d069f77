use chrono::{DateTime, Utc};
use serde::Serialize;

use super::WardrobeServices;
use crate::domain::clothing::Wardrobe;
use crate::domain::history::WearHistoryEntry;
use crate::domain::outfit::Outfit;

/// Point-in-time snapshot of everything the user owns. Assembled in memory
/// only; the caller decides where it goes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeExport {
    pub exported_at: DateTime<Utc>,
    pub catalog: Wardrobe,
    pub history: Vec<WearHistoryEntry>,
    pub favorites: Vec<Outfit>,
    pub week: u32,
    pub weekly_outfit: Option<Outfit>,
}

impl WardrobeExport {
    /// Reads without selecting: an unviewed week exports as `None`.
    pub async fn collect(services: &WardrobeServices, week: u32) -> Self {
        Self {
            exported_at: Utc::now(),
            catalog: services.catalog.list().await,
            history: services.history.list_all().await,
            favorites: services.outfits.favorite_outfits().await,
            week,
            weekly_outfit: services.outfits.weekly_outfit(week).await,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
            && self.history.is_empty()
            && self.favorites.is_empty()
            && self.weekly_outfit.is_none()
    }
}
