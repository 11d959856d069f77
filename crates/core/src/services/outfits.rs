use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{log_storage_failure, CatalogService, HistoryService};
use crate::domain::history::{WearDetails, WearHistoryEntry};
use crate::domain::outfit::{Outfit, OutfitId};
use crate::errors::StorageError;
use crate::storage::{read_json, write_json, KeyValueStore, StorageKeys};
use crate::suggestions::{OutfitFilter, RecommendationEngine};

const DEFAULT_ALTERNATIVES: usize = 3;

/// The featured outfit for one week plus the runner-up suggestions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeeklyPick {
    pub week: u32,
    pub outfit: Option<Outfit>,
    pub alternatives: Vec<Outfit>,
    /// True when this load selected and saved the pick.
    pub newly_selected: bool,
}

/// Weekly selection, favorites and wear recording on top of the catalog and
/// history services.
#[derive(Clone)]
pub struct OutfitService {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    engine: RecommendationEngine,
    catalog: CatalogService,
    history: HistoryService,
    alternatives: usize,
}

impl OutfitService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        keys: StorageKeys,
        engine: RecommendationEngine,
        catalog: CatalogService,
        history: HistoryService,
    ) -> Self {
        Self { store, keys, engine, catalog, history, alternatives: DEFAULT_ALTERNATIVES }
    }

    pub fn with_alternatives(mut self, alternatives: usize) -> Self {
        self.alternatives = alternatives;
        self
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Ranked suggestions for the stored catalog.
    pub async fn suggestions(&self) -> Vec<Outfit> {
        self.engine.generate_suggestions(&self.catalog.list().await)
    }

    pub async fn suggestions_matching(&self, filter: &OutfitFilter) -> Vec<Outfit> {
        self.engine.filter(&self.catalog.list().await, filter)
    }

    pub async fn weekly_outfit(&self, week: u32) -> Option<Outfit> {
        let key = self.keys.weekly_outfit(week);
        match read_json(self.store.as_ref(), &key).await {
            Ok(outfit) => outfit,
            Err(error) => {
                log_storage_failure("weekly.read_failed", &key, &error);
                None
            }
        }
    }

    /// Overwrites the record for `week` unconditionally.
    pub async fn save_weekly_outfit(&self, week: u32, outfit: &Outfit) {
        let key = self.keys.weekly_outfit(week);
        match write_json(self.store.as_ref(), &key, outfit).await {
            Ok(()) => tracing::info!(
                event_name = "weekly.saved",
                week,
                outfit_id = %outfit.id,
                "weekly outfit saved"
            ),
            Err(error) => log_storage_failure("weekly.save_failed", &key, &error),
        }
    }

    /// First view of a week saves the top-ranked suggestion. Later views
    /// return the saved record. Alternatives are ranks `1..=N` of the current
    /// suggestion list either way.
    pub async fn load_week(&self, week: u32) -> WeeklyPick {
        let suggestions = self.suggestions().await;
        let alternatives =
            suggestions.iter().skip(1).take(self.alternatives).cloned().collect::<Vec<_>>();

        if let Some(outfit) = self.weekly_outfit(week).await {
            return WeeklyPick { week, outfit: Some(outfit), alternatives, newly_selected: false };
        }

        let Some(top) = suggestions.into_iter().next() else {
            tracing::debug!(event_name = "weekly.no_suggestions", week, "nothing to pick");
            return WeeklyPick { week, outfit: None, alternatives, newly_selected: false };
        };

        self.save_weekly_outfit(week, &top).await;
        WeeklyPick { week, outfit: Some(top), alternatives, newly_selected: true }
    }

    /// Replaces the week's pick with a uniformly random qualifying outfit.
    /// Leaves the record alone when there is nothing to pick from.
    pub async fn regenerate_week(&self, week: u32) -> Option<Outfit> {
        let suggestions = self.suggestions().await;
        let outfit = self.engine.pick_random(&suggestions)?.clone();
        self.save_weekly_outfit(week, &outfit).await;
        Some(outfit)
    }

    /// Makes an explicitly chosen outfit the week's pick.
    pub async fn pick_for_week(&self, week: u32, outfit: &Outfit) {
        self.save_weekly_outfit(week, outfit).await;
    }

    pub async fn favorite_outfits(&self) -> Vec<Outfit> {
        match self.load_favorites().await {
            Ok(favorites) => favorites,
            Err(error) => {
                log_storage_failure("favorites.read_failed", &self.keys.favorite_outfits(), &error);
                Vec::new()
            }
        }
    }

    /// Keeps the favorites collection in step with `outfit.is_favorite`:
    /// insert-or-replace when set, remove when cleared.
    pub async fn update_outfit(&self, outfit: &Outfit) {
        let result = async {
            let mut favorites = self.load_favorites().await?;
            let position = favorites.iter().position(|favorite| favorite.id == outfit.id);

            match (outfit.is_favorite, position) {
                (true, Some(index)) => favorites[index] = outfit.clone(),
                (true, None) => favorites.push(outfit.clone()),
                (false, Some(index)) => {
                    favorites.remove(index);
                }
                (false, None) => return Ok(()),
            }
            self.persist_favorites(&favorites).await
        }
        .await;

        if let Err(error) = result {
            log_storage_failure("favorites.update_failed", &self.keys.favorite_outfits(), &error);
        }
    }

    /// Returns `outfit` with the flag applied, after syncing favorites.
    pub async fn set_favorite(&self, outfit: &Outfit, favorite: bool) -> Outfit {
        let outfit = outfit.clone().with_favorite(favorite);
        self.update_outfit(&outfit).await;
        tracing::debug!(
            event_name = "favorites.toggled",
            outfit_id = %outfit.id,
            favorite,
            "favorite flag updated"
        );
        outfit
    }

    pub async fn mark_as_worn(&self, outfit: &Outfit, date: DateTime<Utc>) -> Option<WearHistoryEntry> {
        self.mark_as_worn_with(outfit, date, WearDetails::default()).await
    }

    /// Bumps both items' wear counts, then appends the history entry. Each
    /// step is its own whole-blob write; a failed step is logged and the
    /// remaining steps still run.
    pub async fn mark_as_worn_with(
        &self,
        outfit: &Outfit,
        date: DateTime<Utc>,
        details: WearDetails,
    ) -> Option<WearHistoryEntry> {
        self.catalog.increment_wear(&outfit.shirt.id).await;
        self.catalog.increment_wear(&outfit.pant.id).await;
        self.history.add_entry(outfit, date, details).await
    }

    /// Resolves an outfit id against the current suggestions, then the
    /// favorites, then the given week's saved pick.
    pub async fn find_outfit(&self, id: &OutfitId, week: u32) -> Option<Outfit> {
        if let Some(outfit) = self.suggestions().await.into_iter().find(|outfit| &outfit.id == id) {
            return Some(outfit);
        }
        if let Some(outfit) = self.favorite_outfits().await.into_iter().find(|outfit| &outfit.id == id) {
            return Some(outfit);
        }
        self.weekly_outfit(week).await.filter(|outfit| &outfit.id == id)
    }

    async fn load_favorites(&self) -> Result<Vec<Outfit>, StorageError> {
        Ok(read_json(self.store.as_ref(), &self.keys.favorite_outfits()).await?.unwrap_or_default())
    }

    async fn persist_favorites(&self, favorites: &[Outfit]) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), &self.keys.favorite_outfits(), favorites).await
    }
}
