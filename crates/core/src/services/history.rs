use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::log_storage_failure;
use crate::calendar::MonthGrid;
use crate::domain::history::{WearDetails, WearHistoryEntry, WearHistoryId};
use crate::domain::outfit::{Outfit, OutfitId};
use crate::errors::StorageError;
use crate::storage::{read_json, write_json, KeyValueStore, StorageKeys};

/// Owner of the wear-history list. The stored list is kept sorted by date,
/// newest first.
#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

/// One cell of a month view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub entries: Vec<WearHistoryEntry>,
}

/// A Sunday-first month of wear entries, bucketed by UTC calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WearCalendar {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl WearCalendar {
    pub fn worn_days(&self) -> usize {
        self.days.iter().filter(|day| !day.entries.is_empty()).count()
    }
}

impl HistoryService {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub async fn list_all(&self) -> Vec<WearHistoryEntry> {
        match self.load().await {
            Ok(history) => history,
            Err(error) => {
                log_storage_failure("history.read_failed", &self.keys.wear_history(), &error);
                Vec::new()
            }
        }
    }

    /// Records that `outfit` was worn at `date`. Backdated entries land in
    /// date order; entries with equal dates keep insertion order.
    pub async fn add_entry(
        &self,
        outfit: &Outfit,
        date: DateTime<Utc>,
        details: WearDetails,
    ) -> Option<WearHistoryEntry> {
        let entry = WearHistoryEntry {
            id: WearHistoryId(Uuid::now_v7().to_string()),
            outfit: outfit.clone(),
            date,
            notes: details.notes,
            rating: details.rating,
        };

        let result = async {
            let mut history = self.load().await?;
            history.push(entry.clone());
            history.sort_by(|left, right| right.date.cmp(&left.date));
            self.persist(&history).await
        }
        .await;

        match result {
            Ok(()) => {
                tracing::info!(
                    event_name = "history.entry_added",
                    entry_id = %entry.id.0,
                    outfit_id = %entry.outfit.id,
                    "wear recorded"
                );
                Some(entry)
            }
            Err(error) => {
                log_storage_failure("history.add_failed", &self.keys.wear_history(), &error);
                None
            }
        }
    }

    pub async fn delete_entry(&self, id: &WearHistoryId) -> bool {
        let result = async {
            let mut history = self.load().await?;
            let before = history.len();
            history.retain(|entry| &entry.id != id);
            let removed = history.len() != before;
            self.persist(&history).await?;
            Ok::<bool, StorageError>(removed)
        }
        .await;

        result.unwrap_or_else(|error| {
            log_storage_failure("history.delete_failed", &self.keys.wear_history(), &error);
            false
        })
    }

    pub async fn clear_all(&self) {
        let key = self.keys.wear_history();
        if let Err(error) = self.store.remove(&key).await {
            log_storage_failure("history.clear_failed", &key, &error);
        }
    }

    /// Entries with `start <= date <= end`, newest first.
    pub async fn entries_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<WearHistoryEntry> {
        self.list_all()
            .await
            .into_iter()
            .filter(|entry| entry.date >= start && entry.date <= end)
            .collect()
    }

    pub async fn wear_count_for(&self, outfit_id: &OutfitId) -> usize {
        self.list_all().await.iter().filter(|entry| &entry.outfit.id == outfit_id).count()
    }

    /// Month view for `year`/`month` (1-based). `None` for an impossible month.
    pub async fn calendar_month(&self, year: i32, month: u32) -> Option<WearCalendar> {
        let grid = MonthGrid::new(year, month)?;
        let history = self.list_all().await;

        let days = grid
            .days()
            .map(|date| CalendarDay {
                date,
                entries: history
                    .iter()
                    .filter(|entry| entry.date.date_naive() == date)
                    .cloned()
                    .collect(),
            })
            .collect();

        Some(WearCalendar { year, month, leading_blanks: grid.leading_blanks, days })
    }

    async fn load(&self) -> Result<Vec<WearHistoryEntry>, StorageError> {
        Ok(read_json(self.store.as_ref(), &self.keys.wear_history()).await?.unwrap_or_default())
    }

    async fn persist(&self, history: &[WearHistoryEntry]) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), &self.keys.wear_history(), history).await
    }
}
