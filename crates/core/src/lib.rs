pub mod calendar;
pub mod config;
pub mod domain;
pub mod errors;
pub mod random;
pub mod services;
pub mod storage;
pub mod suggestions;

pub use calendar::{current_week_number, week_number, MonthGrid};
pub use domain::clothing::{
    Category, ClothingItem, ClothingItemPatch, ItemId, NewClothingItem, Season, StyleType,
    Wardrobe,
};
pub use domain::history::{WearDetails, WearHistoryEntry, WearHistoryId};
pub use domain::outfit::{Occasion, Outfit, OutfitId};
pub use errors::{ApplicationError, StorageError};
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use services::{
    CatalogService, HistoryService, OutfitService, WardrobeExport, WardrobeServices, WeeklyPick,
};
pub use storage::{InMemoryKeyValueStore, KeyValueStore, StorageKeys};
pub use suggestions::{CompatibilityScorer, OutfitFilter, RecommendationEngine};
