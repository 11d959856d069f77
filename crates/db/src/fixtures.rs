use chrono::{DateTime, Utc};

use wardrobe_core::domain::clothing::{
    Category, ClothingItem, ItemId, Season, StyleType, Wardrobe,
};
use wardrobe_core::errors::StorageError;
use wardrobe_core::storage::{read_json, write_json, KeyValueStore, StorageKeys};

/// 2024-01-01T00:00:00Z, the `dateAdded` of every demo item.
const DEMO_ADDED_AT: i64 = 1_704_067_200;

/// Canonical demo pieces. Chosen so every occasion and both broad seasons
/// produce at least one suggestion.
const DEMO_ITEMS: &[DemoItem] = &[
    DemoItem {
        id: "demo-shirt-oxford",
        name: "White Oxford",
        category: Category::Shirt,
        color: "white",
        style: StyleType::Formal,
        fabric: "cotton",
        season: Season::All,
    },
    DemoItem {
        id: "demo-shirt-linen",
        name: "Blue Linen Shirt",
        category: Category::Shirt,
        color: "blue",
        style: StyleType::Casual,
        fabric: "linen",
        season: Season::Summer,
    },
    DemoItem {
        id: "demo-shirt-flannel",
        name: "Red Flannel",
        category: Category::Shirt,
        color: "red",
        style: StyleType::Casual,
        fabric: "cotton",
        season: Season::Winter,
    },
    DemoItem {
        id: "demo-shirt-sequin",
        name: "Pink Party Shirt",
        category: Category::Shirt,
        color: "pink",
        style: StyleType::Party,
        fabric: "silk",
        season: Season::All,
    },
    DemoItem {
        id: "demo-pant-chinos",
        name: "Beige Chinos",
        category: Category::Pant,
        color: "beige",
        style: StyleType::Casual,
        fabric: "cotton",
        season: Season::All,
    },
    DemoItem {
        id: "demo-pant-jeans",
        name: "Navy Jeans",
        category: Category::Pant,
        color: "navy",
        style: StyleType::Casual,
        fabric: "denim",
        season: Season::All,
    },
    DemoItem {
        id: "demo-pant-trousers",
        name: "Gray Wool Trousers",
        category: Category::Pant,
        color: "gray",
        style: StyleType::Formal,
        fabric: "wool",
        season: Season::Winter,
    },
    DemoItem {
        id: "demo-pant-shorts",
        name: "Green Shorts",
        category: Category::Pant,
        color: "green",
        style: StyleType::Casual,
        fabric: "canvas",
        season: Season::Summer,
    },
];

struct DemoItem {
    id: &'static str,
    name: &'static str,
    category: Category,
    color: &'static str,
    style: StyleType,
    fabric: &'static str,
    season: Season,
}

impl DemoItem {
    fn to_item(&self) -> ClothingItem {
        ClothingItem {
            id: ItemId(self.id.to_string()),
            name: self.name.to_string(),
            category: self.category,
            color: self.color.to_string(),
            style: self.style,
            fabric: self.fabric.to_string(),
            season: self.season,
            image: format!("demo://{}", self.id),
            date_added: DateTime::<Utc>::from_timestamp(DEMO_ADDED_AT, 0).unwrap_or_default(),
            last_worn: None,
            wear_count: 0,
        }
    }
}

/// Deterministic demo wardrobe.
///
/// Loading is additive: items already in the catalog (by id) are left as
/// they are, so repeated loads converge on the same catalog.
pub struct DemoWardrobe;

impl DemoWardrobe {
    pub async fn load(
        store: &dyn KeyValueStore,
        keys: &StorageKeys,
    ) -> Result<SeedResult, StorageError> {
        let key = keys.catalog();
        let mut wardrobe: Wardrobe = read_json(store, &key).await?.unwrap_or_default();

        let mut added = 0;
        for demo in DEMO_ITEMS {
            let id = ItemId(demo.id.to_string());
            if wardrobe.find(&id).is_none() {
                wardrobe.insert(demo.to_item());
                added += 1;
            }
        }

        if added > 0 {
            write_json(store, &key, &wardrobe).await?;
        }
        tracing::info!(event_name = "seed.demo_loaded", added, key = %key, "demo wardrobe loaded");

        let items_seeded = DEMO_ITEMS
            .iter()
            .map(|demo| SeededItem { id: demo.id, name: demo.name, category: demo.category })
            .collect();
        Ok(SeedResult { items_seeded, newly_added: added })
    }

    /// Checks that every demo item is present in the catalog.
    pub async fn verify(
        store: &dyn KeyValueStore,
        keys: &StorageKeys,
    ) -> Result<VerificationResult, StorageError> {
        let wardrobe: Wardrobe = read_json(store, &keys.catalog()).await?.unwrap_or_default();

        let checks = DEMO_ITEMS
            .iter()
            .map(|demo| (demo.id, wardrobe.find(&ItemId(demo.id.to_string())).is_some()))
            .collect::<Vec<_>>();
        let all_present = checks.iter().all(|(_, present)| *present);

        Ok(VerificationResult { all_present, checks })
    }
}

#[derive(Debug)]
pub struct SeedResult {
    pub items_seeded: Vec<SeededItem>,
    pub newly_added: usize,
}

#[derive(Debug)]
pub struct SeededItem {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wardrobe_core::domain::outfit::Occasion;
    use wardrobe_core::storage::{InMemoryKeyValueStore, StorageKeys};
    use wardrobe_core::suggestions::{OutfitFilter, RecommendationEngine};
    use wardrobe_core::WardrobeServices;

    use super::{DemoWardrobe, DEMO_ITEMS};
    use crate::store::SqlKeyValueStore;
    use crate::{connect_with_settings, migrations};

    #[test]
    fn demo_ids_are_unique() {
        let mut ids = DEMO_ITEMS.iter().map(|demo| demo.id).collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), DEMO_ITEMS.len());
    }

    #[tokio::test]
    async fn load_is_idempotent_across_runs() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrate");
        let store = SqlKeyValueStore::new(pool);
        let keys = StorageKeys::default();

        let first = DemoWardrobe::load(&store, &keys).await.expect("first load");
        let second = DemoWardrobe::load(&store, &keys).await.expect("second load");

        assert_eq!(first.newly_added, DEMO_ITEMS.len());
        assert_eq!(second.newly_added, 0);
        assert_eq!(first.items_seeded.len(), second.items_seeded.len());

        let verification = DemoWardrobe::verify(&store, &keys).await.expect("verify");
        assert!(verification.all_present);
    }

    #[tokio::test]
    async fn verify_reports_missing_items() {
        let store = InMemoryKeyValueStore::new();
        let verification =
            DemoWardrobe::verify(&store, &StorageKeys::default()).await.expect("verify");

        assert!(!verification.all_present);
        assert!(verification.checks.iter().all(|(_, present)| !present));
    }

    #[tokio::test]
    async fn demo_wardrobe_covers_every_occasion_and_season_filter() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let keys = StorageKeys::default();
        DemoWardrobe::load(store.as_ref(), &keys).await.expect("load");
        let services = WardrobeServices::new(store, keys, RecommendationEngine::new());

        for tag in ["casual", "formal", "party", "summer", "winter"] {
            let outfits = services.outfits.suggestions_matching(&OutfitFilter::parse(tag)).await;
            assert!(!outfits.is_empty(), "expected suggestions for `{tag}`");
        }

        let formal = services
            .outfits
            .suggestions_matching(&OutfitFilter::Occasion(Occasion::Formal))
            .await;
        assert!(formal.iter().all(|outfit| outfit.occasion == Occasion::Formal));
    }
}
