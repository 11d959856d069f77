//! Recommendation engine implementation

use std::sync::Arc;

use chrono::Utc;

use super::classify::{classify_occasion, classify_season, OutfitFilter};
use super::scoring::CompatibilityScorer;
use super::style_notes::StyleNotePicker;
use super::MIN_MATCH_SCORE;
use crate::domain::clothing::{ClothingItem, Wardrobe};
use crate::domain::outfit::{Outfit, OutfitId};
use crate::random::{RandomSource, ThreadRandom};

/// Enumerates, scores, classifies and ranks every shirt/pant pairing.
///
/// Enumeration is pure CPU work over an in-memory wardrobe. The only
/// non-deterministic inputs are the style note, the regenerate pick and the
/// creation timestamp; the first two come from the injected [`RandomSource`].
#[derive(Clone)]
pub struct RecommendationEngine {
    scorer: CompatibilityScorer,
    notes: StyleNotePicker,
    random: Arc<dyn RandomSource>,
    min_score: u8,
}

impl RecommendationEngine {
    /// Engine with default bonuses, threshold and thread entropy
    pub fn new() -> Self {
        Self::with_random(Arc::new(ThreadRandom))
    }

    /// Engine drawing style notes and random picks from `random`
    pub fn with_random(random: Arc<dyn RandomSource>) -> Self {
        Self {
            scorer: CompatibilityScorer::default(),
            notes: StyleNotePicker::new(random.clone()),
            random,
            min_score: MIN_MATCH_SCORE,
        }
    }

    pub fn with_scorer(mut self, scorer: CompatibilityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_min_score(mut self, min_score: u8) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn min_score(&self) -> u8 {
        self.min_score
    }

    pub fn score(&self, shirt: &ClothingItem, pant: &ClothingItem) -> u8 {
        self.scorer.score(shirt, pant)
    }

    /// Composes a fresh, non-favorite outfit with a random style note.
    pub fn create_outfit(&self, shirt: &ClothingItem, pant: &ClothingItem) -> Outfit {
        self.create_outfit_with_note(shirt, pant, self.notes.pick())
    }

    /// Same as [`Self::create_outfit`] with a caller-chosen note.
    pub fn create_outfit_with_note(
        &self,
        shirt: &ClothingItem,
        pant: &ClothingItem,
        style_note: Option<String>,
    ) -> Outfit {
        Outfit {
            id: OutfitId::for_pair(shirt, pant),
            shirt: shirt.clone(),
            pant: pant.clone(),
            occasion: classify_occasion(shirt, pant),
            season: classify_season(shirt, pant),
            match_score: self.scorer.score(shirt, pant),
            style_note,
            is_favorite: false,
            created_at: Utc::now(),
        }
    }

    /// Every pairing scoring at least the threshold, best first. Ties keep
    /// enumeration order (shirts outer, pants inner).
    pub fn generate_suggestions(&self, wardrobe: &Wardrobe) -> Vec<Outfit> {
        let mut outfits: Vec<Outfit> = wardrobe
            .shirts
            .iter()
            .flat_map(|shirt| wardrobe.pants.iter().map(move |pant| (shirt, pant)))
            .map(|(shirt, pant)| self.create_outfit(shirt, pant))
            .filter(|outfit| outfit.match_score >= self.min_score)
            .collect();

        // sort_by is stable
        outfits.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        tracing::debug!(
            event_name = "suggestions.generated",
            shirts = wardrobe.shirts.len(),
            pants = wardrobe.pants.len(),
            kept = outfits.len(),
            "outfit suggestions generated"
        );
        outfits
    }

    /// Ranked suggestions narrowed by an occasion or broad season tag.
    pub fn filter_by_occasion(&self, wardrobe: &Wardrobe, tag: &str) -> Vec<Outfit> {
        self.filter(wardrobe, &OutfitFilter::parse(tag))
    }

    pub fn filter(&self, wardrobe: &Wardrobe, filter: &OutfitFilter) -> Vec<Outfit> {
        self.generate_suggestions(wardrobe)
            .into_iter()
            .filter(|outfit| filter.matches(outfit))
            .collect()
    }

    /// Uniform pick among `outfits`, ignoring rank.
    pub fn pick_random<'a>(&self, outfits: &'a [Outfit]) -> Option<&'a Outfit> {
        self.random.pick(outfits.len()).and_then(|index| outfits.get(index))
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RecommendationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("scorer", &self.scorer)
            .field("min_score", &self.min_score)
            .finish_non_exhaustive()
    }
}
