//! Outfit matching and recommendation
//!
//! Scores every shirt/pant pairing in a wardrobe with a fixed lookup-table
//! heuristic, labels each pairing with an occasion and a season, and ranks
//! the qualifying pairings.

mod classify;
mod engine;
mod scoring;
mod style_notes;

pub use classify::{classify_occasion, classify_season, OutfitFilter};
pub use engine::RecommendationEngine;
pub use scoring::{ColorGroup, CompatibilityScorer, FabricFamily, MatchBonuses};
pub use style_notes::{StyleNotePicker, STYLE_NOTES};

/// Default score contributions.
pub const DEFAULT_BONUSES: MatchBonuses = MatchBonuses {
    base: 70,
    color: 15,
    same_style: 10,
    smart_casual: 5,
    season: 5,
    fabric: 5,
};

/// Outfits scoring below this are never suggested.
pub const MIN_MATCH_SCORE: u8 = 60;

/// Upper bound of the match score scale.
pub const MAX_MATCH_SCORE: u8 = 100;
