//! Compatibility scoring for a shirt/pant pair

use crate::domain::clothing::{ClothingItem, Season, StyleType};

use super::MAX_MATCH_SCORE;

const NEUTRAL_COLORS: &[&str] = &["white", "black", "gray", "grey", "beige", "navy"];
const WARM_COLORS: &[&str] = &["red", "orange", "yellow", "pink", "brown"];
const COOL_COLORS: &[&str] = &["blue", "green", "purple", "teal", "cyan"];

const CASUAL_FABRICS: &[&str] = &["cotton", "denim", "jersey", "canvas"];
const FORMAL_FABRICS: &[&str] = &["wool", "silk", "polyester", "linen"];

/// Points contributed by each scoring rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBonuses {
    /// Starting score for every pair (default: 70)
    pub base: i32,
    /// Multiplied by the color compatibility factor (default: 15)
    pub color: i32,
    /// Both items share a style type (default: 10)
    pub same_style: i32,
    /// One casual and one formal item (default: 5)
    pub smart_casual: i32,
    /// Seasons agree or either is `all` (default: 5)
    pub season: i32,
    /// Fabrics fall in the same family (default: 5)
    pub fabric: i32,
}

impl Default for MatchBonuses {
    fn default() -> Self {
        super::DEFAULT_BONUSES
    }
}

/// Color bucket derived from a free-text color label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorGroup {
    Neutral,
    Warm,
    Cool,
    Other,
}

impl ColorGroup {
    /// Buckets a color label by case-insensitive substring match. Groups are
    /// tried neutral, warm, cool, so "navy blue" is neutral.
    pub fn classify(color: &str) -> Self {
        let lower = color.to_lowercase();
        let groups =
            [(Self::Neutral, NEUTRAL_COLORS), (Self::Warm, WARM_COLORS), (Self::Cool, COOL_COLORS)];

        groups
            .into_iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
            .map(|(group, _)| group)
            .unwrap_or(Self::Other)
    }
}

/// Fabric families a label belongs to. A label may hit both families
/// ("cotton linen") or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FabricFamily {
    pub casual: bool,
    pub formal: bool,
}

impl FabricFamily {
    pub fn classify(fabric: &str) -> Self {
        let lower = fabric.to_lowercase();
        Self {
            casual: CASUAL_FABRICS.iter().any(|keyword| lower.contains(keyword)),
            formal: FORMAL_FABRICS.iter().any(|keyword| lower.contains(keyword)),
        }
    }

    pub fn compatible_with(&self, other: &Self) -> bool {
        (self.casual && other.casual) || (self.formal && other.formal)
    }
}

/// Deterministic, side-effect-free pair scorer
#[derive(Debug, Clone, Default)]
pub struct CompatibilityScorer {
    bonuses: MatchBonuses,
}

impl CompatibilityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bonuses(bonuses: MatchBonuses) -> Self {
        Self { bonuses }
    }

    pub fn bonuses(&self) -> &MatchBonuses {
        &self.bonuses
    }

    /// Match score in `0..=100`.
    pub fn score(&self, shirt: &ClothingItem, pant: &ClothingItem) -> u8 {
        let mut score = self.bonuses.base;

        let color_factor = Self::color_compatibility(&shirt.color, &pant.color);
        score += (color_factor * f64::from(self.bonuses.color)).round() as i32;
        score += self.style_bonus(shirt.style, pant.style);

        if Self::seasons_compatible(shirt.season, pant.season) {
            score += self.bonuses.season;
        }
        if Self::fabrics_compatible(&shirt.fabric, &pant.fabric) {
            score += self.bonuses.fabric;
        }

        score.clamp(0, i32::from(MAX_MATCH_SCORE)) as u8
    }

    /// 1.0 when either color is neutral, 0.8 when both share a non-neutral
    /// group (two unrecognized colors included), otherwise 0.6.
    pub fn color_compatibility(first: &str, second: &str) -> f64 {
        let first = ColorGroup::classify(first);
        let second = ColorGroup::classify(second);

        if first == ColorGroup::Neutral || second == ColorGroup::Neutral {
            1.0
        } else if first == second {
            0.8
        } else {
            0.6
        }
    }

    pub fn fabrics_compatible(first: &str, second: &str) -> bool {
        FabricFamily::classify(first).compatible_with(&FabricFamily::classify(second))
    }

    pub fn seasons_compatible(first: Season, second: Season) -> bool {
        first == second || first == Season::All || second == Season::All
    }

    fn style_bonus(&self, first: StyleType, second: StyleType) -> i32 {
        match (first, second) {
            (a, b) if a == b => self.bonuses.same_style,
            (StyleType::Casual, StyleType::Formal) | (StyleType::Formal, StyleType::Casual) => {
                self.bonuses.smart_casual
            }
            _ => 0,
        }
    }
}
