//! Occasion and season labels for a pair, and the occasion/season filter

use std::convert::Infallible;
use std::str::FromStr;

use crate::domain::clothing::{ClothingItem, Season, StyleType};
use crate::domain::outfit::{Occasion, Outfit};

/// `Formal` only when both items are formal; `Party` when either is party;
/// otherwise `Casual`.
pub fn classify_occasion(shirt: &ClothingItem, pant: &ClothingItem) -> Occasion {
    if shirt.style == StyleType::Formal && pant.style == StyleType::Formal {
        return Occasion::Formal;
    }
    if shirt.style == StyleType::Party || pant.style == StyleType::Party {
        return Occasion::Party;
    }
    Occasion::Casual
}

/// When either season is `All` the other item's season wins. Two different
/// specific seasons fall back to `All`, meaning "season-agnostic".
pub fn classify_season(shirt: &ClothingItem, pant: &ClothingItem) -> Season {
    match (shirt.season, pant.season) {
        (Season::All, other) | (other, Season::All) => other,
        (a, b) if a == b => a,
        _ => Season::All,
    }
}

/// Tag accepted by the occasion browser. `summer` and `winter` select the
/// broad season filter; spring and fall are not season tags and, like any
/// other unknown word, match no occasion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutfitFilter {
    Occasion(Occasion),
    BroadSeason(Season),
    Unmatched(String),
}

impl OutfitFilter {
    pub fn parse(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "summer" => return Self::BroadSeason(Season::Summer),
            "winter" => return Self::BroadSeason(Season::Winter),
            _ => {}
        }

        match normalized.parse::<Occasion>() {
            Ok(occasion) => Self::Occasion(occasion),
            Err(_) => Self::Unmatched(normalized),
        }
    }

    pub fn matches(&self, outfit: &Outfit) -> bool {
        match self {
            Self::Occasion(occasion) => outfit.occasion == *occasion,
            Self::BroadSeason(season) => {
                outfit.season == *season
                    || outfit.season == Season::All
                    || outfit.shirt.season == *season
                    || outfit.pant.season == *season
            }
            Self::Unmatched(_) => false,
        }
    }
}

impl FromStr for OutfitFilter {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::clothing::{Category, ItemId};

    fn item(category: Category, style: StyleType, season: Season) -> ClothingItem {
        ClothingItem {
            id: ItemId(format!("{category}-{style}-{season}")),
            name: "item".to_string(),
            category,
            color: "black".to_string(),
            style,
            fabric: "cotton".to_string(),
            season,
            image: String::new(),
            date_added: Utc::now(),
            last_worn: None,
            wear_count: 0,
        }
    }

    fn shirt(style: StyleType, season: Season) -> ClothingItem {
        item(Category::Shirt, style, season)
    }

    fn pant(style: StyleType, season: Season) -> ClothingItem {
        item(Category::Pant, style, season)
    }

    #[test]
    fn occasion_rules() {
        let all = Season::All;
        assert_eq!(
            classify_occasion(&shirt(StyleType::Formal, all), &pant(StyleType::Formal, all)),
            Occasion::Formal
        );
        assert_eq!(
            classify_occasion(&shirt(StyleType::Party, all), &pant(StyleType::Casual, all)),
            Occasion::Party
        );
        assert_eq!(
            classify_occasion(&shirt(StyleType::Formal, all), &pant(StyleType::Party, all)),
            Occasion::Party
        );
        assert_eq!(
            classify_occasion(&shirt(StyleType::Casual, all), &pant(StyleType::Casual, all)),
            Occasion::Casual
        );
        assert_eq!(
            classify_occasion(&shirt(StyleType::Casual, all), &pant(StyleType::Formal, all)),
            Occasion::Casual
        );
    }

    #[test]
    fn season_rules() {
        let casual = StyleType::Casual;
        assert_eq!(
            classify_season(&shirt(casual, Season::All), &pant(casual, Season::Summer)),
            Season::Summer
        );
        assert_eq!(
            classify_season(&shirt(casual, Season::Fall), &pant(casual, Season::All)),
            Season::Fall
        );
        assert_eq!(
            classify_season(&shirt(casual, Season::All), &pant(casual, Season::All)),
            Season::All
        );
        assert_eq!(
            classify_season(&shirt(casual, Season::Summer), &pant(casual, Season::Summer)),
            Season::Summer
        );
        assert_eq!(
            classify_season(&shirt(casual, Season::Summer), &pant(casual, Season::Winter)),
            Season::All
        );
    }

    #[test]
    fn filter_parsing() {
        assert_eq!(OutfitFilter::parse("Winter"), OutfitFilter::BroadSeason(Season::Winter));
        assert_eq!(OutfitFilter::parse("party"), OutfitFilter::Occasion(Occasion::Party));
        assert_eq!(OutfitFilter::parse("spring"), OutfitFilter::Unmatched("spring".to_string()));
    }
}
