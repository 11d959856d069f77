use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::clothing::{ClothingItem, ParseLabelError, Season};

/// Outfit identity, always `<shirt id>-<pant id>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutfitId(pub String);

impl OutfitId {
    pub fn for_pair(shirt: &ClothingItem, pant: &ClothingItem) -> Self {
        Self(format!("{}-{}", shirt.id, pant.id))
    }
}

impl fmt::Display for OutfitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    Casual,
    Formal,
    Party,
}

impl Occasion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Formal => "formal",
            Self::Party => "party",
        }
    }
}

impl FromStr for Occasion {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "casual" => Ok(Self::Casual),
            "formal" => Ok(Self::Formal),
            "party" => Ok(Self::Party),
            other => Err(ParseLabelError {
                kind: "occasion",
                value: other.to_string(),
                expected: "casual|formal|party",
            }),
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored shirt and pant pairing. Holds owned copies of both items as they
/// were when the outfit was composed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: OutfitId,
    pub shirt: ClothingItem,
    pub pant: ClothingItem,
    pub occasion: Occasion,
    pub season: Season,
    pub match_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_note: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

impl Outfit {
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = favorite;
        self
    }

    pub fn display_name(&self) -> String {
        format!("{} + {}", self.shirt.name, self.pant.name)
    }
}
