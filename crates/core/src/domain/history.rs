use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::outfit::Outfit;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WearHistoryId(pub String);

/// One wear event. Entries are immutable once recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WearHistoryEntry {
    pub id: WearHistoryId,
    pub outfit: Outfit,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Optional annotations captured with a wear event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WearDetails {
    pub notes: Option<String>,
    pub rating: Option<u8>,
}

impl WearDetails {
    pub const MAX_RATING: u8 = 5;

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Ratings outside `1..=5` are dropped rather than rejected.
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = (1..=Self::MAX_RATING).contains(&rating).then_some(rating);
        self
    }
}
