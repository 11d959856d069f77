use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Shirt,
    Pant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleType {
    Casual,
    Formal,
    Party,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    All,
    Summer,
    Winter,
    Spring,
    Fall,
}

/// Error returned when a label does not name a known variant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {kind} `{value}` (expected {expected})")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shirt => "shirt",
            Self::Pant => "pant",
        }
    }
}

impl StyleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Formal => "formal",
            Self::Party => "party",
        }
    }
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Summer => "summer",
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Fall => "fall",
        }
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "shirt" => Ok(Self::Shirt),
            "pant" | "pants" => Ok(Self::Pant),
            other => Err(ParseLabelError {
                kind: "category",
                value: other.to_string(),
                expected: "shirt|pant",
            }),
        }
    }
}

impl FromStr for StyleType {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "casual" => Ok(Self::Casual),
            "formal" => Ok(Self::Formal),
            "party" => Ok(Self::Party),
            other => Err(ParseLabelError {
                kind: "style type",
                value: other.to_string(),
                expected: "casual|formal|party",
            }),
        }
    }
}

impl FromStr for Season {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "summer" => Ok(Self::Summer),
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "fall" => Ok(Self::Fall),
            other => Err(ParseLabelError {
                kind: "season",
                value: other.to_string(),
                expected: "all|summer|winter|spring|fall",
            }),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogued garment. Serialized field names match the stored catalog blob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub color: String,
    #[serde(rename = "type")]
    pub style: StyleType,
    pub fabric: String,
    pub season: Season,
    pub image: String,
    pub date_added: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_worn: Option<DateTime<Utc>>,
    #[serde(default)]
    pub wear_count: u32,
}

/// Caller-authored fields of a new item; id, `date_added` and `wear_count`
/// are assigned by the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClothingItem {
    pub name: String,
    pub category: Category,
    pub color: String,
    pub style: StyleType,
    pub fabric: String,
    pub season: Season,
    pub image: String,
}

impl NewClothingItem {
    pub fn into_item(self, id: ItemId, date_added: DateTime<Utc>) -> ClothingItem {
        ClothingItem {
            id,
            name: self.name,
            category: self.category,
            color: self.color,
            style: self.style,
            fabric: self.fabric,
            season: self.season,
            image: self.image,
            date_added,
            last_worn: None,
            wear_count: 0,
        }
    }
}

/// Field overwrite for an existing item. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItemPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub color: Option<String>,
    pub style: Option<StyleType>,
    pub fabric: Option<String>,
    pub season: Option<Season>,
    pub image: Option<String>,
}

impl ClothingItemPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merges the patch into `item`. A category change is written in place and
    /// does not move the item to the other collection.
    pub fn apply_to(self, item: &mut ClothingItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(color) = self.color {
            item.color = color;
        }
        if let Some(style) = self.style {
            item.style = style;
        }
        if let Some(fabric) = self.fabric {
            item.fabric = fabric;
        }
        if let Some(season) = self.season {
            item.season = season;
        }
        if let Some(image) = self.image {
            item.image = image;
        }
    }
}

/// The catalog blob: every item, partitioned by category at insert time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wardrobe {
    #[serde(default)]
    pub shirts: Vec<ClothingItem>,
    #[serde(default)]
    pub pants: Vec<ClothingItem>,
}

impl Wardrobe {
    pub fn is_empty(&self) -> bool {
        self.shirts.is_empty() && self.pants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shirts.len() + self.pants.len()
    }

    pub fn find(&self, id: &ItemId) -> Option<&ClothingItem> {
        self.shirts.iter().chain(self.pants.iter()).find(|item| &item.id == id)
    }

    /// Shirts are searched before pants.
    pub fn find_mut(&mut self, id: &ItemId) -> Option<&mut ClothingItem> {
        if let Some(index) = self.shirts.iter().position(|item| &item.id == id) {
            return self.shirts.get_mut(index);
        }
        self.pants.iter_mut().find(|item| &item.id == id)
    }

    pub fn insert(&mut self, item: ClothingItem) {
        match item.category {
            Category::Shirt => self.shirts.push(item),
            Category::Pant => self.pants.push(item),
        }
    }

    /// Removes the id from both collections and reports whether anything was dropped.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.len();
        self.shirts.retain(|item| &item.id != id);
        self.pants.retain(|item| &item.id != id);
        before != self.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Category, ClothingItemPatch, ItemId, NewClothingItem, Season, StyleType, Wardrobe};

    fn new_item(name: &str, category: Category) -> NewClothingItem {
        NewClothingItem {
            name: name.to_string(),
            category,
            color: "white".to_string(),
            style: StyleType::Casual,
            fabric: "cotton".to_string(),
            season: Season::All,
            image: "file:///tmp/item.jpg".to_string(),
        }
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("Shirt".parse::<Category>(), Ok(Category::Shirt));
        assert_eq!(" FORMAL ".parse::<StyleType>(), Ok(StyleType::Formal));
        assert_eq!("fall".parse::<Season>(), Ok(Season::Fall));
        assert!("autumn".parse::<Season>().is_err());
    }

    #[test]
    fn item_serializes_with_catalog_field_names() {
        let item = new_item("Oxford", Category::Shirt).into_item(ItemId("1".to_string()), Utc::now());
        let json = serde_json::to_value(&item).expect("serialize item");

        assert_eq!(json["type"], "casual");
        assert_eq!(json["category"], "shirt");
        assert_eq!(json["wearCount"], 0);
        assert!(json.get("dateAdded").is_some());
        assert!(json.get("lastWorn").is_none());
    }

    #[test]
    fn insert_routes_by_category_and_remove_hits_both_collections() {
        let mut wardrobe = Wardrobe::default();
        wardrobe.insert(new_item("Tee", Category::Shirt).into_item(ItemId("s".to_string()), Utc::now()));
        wardrobe.insert(new_item("Chinos", Category::Pant).into_item(ItemId("p".to_string()), Utc::now()));

        assert_eq!(wardrobe.shirts.len(), 1);
        assert_eq!(wardrobe.pants.len(), 1);
        assert!(wardrobe.remove(&ItemId("p".to_string())));
        assert!(!wardrobe.remove(&ItemId("missing".to_string())));
        assert_eq!(wardrobe.len(), 1);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut item = new_item("Tee", Category::Shirt).into_item(ItemId("s".to_string()), Utc::now());
        ClothingItemPatch {
            color: Some("navy".to_string()),
            season: Some(Season::Winter),
            ..ClothingItemPatch::default()
        }
        .apply_to(&mut item);

        assert_eq!(item.name, "Tee");
        assert_eq!(item.color, "navy");
        assert_eq!(item.season, Season::Winter);
        assert_eq!(item.style, StyleType::Casual);
    }
}
