//! Catalog data source.
//!
//! Catalogs are JSON arrays of `{id, title, category, likes, dislikes}`.
//! Ids may arrive as numbers or numeric strings. Counters are normalized
//! on the way in: negative values become 0, missing values default to 0.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::{CatalogError, Result};
use super::item::{Item, ItemId};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn parse(self) -> Result<ItemId> {
        match self {
            Self::Number(n) => Ok(ItemId(n)),
            Self::Text(s) => s
                .trim()
                .parse::<u64>()
                .map(ItemId)
                .map_err(|_| CatalogError::InvalidItemId(s)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: RawId,
    title: String,
    category: String,
    #[serde(default)]
    likes: i64,
    #[serde(default)]
    dislikes: i64,
}

fn clamp_count(raw: i64) -> u32 {
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

impl RawItem {
    fn into_item(self) -> Result<Item> {
        if self.likes < 0 || self.dislikes < 0 {
            tracing::warn!(
                title = %self.title,
                likes = self.likes,
                dislikes = self.dislikes,
                "Clamping negative counters to zero"
            );
        }
        Ok(Item {
            id: self.id.parse()?,
            title: self.title,
            category: self.category.trim().to_string(),
            likes: clamp_count(self.likes),
            dislikes: clamp_count(self.dislikes),
        })
    }
}

/// Parse a JSON catalog document.
pub fn parse_catalog(json: &str) -> Result<Vec<Item>> {
    let raw: Vec<RawItem> = serde_json::from_str(json)?;
    raw.into_iter().map(RawItem::into_item).collect()
}

/// Read and parse a JSON catalog file.
pub async fn load_catalog_file(path: &Path) -> Result<Vec<Item>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::io(path, e))?;
    let items = parse_catalog(&contents)?;
    tracing::debug!(path = %path.display(), count = items.len(), "Read catalog file");
    Ok(items)
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The built-in demo catalog.
    Sample,
    File(PathBuf),
}

impl CatalogSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Sample, Self::File)
    }

    pub async fn fetch(&self) -> Result<Vec<Item>> {
        match self {
            Self::Sample => Ok(sample_catalog()),
            Self::File(path) => load_catalog_file(path).await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Sample => "built-in sample catalog".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Demo catalog used when no catalog file is configured.
pub fn sample_catalog() -> Vec<Item> {
    const ROWS: &[(&str, &str, u32, u32)] = &[
        ("Wireless Earbuds", "Electronics", 128, 14),
        ("Mechanical Keyboard", "Electronics", 96, 9),
        ("Noise-Cancelling Headphones", "Electronics", 210, 31),
        ("Smart Watch", "Electronics", 77, 22),
        ("USB-C Hub", "Electronics", 45, 6),
        ("Portable Charger", "Electronics", 61, 4),
        ("Linen Shirt", "Clothing", 34, 5),
        ("Denim Jacket", "Clothing", 52, 12),
        ("Wool Scarf", "Clothing", 19, 2),
        ("Running Shorts", "Clothing", 28, 7),
        ("Cast Iron Skillet", "Home & Kitchen", 143, 8),
        ("Pour-Over Coffee Set", "Home & Kitchen", 88, 10),
        ("Ceramic Planter", "Home & Kitchen", 23, 3),
        ("Chef's Knife", "Home & Kitchen", 119, 15),
        ("Bamboo Cutting Board", "Home & Kitchen", 40, 1),
        ("Trail Running Shoes", "Sports", 74, 18),
        ("Yoga Mat", "Sports", 66, 5),
        ("Adjustable Dumbbells", "Sports", 92, 11),
        ("Camping Hammock", "Sports", 37, 4),
        ("Field Notes Journal", "Books", 15, 0),
        ("Rust in Action", "Books", 58, 3),
        ("Illustrated Atlas", "Books", 21, 2),
        ("Board Game Classics", "Toys", 49, 6),
        ("Wooden Puzzle Box", "Toys", 12, 1),
    ];

    ROWS.iter()
        .zip(1u64..)
        .map(|(&(title, category, likes, dislikes), id)| {
            Item::new(id, title, category).with_counts(likes, dislikes)
        })
        .collect()
}
