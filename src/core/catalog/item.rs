//! Catalog items and the ordered item store.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A category is a plain string identifier, unique within the catalog.
pub type Category = String;

/// Opaque item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// One catalog entry. `likes`/`dislikes` are only mutated through ledger
/// transitions once the item is in a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub category: Category,
    pub likes: u32,
    pub dislikes: u32,
}

impl Item {
    pub fn new(id: u64, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            category: category.into(),
            likes: 0,
            dislikes: 0,
        }
    }

    pub fn with_counts(mut self, likes: u32, dislikes: u32) -> Self {
        self.likes = likes;
        self.dislikes = dislikes;
        self
    }

    /// Share of likes among all interactions, in percent.
    ///
    /// An item nobody has rated sits at the neutral midpoint (50%).
    pub fn like_percentage(&self) -> f64 {
        let total = u64::from(self.likes) + u64::from(self.dislikes);
        if total == 0 {
            return 50.0;
        }
        f64::from(self.likes) / total as f64 * 100.0
    }
}

/// Ordered item store. Order is the catalog's delivery order and is what
/// the filtered set and page windows are sliced from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog, keeping the first occurrence of any duplicated id.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let mut kept = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.id) {
                kept.push(item);
            } else {
                tracing::warn!(item_id = %item.id, title = %item.title, "Dropping duplicate catalog item");
            }
        }
        Self { items: kept }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Remove an item, preserving the order of the rest.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        self.items
            .iter()
            .map(|item| item.category.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.items.iter().any(|item| item.category == category)
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }
}
