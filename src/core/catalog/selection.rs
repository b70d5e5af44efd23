//! Category selection: which categories are currently visible.
//!
//! Empty-selection policy: before the selection has been seeded it is a
//! pass-through (the catalog is shown unfiltered) and `selected` is empty.
//! Seeding or any explicit change initializes it; from then on an empty
//! selection means "show nothing".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::item::{Category, Item};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: BTreeSet<Category>,
    initialized: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &BTreeSet<Category> {
        &self.selected
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.selected.contains(category)
    }

    /// Select every supplied category, once. Later calls are no-ops so a
    /// catalog reload cannot clobber what the user picked.
    pub fn seed<S: AsRef<str>>(&mut self, categories: &[S]) -> bool {
        if self.initialized {
            return false;
        }
        self.selected = categories.iter().map(|c| c.as_ref().to_string()).collect();
        self.initialized = true;
        true
    }

    /// Flip membership of `category`. Categories unknown to the catalog are
    /// ignored.
    ///
    /// Toggling an unseeded selection starts from "everything in `known`
    /// selected", which is what the pass-through filter was showing.
    pub fn toggle<S: AsRef<str>>(&mut self, category: &str, known: &[S]) -> bool {
        if !known.iter().any(|k| k.as_ref() == category) {
            tracing::debug!(category, "Ignoring toggle of unknown category");
            return false;
        }
        self.seed(known);
        if !self.selected.remove(category) {
            self.selected.insert(category.to_string());
        }
        true
    }

    /// Select exactly `categories`. No-op when already equal.
    pub fn select_all<S: AsRef<str>>(&mut self, categories: &[S]) -> bool {
        let all: BTreeSet<Category> = categories.iter().map(|c| c.as_ref().to_string()).collect();
        if self.initialized && self.selected == all {
            return false;
        }
        self.selected = all;
        self.initialized = true;
        true
    }

    pub fn clear_all(&mut self) -> bool {
        if self.initialized && self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        self.initialized = true;
        true
    }

    /// Install a selection persisted from an earlier session. Categories
    /// that are no longer in the catalog are dropped.
    pub fn restore<S: AsRef<str>>(&mut self, categories: &[S], known: &[S]) {
        self.selected = categories
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| known.iter().any(|k| k.as_ref() == *c))
            .map(str::to_string)
            .collect();
        self.initialized = true;
    }

    /// Drop selected categories that are not in `known`; returns the ones
    /// dropped.
    pub fn retain_known<S: AsRef<str>>(&mut self, known: &[S]) -> Vec<Category> {
        let dropped: Vec<Category> = self
            .selected
            .iter()
            .filter(|c| !known.iter().any(|k| k.as_ref() == c.as_str()))
            .cloned()
            .collect();
        for category in &dropped {
            self.selected.remove(category);
        }
        dropped
    }

    /// Items whose category is selected, in catalog order.
    pub fn filter<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        if !self.initialized {
            return items.iter().collect();
        }
        items
            .iter()
            .filter(|item| self.selected.contains(&item.category))
            .collect()
    }

    /// Number of items [`filter`](Self::filter) would return.
    pub fn count_matching(&self, items: &[Item]) -> usize {
        if !self.initialized {
            return items.len();
        }
        items
            .iter()
            .filter(|item| self.selected.contains(&item.category))
            .count()
    }
}

/// Case-insensitive substring search over category names, for display
/// only. A blank query matches everything.
pub fn search<'a, S: AsRef<str>>(query: &str, categories: &'a [S]) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    categories
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| needle.is_empty() || c.to_lowercase().contains(&needle))
        .collect()
}
