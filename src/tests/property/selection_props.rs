//! Property-based tests for category selection
//!
//! Tests invariants:
//! - The filtered set contains exactly the items in selected categories
//! - Search results are a subset of the categories, in the same order
//! - Any selection change resets the session to page 1

use proptest::prelude::*;

use crate::core::catalog::{selection, CatalogSession, Item, PageSize, SelectionState};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

const CATEGORIES: [&str; 5] = ["Books", "Garden", "Home", "Outdoor", "Toys"];

fn arb_items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(prop::sample::select(CATEGORIES.to_vec()), 0..60).prop_map(|cats| {
        cats.into_iter()
            .zip(1u64..)
            .map(|(cat, id)| Item::new(id, format!("item {id}"), cat))
            .collect()
    })
}

fn arb_toggles() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(CATEGORIES.to_vec()), 0..12)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Filter keeps exactly the items whose category is selected
    #[test]
    fn prop_filter_matches_selection(items in arb_items(), toggles in arb_toggles()) {
        let mut state = SelectionState::new();
        state.seed(&CATEGORIES);
        for cat in &toggles {
            state.toggle(cat, &CATEGORIES);
        }

        let filtered = state.filter(&items);
        prop_assert_eq!(filtered.len(), state.count_matching(&items));
        for item in &items {
            let kept = filtered.iter().any(|f| f.id == item.id);
            prop_assert_eq!(kept, state.is_selected(&item.category));
        }
    }

    /// Property: Search returns an order-preserving subset
    #[test]
    fn prop_search_is_ordered_subset(query in "[a-zA-Z ]{0,4}") {
        let hits = selection::search(&query, &CATEGORIES);
        let mut last = None;
        for hit in &hits {
            let idx = CATEGORIES.iter().position(|c| c == hit);
            prop_assert!(idx.is_some());
            prop_assert!(idx > last, "out of order: {:?}", hits);
            last = idx;
        }
        if query.trim().is_empty() {
            prop_assert_eq!(hits.len(), CATEGORIES.len());
        }
    }

    /// Property: Toggling any present category lands on page 1
    #[test]
    fn prop_toggle_resets_page(items in arb_items(), page in 1usize..20) {
        let mut session = CatalogSession::new(PageSize::Four);
        session.load_catalog(items);
        session.set_page(page);

        let first = session.categories().first().cloned();
        if let Some(category) = first {
            prop_assert!(session.toggle_category(&category));
            prop_assert_eq!(session.pagination().current_page(), 1);
        }
    }
}
