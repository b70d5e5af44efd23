//! Property-based tests for pagination arithmetic
//!
//! Tests invariants:
//! - `total_pages == ceil(total_items / items_per_page)`
//! - `1 <= current_page <= max(total_pages, 1)` after any operation
//! - The visible window never exceeds the page size and matches the range summary

use proptest::prelude::*;

use crate::core::catalog::{PageSize, PaginationState};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_page_size() -> impl Strategy<Value = PageSize> {
    prop::sample::select(PageSize::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum Op {
    SetTotal(usize),
    SetPage(usize),
    Size(PageSize),
    Next,
    Prev,
    First,
    Last,
    Reset,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..200).prop_map(Op::SetTotal),
        (0usize..60).prop_map(Op::SetPage),
        arb_page_size().prop_map(Op::Size),
        Just(Op::Next),
        Just(Op::Prev),
        Just(Op::First),
        Just(Op::Last),
        Just(Op::Reset),
    ]
}

fn apply(state: PaginationState, op: &Op) -> PaginationState {
    match op {
        Op::SetTotal(n) => state.set_total_items(*n),
        Op::SetPage(p) => state.set_current_page(*p),
        Op::Size(size) => state.with_page_size(*size),
        Op::Next => state.next(),
        Op::Prev => state.prev(),
        Op::First => state.first(),
        Op::Last => state.last(),
        Op::Reset => state.reset(),
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Page count is the ceiling of items over page size
    #[test]
    fn prop_page_count_is_ceiling(total in 0usize..10_000, size in arb_page_size()) {
        let state = PaginationState::new(size).set_total_items(total);
        let per_page = size.get();
        prop_assert_eq!(state.total_pages(), (total + per_page - 1) / per_page);
    }

    /// Property: Current page stays in bounds across any operation sequence
    #[test]
    fn prop_current_page_in_bounds(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut state = PaginationState::default();
        for op in &ops {
            state = apply(state, op);
            prop_assert!(state.current_page() >= 1, "page 0 after {:?}", op);
            prop_assert!(
                state.current_page() <= state.total_pages().max(1),
                "page {} beyond {} after {:?}",
                state.current_page(),
                state.total_pages(),
                op
            );
        }
    }

    /// Property: The visible window matches the range summary
    #[test]
    fn prop_window_matches_range(
        total in 0usize..120,
        size in arb_page_size(),
        page in 0usize..40,
    ) {
        let items: Vec<usize> = (0..total).collect();
        let state = PaginationState::new(size).set_total_items(total).set_current_page(page);
        let window = state.visible_slice(&items);

        prop_assert!(window.len() <= size.get());
        match state.range() {
            Some(range) => {
                prop_assert_eq!(window.len(), range.end - range.start + 1);
                prop_assert_eq!(window.first().copied(), Some(range.start - 1));
            }
            None => prop_assert!(window.is_empty()),
        }
    }

    /// Property: Next then prev returns to the same page when a next page exists
    #[test]
    fn prop_next_prev_roundtrip(total in 1usize..200, size in arb_page_size(), page in 1usize..50) {
        let state = PaginationState::new(size).set_total_items(total).set_current_page(page);
        if state.has_next() {
            prop_assert_eq!(state.next().prev(), state);
        } else {
            prop_assert_eq!(state.next(), state);
        }
    }
}
