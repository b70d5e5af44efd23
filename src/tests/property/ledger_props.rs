//! Property-based tests for the interaction ledger
//!
//! Tests invariants:
//! - Counters move by exactly the transition deltas and never go negative
//! - Applying the same action twice follows the transition table round trip
//! - An item's contribution is at most one like or one dislike, never both

use proptest::prelude::*;

use crate::core::catalog::{InteractionAction, InteractionLedger, InteractionStatus, Item, ItemId};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_action() -> impl Strategy<Value = InteractionAction> {
    prop_oneof![Just(InteractionAction::Like), Just(InteractionAction::Dislike)]
}

fn arb_item() -> impl Strategy<Value = Item> {
    (0u32..1_000, 0u32..1_000)
        .prop_map(|(likes, dislikes)| Item::new(1, "Widget", "Gadgets").with_counts(likes, dislikes))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Same action twice is an exact undo from `None` or from the
    /// status that action produces; from the opposite status it lands on `None`
    #[test]
    fn prop_double_action_round_trip(
        item in arb_item(),
        prefix in prop::collection::vec(arb_action(), 0..6),
        action in arb_action(),
    ) {
        let base = (item.likes, item.dislikes);
        let mut ledger = InteractionLedger::new();
        let mut item = item;
        for a in &prefix {
            ledger.apply(item.id, *a).apply_to(&mut item);
        }
        let before = (ledger.status(item.id), item.likes, item.dislikes);

        ledger.apply(item.id, action).apply_to(&mut item);
        ledger.apply(item.id, action).apply_to(&mut item);
        let after = (ledger.status(item.id), item.likes, item.dislikes);

        let undoes = matches!(
            (before.0, action),
            (InteractionStatus::None, _)
                | (InteractionStatus::Liked, InteractionAction::Like)
                | (InteractionStatus::Disliked, InteractionAction::Dislike)
        );
        if undoes {
            prop_assert_eq!(after, before);
        } else {
            prop_assert_eq!(after, (InteractionStatus::None, base.0, base.1));
        }
    }

    /// Property: Net counter change equals the current status contribution
    #[test]
    fn prop_contribution_is_exclusive(
        item in arb_item(),
        actions in prop::collection::vec(arb_action(), 0..30),
    ) {
        let (base_likes, base_dislikes) = (item.likes, item.dislikes);
        let mut ledger = InteractionLedger::new();
        let mut item = item;
        for a in &actions {
            ledger.apply(item.id, *a).apply_to(&mut item);
        }

        let (likes, dislikes) = match ledger.status(item.id) {
            InteractionStatus::None => (0, 0),
            InteractionStatus::Liked => (1, 0),
            InteractionStatus::Disliked => (0, 1),
        };
        prop_assert_eq!(item.likes, base_likes + likes);
        prop_assert_eq!(item.dislikes, base_dislikes + dislikes);
    }

    /// Property: Counters never underflow, even from a desynced status
    #[test]
    fn prop_counters_floor_at_zero(
        start in prop_oneof![Just(InteractionStatus::Liked), Just(InteractionStatus::Disliked)],
        actions in prop::collection::vec(arb_action(), 1..10),
    ) {
        let mut item = Item::new(9, "Ghost", "Misc");
        let mut ledger = InteractionLedger::new();
        ledger.restore(ItemId(9), start);
        for a in &actions {
            let transition = ledger.apply(item.id, *a);
            let (likes, dislikes) = (i64::from(item.likes), i64::from(item.dislikes));
            transition.apply_to(&mut item);
            prop_assert_eq!(i64::from(item.likes), (likes + i64::from(transition.likes_delta)).max(0));
            prop_assert_eq!(i64::from(item.dislikes), (dislikes + i64::from(transition.dislikes_delta)).max(0));
        }
    }
}
