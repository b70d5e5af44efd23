//! Like/dislike ledger.
//!
//! Each item carries exactly one [`InteractionStatus`]. The status is the
//! source of truth: a transition is computed from the recorded status
//! alone, and the item's `likes`/`dislikes` counters are a projection of
//! the deltas it produces.
//!
//! | current  | action  | next     | likes | dislikes |
//! |----------|---------|----------|-------|----------|
//! | none     | like    | liked    | +1    | 0        |
//! | none     | dislike | disliked | 0     | +1       |
//! | liked    | like    | none     | -1    | 0        |
//! | liked    | dislike | disliked | -1    | +1       |
//! | disliked | like    | liked    | +1    | -1       |
//! | disliked | dislike | none     | 0     | -1       |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionStatus {
    #[default]
    None,
    Liked,
    Disliked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAction {
    Like,
    Dislike,
}

/// Outcome of one ledger step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub status: InteractionStatus,
    pub likes_delta: i8,
    pub dislikes_delta: i8,
}

impl Transition {
    const fn new(status: InteractionStatus, likes_delta: i8, dislikes_delta: i8) -> Self {
        Self {
            status,
            likes_delta,
            dislikes_delta,
        }
    }

    /// Apply the deltas to an item's counters, flooring at zero.
    pub fn apply_to(&self, item: &mut Item) {
        item.likes = shift(item.likes, self.likes_delta);
        item.dislikes = shift(item.dislikes, self.dislikes_delta);
    }
}

fn shift(count: u32, delta: i8) -> u32 {
    if delta >= 0 {
        count.saturating_add(u32::from(delta.unsigned_abs()))
    } else {
        count.saturating_sub(u32::from(delta.unsigned_abs()))
    }
}

impl InteractionStatus {
    pub fn transition(self, action: InteractionAction) -> Transition {
        use InteractionAction::{Dislike, Like};

        match (self, action) {
            (Self::None, Like) => Transition::new(Self::Liked, 1, 0),
            (Self::None, Dislike) => Transition::new(Self::Disliked, 0, 1),
            (Self::Liked, Like) => Transition::new(Self::None, -1, 0),
            (Self::Liked, Dislike) => Transition::new(Self::Disliked, -1, 1),
            (Self::Disliked, Like) => Transition::new(Self::Liked, 1, -1),
            (Self::Disliked, Dislike) => Transition::new(Self::None, 0, -1),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Liked => "liked",
            Self::Disliked => "disliked",
        }
    }
}

/// Per-item interaction statuses. Items without an entry are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionLedger {
    statuses: HashMap<ItemId, InteractionStatus>,
}

impl InteractionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, id: ItemId) -> InteractionStatus {
        self.statuses.get(&id).copied().unwrap_or_default()
    }

    /// Step the item's status and return the transition. The caller applies
    /// the counter deltas to the item.
    pub fn apply(&mut self, id: ItemId, action: InteractionAction) -> Transition {
        let transition = self.status(id).transition(action);
        self.set(id, transition.status);
        tracing::debug!(
            item_id = %id,
            ?action,
            status = transition.status.label(),
            "Interaction recorded"
        );
        transition
    }

    /// Install a status without producing counter deltas.
    pub fn restore(&mut self, id: ItemId, status: InteractionStatus) {
        self.set(id, status);
    }

    pub fn forget(&mut self, id: ItemId) -> InteractionStatus {
        self.statuses.remove(&id).unwrap_or_default()
    }

    /// Drop records for items `keep` rejects.
    pub fn retain(&mut self, mut keep: impl FnMut(ItemId) -> bool) {
        self.statuses.retain(|id, _| keep(*id));
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, InteractionStatus)> + '_ {
        self.statuses.iter().map(|(id, status)| (*id, *status))
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    fn set(&mut self, id: ItemId, status: InteractionStatus) {
        if status == InteractionStatus::None {
            self.statuses.remove(&id);
        } else {
            self.statuses.insert(id, status);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::InteractionAction::{Dislike, Like};
    use super::InteractionStatus::{Disliked, Liked};
    use super::*;

    #[rstest]
    #[case(InteractionStatus::None, Like, Liked, 1, 0)]
    #[case(InteractionStatus::None, Dislike, Disliked, 0, 1)]
    #[case(Liked, Like, InteractionStatus::None, -1, 0)]
    #[case(Liked, Dislike, Disliked, -1, 1)]
    #[case(Disliked, Like, Liked, 1, -1)]
    #[case(Disliked, Dislike, InteractionStatus::None, 0, -1)]
    fn test_transition_table(
        #[case] from: InteractionStatus,
        #[case] action: InteractionAction,
        #[case] to: InteractionStatus,
        #[case] likes: i8,
        #[case] dislikes: i8,
    ) {
        let t = from.transition(action);
        assert_eq!(t.status, to);
        assert_eq!(t.likes_delta, likes);
        assert_eq!(t.dislikes_delta, dislikes);
    }

    #[test]
    fn test_same_action_twice_is_a_toggle() {
        let mut ledger = InteractionLedger::new();
        let id = ItemId(7);
        assert_eq!(ledger.apply(id, Like).status, Liked);
        assert_eq!(ledger.apply(id, Like).status, InteractionStatus::None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_switching_moves_one_count() {
        let mut item = Item::new(1, "Lamp", "Home").with_counts(3, 1);
        let mut ledger = InteractionLedger::new();

        ledger.apply(item.id, Dislike).apply_to(&mut item);
        assert_eq!(ledger.status(item.id), Disliked);
        assert_eq!((item.likes, item.dislikes), (3, 2));

        ledger.apply(item.id, Like).apply_to(&mut item);
        assert_eq!(ledger.status(item.id), Liked);
        assert_eq!((item.likes, item.dislikes), (4, 1));
    }

    #[test]
    fn test_counters_floor_at_zero() {
        let mut item = Item::new(1, "Lamp", "Home");
        let mut ledger = InteractionLedger::new();
        ledger.restore(item.id, Liked);

        ledger.apply(item.id, Dislike).apply_to(&mut item);
        assert_eq!((item.likes, item.dislikes), (0, 1));
    }

    #[test]
    fn test_counters_saturate_at_max() {
        let mut item = Item::new(1, "Lamp", "Home").with_counts(u32::MAX, 0);
        InteractionStatus::None.transition(Like).apply_to(&mut item);
        assert_eq!(item.likes, u32::MAX);
    }

    #[test]
    fn test_forget_and_retain() {
        let mut ledger = InteractionLedger::new();
        ledger.apply(ItemId(1), Like);
        ledger.apply(ItemId(2), Dislike);
        ledger.apply(ItemId(3), Like);

        assert_eq!(ledger.forget(ItemId(1)), Liked);
        assert_eq!(ledger.forget(ItemId(1)), InteractionStatus::None);

        ledger.retain(|id| id != ItemId(2));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.status(ItemId(3)), Liked);
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Disliked).unwrap(), "\"disliked\"");
        let parsed: InteractionStatus = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, InteractionStatus::None);
    }
}
