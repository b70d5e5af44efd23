//! Session controller tying selection, pagination and the ledger together.
//!
//! All three state objects are owned here and only mutated through the
//! methods below. Every mutation that can change the filtered count
//! recomputes pagination before returning, so callers never observe a
//! page count that disagrees with the filtered set.

use super::error::Result;
use super::item::{Catalog, Category, Item, ItemId};
use super::ledger::{InteractionAction, InteractionLedger, InteractionStatus, Transition};
use super::pagination::{PageRange, PageSize, PaginationState};
use super::selection::{self, SelectionState};

/// Read-only view of the session state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub loaded: bool,
    pub selection: SelectionState,
    pub pagination: PaginationState,
}

#[derive(Debug, Clone)]
pub struct CatalogSession {
    catalog: Option<Catalog>,
    categories: Vec<Category>,
    selection: SelectionState,
    pagination: PaginationState,
    ledger: InteractionLedger,
    default_page_size: PageSize,
}

impl Default for CatalogSession {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl CatalogSession {
    pub fn new(default_page_size: PageSize) -> Self {
        Self {
            catalog: None,
            categories: Vec::new(),
            selection: SelectionState::new(),
            pagination: PaginationState::new(default_page_size),
            ledger: InteractionLedger::new(),
            default_page_size,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Whether the catalog has been delivered at least once.
    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn items(&self) -> &[Item] {
        self.catalog.as_ref().map(Catalog::items).unwrap_or_default()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.catalog.as_ref()?.get(id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn ledger(&self) -> &InteractionLedger {
        &self.ledger
    }

    pub fn status(&self, id: ItemId) -> InteractionStatus {
        self.ledger.status(id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            loaded: self.is_loaded(),
            selection: self.selection.clone(),
            pagination: self.pagination,
        }
    }

    // ── Derived views ───────────────────────────────────────────────────

    pub fn filtered_items(&self) -> Vec<&Item> {
        self.selection.filter(self.items())
    }

    /// The page window of the filtered set.
    pub fn visible_page(&self) -> Vec<&Item> {
        let filtered = self.filtered_items();
        self.pagination.visible_slice(&filtered).to_vec()
    }

    pub fn page_range(&self) -> Option<PageRange> {
        self.pagination.range()
    }

    pub fn search_categories(&self, query: &str) -> Vec<&str> {
        selection::search(query, &self.categories)
    }

    // ── Catalog delivery ────────────────────────────────────────────────

    /// Install (or reinstall) the catalog and re-derive everything from it.
    ///
    /// The selection is seeded with every category on the first delivery
    /// that has any; later deliveries keep the user's selection, minus
    /// categories that no longer exist.
    pub fn load_catalog(&mut self, items: Vec<Item>) {
        let catalog = Catalog::from_items(items);
        self.categories = catalog.categories();

        if !self.categories.is_empty() && self.selection.seed(&self.categories) {
            tracing::debug!(count = self.categories.len(), "Seeded category selection");
        }
        let dropped = self.selection.retain_known(&self.categories);
        if !dropped.is_empty() {
            tracing::debug!(?dropped, "Deselected categories missing from reloaded catalog");
        }

        self.ledger.retain(|id| catalog.get(id).is_some());
        tracing::info!(
            items = catalog.len(),
            categories = self.categories.len(),
            "Catalog loaded"
        );
        self.catalog = Some(catalog);

        // Counters arrive fresh; re-project the statuses we kept onto them.
        let carried: Vec<(ItemId, InteractionStatus)> = self.ledger.iter().collect();
        if !carried.is_empty() {
            tracing::debug!(count = carried.len(), "Replaying interactions onto reloaded counters");
        }
        for (id, status) in carried {
            self.restore_interaction(id, status);
        }

        self.recompute();
    }

    // ── Category selection ──────────────────────────────────────────────

    pub fn toggle_category(&mut self, category: &str) -> bool {
        let changed = self.selection.toggle(category, &self.categories);
        self.after_selection_change(changed);
        changed
    }

    /// No-op until the catalog has categories, so the first delivery
    /// still seeds.
    pub fn select_all(&mut self) -> bool {
        if self.categories.is_empty() {
            return false;
        }
        let changed = self.selection.select_all(&self.categories);
        self.after_selection_change(changed);
        changed
    }

    pub fn clear_all(&mut self) -> bool {
        if self.categories.is_empty() {
            return false;
        }
        let changed = self.selection.clear_all();
        self.after_selection_change(changed);
        changed
    }

    /// Install a selection persisted by an earlier session.
    pub fn restore_selection(&mut self, categories: &[Category]) {
        self.selection.restore(categories, &self.categories);
        self.after_selection_change(true);
    }

    fn after_selection_change(&mut self, changed: bool) {
        if changed {
            self.pagination = self.pagination.first();
            self.recompute();
        }
    }

    // ── Pagination ──────────────────────────────────────────────────────

    pub fn set_items_per_page(&mut self, size: usize) -> Result<()> {
        self.pagination = self.pagination.set_items_per_page(size)?;
        Ok(())
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.pagination = self.pagination.with_page_size(page_size);
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination = self.pagination.set_current_page(page);
    }

    pub fn next_page(&mut self) {
        self.pagination = self.pagination.next();
    }

    pub fn prev_page(&mut self) {
        self.pagination = self.pagination.prev();
    }

    pub fn first_page(&mut self) {
        self.pagination = self.pagination.first();
    }

    pub fn last_page(&mut self) {
        self.pagination = self.pagination.last();
    }

    /// Restore default pagination against the current filtered count.
    pub fn reset_pagination(&mut self) {
        self.pagination = self.pagination.reset().with_page_size(self.default_page_size);
        self.recompute();
    }

    // ── Interactions ────────────────────────────────────────────────────

    /// Like or dislike an item, updating its counters. Unknown ids are
    /// ignored.
    pub fn interact(&mut self, id: ItemId, action: InteractionAction) -> Option<Transition> {
        let item = self.catalog.as_mut()?.get_mut(id)?;
        let transition = self.ledger.apply(id, action);
        transition.apply_to(item);
        Some(transition)
    }

    /// Install a persisted status, replaying its counter contribution onto
    /// the freshly delivered counts. Unknown ids are ignored.
    pub fn restore_interaction(&mut self, id: ItemId, status: InteractionStatus) {
        let Some(item) = self.catalog.as_mut().and_then(|c| c.get_mut(id)) else {
            return;
        };
        let replay = match status {
            InteractionStatus::None => return,
            InteractionStatus::Liked => InteractionAction::Like,
            InteractionStatus::Disliked => InteractionAction::Dislike,
        };
        self.ledger.forget(id);
        self.ledger.apply(id, replay).apply_to(item);
    }

    // ── Removal cascade ─────────────────────────────────────────────────

    /// Remove an item and cascade: categories left without items are
    /// deselected, the interaction record is dropped, pagination is
    /// recomputed, and if the current page window ends up empty the view
    /// steps back one page.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let removed = self.catalog.as_mut()?.remove(id)?;
        self.ledger.forget(id);

        if let Some(catalog) = &self.catalog {
            self.categories = catalog.categories();
        }
        let dropped = self.selection.retain_known(&self.categories);
        if !dropped.is_empty() {
            tracing::debug!(?dropped, "Deselected categories with no remaining items");
        }

        self.recompute();
        // Normally already handled by the clamp in `recompute`.
        if self.visible_page().is_empty() && self.pagination.current_page() > 1 {
            self.pagination = self.pagination.prev();
        }

        tracing::info!(item_id = %id, title = %removed.title, "Item removed");
        Some(removed)
    }

    /// Push the current filtered count into pagination.
    fn recompute(&mut self) {
        let count = self.selection.count_matching(self.items());
        self.pagination = self.pagination.set_total_items(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(rows: &[(u64, &str)]) -> Vec<Item> {
        rows.iter()
            .map(|(id, cat)| Item::new(*id, format!("item {id}"), *cat))
            .collect()
    }

    fn ten_a_items() -> Vec<Item> {
        (1..=10).map(|id| Item::new(id, format!("a{id}"), "A")).collect()
    }

    #[test]
    fn test_not_loaded_is_empty_and_safe() {
        let mut session = CatalogSession::default();
        assert!(!session.is_loaded());
        assert!(session.visible_page().is_empty());
        assert!(!session.toggle_category("A"));
        assert!(session.interact(ItemId(1), InteractionAction::Like).is_none());
        assert!(session.remove_item(ItemId(1)).is_none());
        session.next_page();
        assert_eq!(session.pagination().current_page(), 1);
    }

    #[test]
    fn test_load_seeds_once() {
        let mut session = CatalogSession::default();
        session.load_catalog(items(&[(1, "A"), (2, "B")]));
        assert_eq!(session.selection().selected().len(), 2);

        session.toggle_category("B");
        session.load_catalog(items(&[(1, "A"), (2, "B"), (3, "B")]));
        assert!(!session.selection().is_selected("B"));
        assert_eq!(session.filtered_items().len(), 1);
    }

    #[test]
    fn test_empty_catalog_does_not_seed() {
        let mut session = CatalogSession::default();
        session.load_catalog(Vec::new());
        assert!(session.is_loaded());
        assert!(!session.selection().is_initialized());

        session.load_catalog(items(&[(1, "A")]));
        assert!(session.selection().is_selected("A"));
        assert_eq!(session.visible_page().len(), 1);
    }

    #[test]
    fn test_reload_drops_vanished_categories_and_records() {
        let mut session = CatalogSession::default();
        session.load_catalog(items(&[(1, "A"), (2, "B")]));
        session.interact(ItemId(2), InteractionAction::Like);

        session.load_catalog(items(&[(1, "A")]));
        assert!(!session.selection().is_selected("B"));
        assert_eq!(session.status(ItemId(2)), InteractionStatus::None);
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_reload_keeps_counters_in_step_with_status() {
        let fresh = || vec![Item::new(1, "Lamp", "A").with_counts(5, 2)];
        let mut session = CatalogSession::default();
        session.load_catalog(fresh());
        session.interact(ItemId(1), InteractionAction::Like);

        session.load_catalog(fresh());
        assert_eq!(session.status(ItemId(1)), InteractionStatus::Liked);
        assert_eq!(session.item(ItemId(1)).map(|i| i.likes), Some(6));

        session.interact(ItemId(1), InteractionAction::Like);
        let item = session.item(ItemId(1)).unwrap();
        assert_eq!((item.likes, item.dislikes), (5, 2));
        assert_eq!(session.status(ItemId(1)), InteractionStatus::None);
    }

    #[test]
    fn test_reload_replays_dislike() {
        let fresh = || vec![Item::new(1, "Lamp", "A").with_counts(5, 2)];
        let mut session = CatalogSession::default();
        session.load_catalog(fresh());
        session.interact(ItemId(1), InteractionAction::Dislike);
        session.load_catalog(fresh());

        session.interact(ItemId(1), InteractionAction::Like);
        let item = session.item(ItemId(1)).unwrap();
        assert_eq!((item.likes, item.dislikes), (6, 2));
    }

    #[test]
    fn test_selection_calls_before_categories_do_not_block_seed() {
        let mut session = CatalogSession::default();
        assert!(!session.select_all());
        assert!(!session.clear_all());
        assert!(!session.toggle_category("A"));

        session.load_catalog(Vec::new());
        assert!(!session.clear_all());
        assert!(!session.selection().is_initialized());

        session.load_catalog(items(&[(1, "A"), (2, "B")]));
        assert!(session.selection().is_selected("A"));
        assert_eq!(session.visible_page().len(), 2);
    }

    #[test]
    fn test_select_all_then_clear_all_shows_nothing() {
        let mut session = CatalogSession::default();
        session.load_catalog(items(&[(1, "A"), (2, "B"), (3, "C")]));
        session.select_all();
        assert!(session.clear_all());
        assert!(session.selection().selected().is_empty());
        assert!(session.filtered_items().is_empty());
        assert_eq!(session.pagination().total_items(), 0);
        assert_eq!(session.pagination().current_page(), 1);
    }

    #[test]
    fn test_selection_change_resets_to_first_page() {
        let mut session = CatalogSession::default();
        let mut all = ten_a_items();
        all.extend(items(&[(11, "B")]));
        session.load_catalog(all);
        session.set_page_size(PageSize::Four);
        session.last_page();
        assert_eq!(session.pagination().current_page(), 3);

        session.toggle_category("B");
        assert_eq!(session.pagination().current_page(), 1);
        assert_eq!(session.pagination().total_items(), 10);
    }

    #[test]
    fn test_noop_select_all_keeps_page() {
        let mut session = CatalogSession::default();
        session.load_catalog(ten_a_items());
        session.set_page_size(PageSize::Four);
        session.next_page();
        assert!(!session.select_all());
        assert_eq!(session.pagination().current_page(), 2);
    }

    #[test]
    fn test_interact_updates_counters() {
        let mut session = CatalogSession::default();
        session.load_catalog(vec![Item::new(1, "Lamp", "A").with_counts(3, 1)]);

        session.interact(ItemId(1), InteractionAction::Dislike);
        let item = session.item(ItemId(1)).unwrap();
        assert_eq!((item.likes, item.dislikes), (3, 2));

        session.interact(ItemId(1), InteractionAction::Like);
        let item = session.item(ItemId(1)).unwrap();
        assert_eq!((item.likes, item.dislikes), (4, 1));
        assert_eq!(session.status(ItemId(1)), InteractionStatus::Liked);
    }

    #[test]
    fn test_remove_last_item_of_category_deselects_it() {
        let mut session = CatalogSession::default();
        session.load_catalog(items(&[(1, "A"), (2, "B"), (3, "A")]));
        session.interact(ItemId(2), InteractionAction::Like);

        let removed = session.remove_item(ItemId(2)).unwrap();
        assert_eq!(removed.category, "B");
        assert_eq!(session.categories(), &["A".to_string()]);
        assert!(!session.selection().is_selected("B"));
        assert_eq!(session.status(ItemId(2)), InteractionStatus::None);
        assert_eq!(session.pagination().total_items(), 2);
    }

    #[test]
    fn test_remove_steps_back_from_emptied_last_page() {
        let mut session = CatalogSession::default();
        session.load_catalog(ten_a_items());
        session.set_page_size(PageSize::Eight);
        session.last_page();
        assert_eq!(session.visible_page().len(), 2);

        session.remove_item(ItemId(9));
        assert_eq!(session.pagination().current_page(), 2);
        session.remove_item(ItemId(10));
        assert_eq!(session.pagination().current_page(), 1);
        assert_eq!(session.visible_page().len(), 8);
    }

    #[test]
    fn test_reset_pagination_uses_configured_default() {
        let mut session = CatalogSession::new(PageSize::Twelve);
        session.load_catalog(ten_a_items());
        session.set_page_size(PageSize::Four);
        session.last_page();

        session.reset_pagination();
        let p = session.pagination();
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.items_per_page(), 12);
        assert_eq!(p.total_items(), 10);
    }

    #[test]
    fn test_restore_interaction_replays_counts() {
        let mut session = CatalogSession::default();
        session.load_catalog(vec![Item::new(1, "Lamp", "A").with_counts(3, 1)]);

        session.restore_interaction(ItemId(1), InteractionStatus::Disliked);
        let item = session.item(ItemId(1)).unwrap();
        assert_eq!((item.likes, item.dislikes), (3, 2));
        assert_eq!(session.status(ItemId(1)), InteractionStatus::Disliked);

        session.restore_interaction(ItemId(99), InteractionStatus::Liked);
        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn test_restore_selection_overrides_seed() {
        let mut session = CatalogSession::default();
        session.load_catalog(items(&[(1, "A"), (2, "B")]));
        session.restore_selection(&["B".to_string(), "Gone".to_string()]);
        assert!(!session.selection().is_selected("A"));
        assert!(session.selection().is_selected("B"));
        assert_eq!(session.pagination().total_items(), 1);
    }

    #[test]
    fn test_search_categories() {
        let mut session = CatalogSession::default();
        session.load_catalog(items(&[(1, "Kitchen"), (2, "Garden"), (3, "Books")]));
        assert_eq!(session.search_categories("EN"), vec!["Kitchen", "Garden"]);
    }
}
