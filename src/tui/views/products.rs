//! Products view: category filter panel, paged product list with
//! like/dislike controls, and the pagination bar.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc;

use crate::core::catalog::{
    CatalogSession, InteractionAction, InteractionStatus, Item, ItemId, PageSize,
};
use crate::tui::events::{AppEvent, Notification, NotificationLevel};
use crate::tui::layout::AppLayout;
use crate::tui::theme;
use crate::tui::widgets::search_input::{InputEdit, SearchInput};

const GAUGE_WIDTH: usize = 10;

// ── Focus zones ─────────────────────────────────────────────────────────────

/// Which panel currently has keyboard focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FocusZone {
    /// Product list: cursor, like/dislike, paging.
    List,
    /// Category list: j/k move, Space toggles.
    Filters,
    /// Category search box: typing narrows the category list.
    Search,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Short highlight on a row after it was liked or disliked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pulse {
    id: ItemId,
    ticks_left: u16,
}

// ── State ───────────────────────────────────────────────────────────────────

pub struct ProductsState {
    session: CatalogSession,
    load_state: LoadState,
    focus: FocusZone,
    /// Row under the cursor, relative to the visible page.
    cursor: usize,
    /// Row under the cursor in the (searched) category list.
    filter_cursor: usize,
    search: SearchInput,
    pulse: Option<Pulse>,
    pulse_ticks: u16,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl ProductsState {
    pub fn new(
        default_page_size: PageSize,
        pulse_ticks: u16,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            session: CatalogSession::new(default_page_size),
            load_state: LoadState::Loading,
            focus: FocusZone::List,
            cursor: 0,
            filter_cursor: 0,
            search: SearchInput::new(),
            pulse: None,
            pulse_ticks,
            event_tx,
        }
    }

    pub fn session(&self) -> &CatalogSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CatalogSession {
        &mut self.session
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Whether keystrokes are going into the search box.
    pub fn is_typing(&self) -> bool {
        self.focus == FocusZone::Search
    }

    // ── Catalog delivery ────────────────────────────────────────────────

    pub fn on_catalog_loaded(&mut self, items: Vec<Item>) {
        self.session.load_catalog(items);
        self.load_state = LoadState::Ready;
        self.clamp_cursors();
    }

    pub fn on_catalog_failed(&mut self, message: String) {
        // Keep showing a previously loaded catalog.
        if !self.session.is_loaded() {
            self.load_state = LoadState::Failed(message);
        }
    }

    /// Mark a reload in flight. The current catalog stays visible.
    pub fn begin_reload(&mut self) {
        if !self.session.is_loaded() {
            self.load_state = LoadState::Loading;
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(pulse) = &mut self.pulse {
            pulse.ticks_left = pulse.ticks_left.saturating_sub(1);
            if pulse.ticks_left == 0 {
                self.pulse = None;
            }
        }
    }

    // ── Derived ─────────────────────────────────────────────────────────

    fn cursor_item(&self) -> Option<&Item> {
        self.session.visible_page().get(self.cursor).copied()
    }

    fn matching_categories(&self) -> Vec<&str> {
        self.session.search_categories(&self.search.text())
    }

    fn category_count(&self, category: &str) -> usize {
        self.session
            .items()
            .iter()
            .filter(|item| item.category == category)
            .count()
    }

    fn clamp_cursors(&mut self) {
        let rows = self.session.visible_page().len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
        let cats = self.matching_categories().len();
        self.filter_cursor = self.filter_cursor.min(cats.saturating_sub(1));
    }

    fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self
            .event_tx
            .send(AppEvent::Notification(Notification::new(message, level)));
    }

    // ── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        if modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match self.focus {
            FocusZone::List => self.handle_list_input(*code),
            FocusZone::Filters => self.handle_filter_input(*code),
            FocusZone::Search => self.handle_search_input(*code),
        }
    }

    fn handle_list_input(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                let rows = self.session.visible_page().len();
                if self.cursor + 1 < rows {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Char('l') => self.interact(InteractionAction::Like),
            KeyCode::Char('d') => self.interact(InteractionAction::Dislike),
            KeyCode::Char('x') | KeyCode::Delete => self.remove_at_cursor(),
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                self.page_with(CatalogSession::next_page)
            }
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                self.page_with(CatalogSession::prev_page)
            }
            KeyCode::Char('g') | KeyCode::Home => self.page_with(CatalogSession::first_page),
            KeyCode::Char('G') | KeyCode::End => self.page_with(CatalogSession::last_page),
            KeyCode::Char('s') => {
                let next = self.session.pagination().page_size().next();
                self.session.set_page_size(next);
                self.clamp_cursors();
            }
            KeyCode::Char('r') => {
                self.session.reset_pagination();
                self.cursor = 0;
            }
            KeyCode::Char('a') => self.select_all(),
            KeyCode::Char('c') => self.clear_all(),
            KeyCode::Tab => self.focus = FocusZone::Filters,
            KeyCode::Char('/') => self.focus = FocusZone::Search,
            _ => return false,
        }
        true
    }

    fn handle_filter_input(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc | KeyCode::Tab => self.focus = FocusZone::List,
            KeyCode::Char('/') => self.focus = FocusZone::Search,
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.matching_categories().len();
                if self.filter_cursor + 1 < count {
                    self.filter_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.filter_cursor = self.filter_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_at_cursor(),
            KeyCode::Char('a') => self.select_all(),
            KeyCode::Char('c') => self.clear_all(),
            _ => return false,
        }
        true
    }

    fn handle_search_input(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => {
                self.search.clear();
                self.filter_cursor = 0;
                self.focus = FocusZone::Filters;
            }
            KeyCode::Enter | KeyCode::Tab => self.focus = FocusZone::Filters,
            other => {
                if self.search.edit(other) == InputEdit::Changed {
                    self.filter_cursor = 0;
                }
            }
        }
        // Consume everything so typed letters never trigger shortcuts.
        true
    }

    // ── Commands ────────────────────────────────────────────────────────

    fn page_with(&mut self, step: fn(&mut CatalogSession)) {
        let before = self.session.pagination().current_page();
        step(&mut self.session);
        if self.session.pagination().current_page() != before {
            self.cursor = 0;
        }
    }

    fn interact(&mut self, action: InteractionAction) {
        let Some(id) = self.cursor_item().map(|item| item.id) else {
            return;
        };
        if self.session.interact(id, action).is_some() {
            self.pulse = Some(Pulse {
                id,
                ticks_left: self.pulse_ticks,
            });
        }
    }

    fn remove_at_cursor(&mut self) {
        let Some(id) = self.cursor_item().map(|item| item.id) else {
            return;
        };
        if let Some(removed) = self.session.remove_item(id) {
            if self.pulse.is_some_and(|p| p.id == id) {
                self.pulse = None;
            }
            self.clamp_cursors();
            self.notify(format!("Removed \"{}\"", removed.title), NotificationLevel::Info);
        }
    }

    fn toggle_at_cursor(&mut self) {
        let Some(category) = self
            .matching_categories()
            .get(self.filter_cursor)
            .map(|c| c.to_string())
        else {
            return;
        };
        if self.session.toggle_category(&category) {
            self.cursor = 0;
        }
    }

    fn select_all(&mut self) {
        if self.session.select_all() {
            self.cursor = 0;
        }
    }

    fn clear_all(&mut self) {
        if self.session.clear_all() {
            self.cursor = 0;
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, layout: &AppLayout) {
        if let Some(area) = layout.filters {
            self.render_filter_panel(frame, area);
        }
        self.render_product_list(frame, layout.list);
        self.render_pager(frame, layout.pager);
    }

    fn render_filter_panel(&self, frame: &mut Frame, area: Rect) {
        let focused = matches!(self.focus, FocusZone::Filters | FocusZone::Search);
        let block = theme::block("Categories", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();

        let mut search_line = vec![Span::styled(
            " / ",
            if self.focus == FocusZone::Search {
                theme::highlight()
            } else {
                theme::dim()
            },
        )];
        search_line.extend(
            self.search
                .line("search categories", self.focus == FocusZone::Search)
                .spans,
        );
        lines.push(Line::from(search_line));
        lines.push(Line::raw(""));

        let matches = self.matching_categories();
        if matches.is_empty() {
            lines.push(Line::from(Span::styled("   No matching categories", theme::muted())));
        }
        for (i, category) in matches.iter().enumerate() {
            let selected = self.session.selection().is_selected(category);
            let at_cursor = focused && i == self.filter_cursor;
            let checkbox = if selected { "[x]" } else { "[ ]" };
            let pointer = if at_cursor { " \u{25b8} " } else { "   " };
            let style = if at_cursor {
                theme::highlight()
            } else if selected {
                Style::default().fg(theme::TEXT)
            } else {
                theme::dim()
            };
            lines.push(Line::from(vec![
                Span::styled(pointer, Style::default().fg(theme::ACCENT)),
                Span::styled(format!("{checkbox} {category}"), style),
                Span::styled(format!(" {}", self.category_count(category)), theme::dim()),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" Spc", theme::key_hint()),
            Span::raw(":toggle "),
            Span::styled("a", theme::key_hint()),
            Span::raw(":all "),
            Span::styled("c", theme::key_hint()),
            Span::raw(":clear"),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_product_list(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block("Products", self.focus == FocusZone::List);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match &self.load_state {
            LoadState::Loading => message_lines("Loading catalog...", theme::muted(), None),
            LoadState::Failed(reason) => message_lines(
                &format!("Could not load catalog: {reason}"),
                Style::default().fg(theme::ERROR),
                Some("Press R to retry"),
            ),
            LoadState::Ready => self.product_lines(inner.width as usize),
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn product_lines(&self, width: usize) -> Vec<Line<'static>> {
        let page = self.session.visible_page();
        if page.is_empty() {
            return if self.session.categories().is_empty() {
                message_lines("No products found.", theme::muted(), None)
            } else {
                message_lines(
                    "No products found. Try adjusting your filters.",
                    theme::muted(),
                    Some("Press a to select all filters"),
                )
            };
        }

        // marker + pointer + counts + gauge take roughly 40 columns
        let title_width = width.saturating_sub(44).clamp(12, 48);
        let focused = self.focus == FocusZone::List;

        page.iter()
            .enumerate()
            .map(|(i, item)| {
                let status = self.session.status(item.id);
                let (marker, marker_style) = theme::status_marker(status);
                let at_cursor = focused && i == self.cursor;
                let pulsing = self.pulse.is_some_and(|p| p.id == item.id);

                let mut row_style = if at_cursor {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                if pulsing {
                    row_style = row_style.patch(theme::pulse());
                }

                let like_style = emphasis(theme::LIKE, status == InteractionStatus::Liked);
                let dislike_style = emphasis(theme::DISLIKE, status == InteractionStatus::Disliked);
                let pct = item.like_percentage();

                Line::from(vec![
                    Span::styled(
                        if at_cursor { " \u{25b8} " } else { "   " },
                        Style::default().fg(theme::ACCENT),
                    ),
                    Span::styled(format!("{marker} "), marker_style),
                    Span::styled(
                        format!("{:<w$}", truncate(&item.title, title_width), w = title_width),
                        row_style,
                    ),
                    Span::styled(format!(" {:<14}", truncate(&item.category, 14)), theme::muted()),
                    Span::styled(format!(" \u{25b2}{:>5}", item.likes), like_style),
                    Span::styled(format!(" \u{25bc}{:>5} ", item.dislikes), dislike_style),
                    Span::styled(gauge_bar(pct, GAUGE_WIDTH), Style::default().fg(theme::LIKE)),
                    Span::styled(
                        "\u{2591}".repeat(GAUGE_WIDTH - gauge_fill(pct, GAUGE_WIDTH)),
                        Style::default().fg(theme::DISLIKE),
                    ),
                    Span::styled(format!(" {pct:>3.0}%"), theme::muted()),
                ])
            })
            .collect()
    }

    fn render_pager(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Pages");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let pagination = self.session.pagination();
        let enabled = |on: bool| if on { theme::heading() } else { theme::dim() };

        let mut spans = vec![
            Span::styled(" \u{25c0} p ", enabled(pagination.has_prev())),
            Span::styled(
                format!(
                    " Page {} / {} ",
                    pagination.current_page(),
                    pagination.display_total_pages()
                ),
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" n \u{25b6} ", enabled(pagination.has_next())),
            Span::styled("  Size:", theme::muted()),
        ];
        for size in PageSize::ALL {
            let style = if size == pagination.page_size() {
                theme::title()
            } else {
                theme::dim()
            };
            spans.push(Span::styled(format!(" {size}"), style));
        }
        spans.push(Span::styled(" (s)", theme::key_hint()));

        let summary = match self.session.page_range() {
            Some(range) => format!(
                "   Showing {} to {} of {}",
                range.start, range.end, range.total
            ),
            None => "   Showing 0 of 0".to_string(),
        };
        spans.push(Span::styled(summary, theme::muted()));

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn message_lines(message: &str, style: Style, hint: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![Span::raw("  "), Span::styled(message.to_string(), style)]),
    ];
    if let Some(hint) = hint {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(hint.to_string(), theme::key_hint()),
        ]));
    }
    lines
}

fn emphasis(color: ratatui::style::Color, active: bool) -> Style {
    let style = Style::default().fg(color);
    if active {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn gauge_fill(pct: f64, width: usize) -> usize {
    ((pct / 100.0 * width as f64).round() as usize).min(width)
}

fn gauge_bar(pct: f64, width: usize) -> String {
    "\u{2588}".repeat(gauge_fill(pct, width))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
