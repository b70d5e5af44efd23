use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::theme;
use super::views::products::ProductsState;
use crate::config::AppConfig;
use crate::core::catalog::CatalogSource;
use crate::core::persistence::{PersistedUiState, UiStateStore};

const MAX_NOTIFICATIONS: usize = 3;
const NOTIFICATION_TTL_TICKS: u32 = 100;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Products view state (owns the catalog session).
    pub products: ProductsState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    source: CatalogSource,
    store: Option<UiStateStore>,
    /// Saved UI state waiting for the first catalog delivery.
    pending_restore: Option<PersistedUiState>,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender handed to background tasks and views.
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        source: CatalogSource,
        store: Option<UiStateStore>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            running: true,
            products: ProductsState::new(
                config.page_size(),
                config.tui.pulse_ticks,
                event_tx.clone(),
            ),
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            source,
            store,
            pending_restore: None,
            event_rx,
            event_tx,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.load_saved_state().await;
        self.spawn_catalog_fetch();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        self.save_state().await;
        Ok(())
    }

    // ── Catalog & persistence ───────────────────────────────────────────

    fn spawn_catalog_fetch(&self) {
        let source = self.source.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match source.fetch().await {
                Ok(items) => AppEvent::CatalogLoaded(items),
                Err(e) => {
                    tracing::error!(source = %source.describe(), error = %e, "Catalog fetch failed");
                    AppEvent::CatalogFailed(e.to_string())
                }
            };
            let _ = tx.send(event);
        });
    }

    async fn load_saved_state(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        match store.load().await {
            Ok(state) => self.pending_restore = state,
            Err(e) => {
                tracing::warn!(path = %store.path().display(), error = %e, "Ignoring unreadable UI state");
                self.push_notification(
                    "Saved filters could not be read; starting fresh".to_string(),
                    NotificationLevel::Warning,
                );
            }
        }
    }

    async fn save_state(&self) {
        let Some(store) = &self.store else {
            return;
        };
        // Nothing meaningful to save before the catalog arrived.
        if !self.products.session().is_loaded() {
            return;
        }
        let state = PersistedUiState::capture(self.products.session());
        if let Err(e) = store.save(&state).await {
            tracing::warn!(path = %store.path().display(), error = %e, "Failed to save UI state");
        }
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Products view
                if self.products.handle_input(&crossterm_event) {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::CatalogLoaded(items) => {
                let count = items.len();
                self.products.on_catalog_loaded(items);
                if let Some(saved) = self.pending_restore.take() {
                    saved.restore_into(self.products.session_mut());
                }
                self.push_notification(format!("Loaded {count} products"), NotificationLevel::Success);
            }
            AppEvent::CatalogFailed(reason) => {
                self.push_notification(
                    format!("Catalog unavailable: {reason}"),
                    NotificationLevel::Error,
                );
                self.products.on_catalog_failed(reason);
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('R') => Some(Action::ReloadCatalog),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::ReloadCatalog => {
                tracing::info!(source = %self.source.describe(), "Reloading catalog");
                self.products.begin_reload();
                self.spawn_catalog_fetch();
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }
        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL_TICKS,
        });
        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, advance the pulse.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
        self.products.on_tick();
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (layout, _) = AppLayout::compute(area);

        self.products.render(frame, &layout);
        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);
        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let session = self.products.session();
        let state = if self.products.is_loading() {
            Span::styled("loading", Style::default().fg(theme::PRIMARY_LIGHT))
        } else {
            Span::styled(
                format!(
                    "{} products, {} of {} categories",
                    session.items().len(),
                    session.selection().selected().len(),
                    session.categories().len()
                ),
                theme::muted(),
            )
        };

        let mode = if self.products.is_typing() {
            Span::styled(" SEARCH ", theme::brand_badge())
        } else {
            Span::raw("")
        };

        let status = Line::from(vec![
            Span::styled(" CATALOG ", theme::brand_badge()),
            Span::raw(" "),
            mode,
            Span::raw(" "),
            state,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":filters "),
            Span::styled("l/d", theme::key_hint()),
            Span::raw(":like/dislike "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height.min(area.height));

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Products:", ""),
            ("j/k", "Move cursor"),
            ("l / d", "Like / dislike (again to undo)"),
            ("x", "Remove product"),
            ("n/p  ←/→", "Next / previous page"),
            ("g / G", "First / last page"),
            ("s", "Cycle page size (4, 8, 12, 16)"),
            ("r", "Reset pagination"),
            ("", ""),
            ("Categories:", ""),
            ("Tab", "Focus category panel"),
            ("/", "Search categories"),
            ("Space / Enter", "Toggle category"),
            ("a / c", "Select all / clear all"),
            ("Esc", "Back to products"),
            ("", ""),
            ("Global:", ""),
            ("R", "Reload catalog"),
            ("?", "Toggle this help"),
            ("q / Ctrl+C", "Quit"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::title())),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<16}", key),
                        Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" or "),
            Span::styled("Esc", Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
