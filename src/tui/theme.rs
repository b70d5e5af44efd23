//! Slate & Amber color theme for the catalog browser.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::catalog::InteractionStatus;

// ── Primary palette ─────────────────────────────────────────────────────────

/// Slate blue: focused borders, active rows.
pub const PRIMARY: Color = Color::Rgb(0x5C, 0x7C, 0xFA);
/// Light slate: hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x91, 0xA7, 0xFF);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Amber: titles, calls to action.
pub const ACCENT: Color = Color::Rgb(0xFF, 0xB3, 0x00);

// ── Backgrounds ─────────────────────────────────────────────────────────────

pub const BG_BASE: Color = Color::Rgb(0x12, 0x14, 0x1C);
/// Pulse background for a row that was just liked or disliked.
pub const BG_PULSE: Color = Color::Rgb(0x2A, 0x2F, 0x45);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE6, 0xE6, 0xE6);
pub const TEXT_MUTED: Color = Color::Rgb(0x8A, 0x8F, 0x98);
pub const TEXT_DIM: Color = Color::Rgb(0x4E, 0x52, 0x5A);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Domain ──────────────────────────────────────────────────────────────────

/// Like counter and liked marker.
pub const LIKE: Color = Color::Rgb(0x4C, 0xC9, 0x8A);
/// Dislike counter and disliked marker.
pub const DISLIKE: Color = Color::Rgb(0xF0, 0x6A, 0x6A);

// ── Style helpers ───────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn heading() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Row under the cursor.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "q:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Row style while the interaction pulse is running.
pub fn pulse() -> Style {
    Style::default().bg(BG_PULSE).add_modifier(Modifier::BOLD)
}

/// Marker and color for an item's interaction status.
pub fn status_marker(status: InteractionStatus) -> (&'static str, Style) {
    match status {
        InteractionStatus::Liked => ("▲", Style::default().fg(LIKE).add_modifier(Modifier::BOLD)),
        InteractionStatus::Disliked => ("▼", Style::default().fg(DISLIKE).add_modifier(Modifier::BOLD)),
        InteractionStatus::None => ("·", dim()),
    }
}

// ── Block builders ──────────────────────────────────────────────────────────

pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}

/// Focused or default block depending on `focused`.
pub fn block(title: &str, focused: bool) -> Block<'_> {
    if focused {
        block_focused(title)
    } else {
        block_default(title)
    }
}
