//! Single-line query input used by the category search box.

use crossterm::event::KeyCode;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::tui::theme;

/// What a key did to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    /// The text changed; dependent results need refreshing.
    Changed,
    /// Only the cursor moved.
    Moved,
    /// Not an editing key.
    Ignored,
}

/// A text query with a char-indexed cursor.
#[derive(Debug, Default, Clone)]
pub struct SearchInput {
    chars: Vec<char>,
    cursor: usize,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_blank(&self) -> bool {
        self.chars.iter().all(|c| c.is_whitespace())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Apply an editing key.
    pub fn edit(&mut self, code: KeyCode) -> InputEdit {
        match code {
            KeyCode::Char(c) => {
                self.chars.insert(self.cursor, c);
                self.cursor += 1;
                InputEdit::Changed
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.chars.remove(self.cursor);
                InputEdit::Changed
            }
            KeyCode::Delete if self.cursor < self.chars.len() => {
                self.chars.remove(self.cursor);
                InputEdit::Changed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputEdit::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.chars.len());
                InputEdit::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputEdit::Moved
            }
            KeyCode::End => {
                self.cursor = self.chars.len();
                InputEdit::Moved
            }
            KeyCode::Backspace | KeyCode::Delete => InputEdit::Moved,
            _ => InputEdit::Ignored,
        }
    }

    /// Render as a single line, with a block cursor when focused and a
    /// placeholder when empty and unfocused.
    pub fn line(&self, placeholder: &str, focused: bool) -> Line<'static> {
        if !focused {
            return if self.chars.is_empty() {
                Line::from(Span::styled(placeholder.to_string(), theme::dim()))
            } else {
                Line::from(Span::styled(self.text(), Style::default().fg(theme::TEXT)))
            };
        }

        let before: String = self.chars[..self.cursor].iter().collect();
        let at = self.chars.get(self.cursor).map_or(' ', |c| *c);
        let after: String = self.chars.get(self.cursor + 1..).unwrap_or_default().iter().collect();
        Line::from(vec![
            Span::styled(before, Style::default().fg(theme::TEXT)),
            Span::styled(at.to_string(), Style::default().fg(theme::BG_BASE).bg(theme::ACCENT)),
            Span::styled(after, Style::default().fg(theme::TEXT)),
        ])
    }
}
