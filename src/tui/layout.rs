//! Root layout computation for filter panel + product list + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the category filter panel.
pub const FILTER_PANEL_WIDTH: u16 = 28;
/// Hide the filter panel below this terminal width.
pub const HIDE_FILTERS_THRESHOLD: u16 = 56;
/// Height of the pagination bar under the product list.
pub const PAGER_HEIGHT: u16 = 3;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Filter panel area (None if hidden).
    pub filters: Option<Rect>,
    /// Product list.
    pub list: Rect,
    /// Pagination bar.
    pub pager: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelVisibility {
    Shown,
    Hidden,
}

impl AppLayout {
    pub fn compute(area: Rect) -> (Self, PanelVisibility) {
        let visibility = if area.width < HIDE_FILTERS_THRESHOLD {
            PanelVisibility::Hidden
        } else {
            PanelVisibility::Shown
        };

        let rows = Layout::vertical([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);
        let (content, status) = (rows[0], rows[1]);

        let (filters, main) = match visibility {
            PanelVisibility::Hidden => (None, content),
            PanelVisibility::Shown => {
                let cols = Layout::horizontal([
                    Constraint::Length(FILTER_PANEL_WIDTH),
                    Constraint::Min(1),
                ])
                .split(content);
                (Some(cols[0]), cols[1])
            }
        };

        let main_rows = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(PAGER_HEIGHT),
        ])
        .split(main);

        (
            AppLayout {
                filters,
                list: main_rows[0],
                pager: main_rows[1],
                status,
            },
            visibility,
        )
    }
}
