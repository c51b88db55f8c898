//! Screen layout definitions for the TUI
//!
//! Top bar across the full width, then an optional sidebar next to the main
//! pane.

use ratatui::layout::{Constraint, Layout, Rect};

/// Top bar height: border + one content row + border
pub const TOP_BAR_HEIGHT: u16 = 3;

/// Sidebar width including borders
pub const SIDEBAR_WIDTH: u16 = 18;

/// Below this width the sidebar is dropped even when enabled
pub const MIN_WIDTH_FOR_SIDEBAR: u16 = 50;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Connection status and key hints
    pub top_bar: Rect,

    /// Section list, absent when collapsed
    pub sidebar: Option<Rect>,

    /// Section content
    pub main: Rect,
}

/// Split the screen.
pub fn create(area: Rect, show_sidebar: bool) -> ScreenAreas {
    let rows = Layout::vertical([Constraint::Length(TOP_BAR_HEIGHT), Constraint::Min(3)]).split(area);

    let body = rows[1];
    if show_sidebar && body.width >= MIN_WIDTH_FOR_SIDEBAR {
        let cols =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)]).split(body);
        ScreenAreas {
            top_bar: rows[0],
            sidebar: Some(cols[0]),
            main: cols[1],
        }
    } else {
        ScreenAreas {
            top_bar: rows[0],
            sidebar: None,
            main: body,
        }
    }
}
