// Components module - reusable UI building blocks
//
// Shell components are drawn around every section:
// - Title bar: app name and section navigation
// - Status bar: uptime, backend, busy indicator, key hints
// - Input box: editor with cursor placement
// - Toast: newest notification, bottom-right
// - Loading overlay: centered spinner while a request runs
// - Logs panel: recent system log entries (dashboard)

pub mod input_box;
pub mod loading_overlay;
pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Centered sub-rectangle, clamped to `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
