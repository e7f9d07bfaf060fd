//! Logs panel component
//!
//! Tail of the in-memory log buffer, newest at the bottom, color-coded by
//! level.

use crate::logging::LogEntry;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub(crate) fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

pub fn render(f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = entries.len().saturating_sub(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .skip(skip)
        .map(|e| ListItem::new(format_log_entry(e)).style(theme.log_style(&e.level)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" System Logs "),
    );

    f.render_widget(list, area);
}
