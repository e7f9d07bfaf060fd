//! Toast notification component
//!
//! Draws the newest notification in the bottom-right corner on top of all
//! other content. Expiry is owned by the controller.

use crate::controller::Notification;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const MAX_WIDTH: u16 = 60;

pub fn render(f: &mut Frame, area: Rect, notification: &Notification, theme: &Theme) {
    let color = theme.toast_color(notification.kind);
    let text = format!("{} {}", notification.kind.icon(), notification.message);

    // Border and padding take 4 columns
    let inner_max = MAX_WIDTH.min(area.width.saturating_sub(8)).max(1);
    let text_width = (text.width() as u16).max(1);
    let width = text_width.min(inner_max) + 4;
    let lines = text_width.div_ceil(inner_max);
    let height = lines + 2;

    let x = area.right().saturating_sub(width + 2);
    let y = area.bottom().saturating_sub(height + 2);
    let toast_area = Rect::new(x, y, width, height).intersection(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(color))
        .title_bottom(Line::from(" x ").right_aligned())
        .style(Style::default().bg(theme.background));

    let body = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block);

    f.render_widget(Clear, toast_area);
    f.render_widget(body, toast_area);
}
