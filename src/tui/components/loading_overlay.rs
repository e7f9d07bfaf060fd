//! Centered "Processing" box shown while a request is outstanding

use super::centered_rect;
use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(elapsed) = app.vc.state().overlay.elapsed() else {
        return;
    };
    let theme = &app.theme;
    let rect = centered_rect(44, 5, area);

    let lines = vec![
        Line::from(format!(
            "{} 🌿 Processing your request...",
            app.spinner_char()
        ))
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        Line::from(format!("{}s", elapsed.as_secs())).style(Style::default().fg(theme.muted)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.background));

    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}
