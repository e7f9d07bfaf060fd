// Text summarizer view
//
// Multi-line text area on top, the last summary or smart summary below.

use super::{bullets, heading, panel, stat};
use crate::controller::views::TextResultView;
use crate::tui::app::App;
use crate::tui::components::input_box::InputBox;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let state = app.vc.state();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(5)])
        .split(area);

    let title = format!(
        "Study material ({} chars)",
        state.text_input.text().chars().count()
    );
    InputBox {
        editor: &state.text_input,
        title: &title,
        placeholder: "Paste or type the text you want summarized...",
        focused: app.modal.is_none(),
    }
    .render(f, chunks[0], theme);

    let lines = match state.text_result.as_ref().map(TextResultView::build) {
        None => vec![Line::from(Span::styled(
            "Ctrl+S for a summary, Ctrl+T for a smart summary with key concepts.",
            Style::default().fg(theme.muted),
        ))],
        Some(TextResultView::Summary {
            summary,
            key_points,
            original_chars,
            compression_percent,
            generated,
        }) => {
            let mut lines = vec![heading("📋 Summary", theme), Line::raw(summary), Line::raw("")];
            if !key_points.is_empty() {
                lines.push(heading("🔑 Key Points", theme));
                lines.extend(bullets(&key_points, theme));
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(vec![
                stat("Original", format!("{original_chars} characters"), theme),
                stat("Compression", format!("{compression_percent}%"), theme),
                stat("Generated", generated, theme),
            ]));
            lines
        }
        Some(TextResultView::Analysis {
            summary,
            key_concepts,
            key_points,
            character_count,
            concept_count,
            generated,
        }) => {
            let mut lines = vec![
                heading("🧠 Smart Summary", theme),
                Line::raw(summary),
                Line::raw(""),
                heading("💡 Key Concepts", theme),
            ];
            lines.extend(bullets(&key_concepts, theme));
            lines.push(Line::raw(""));
            lines.push(heading("🔑 Key Points", theme));
            lines.extend(bullets(&key_points, theme));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                stat("Characters", character_count.to_string(), theme),
                stat("Concepts", concept_count.to_string(), theme),
                stat("Generated", generated, theme),
            ]));
            lines
        }
    };

    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(theme.foreground))
            .wrap(Wrap { trim: false })
            .scroll((app.scroll(), 0))
            .block(panel("Result", theme)),
        chunks[1],
    );
}
