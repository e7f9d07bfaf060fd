// Media analysis view
//
// Path prompt and selection, then summary, transcript and file details.

use super::{heading, panel, selection_line, split_input, stat, upload_prompt};
use crate::controller::views::MediaView;
use crate::controller::UploadKind;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let state = app.vc.state();
    let (top, bottom) = split_input(area, 4);
    upload_prompt(
        f,
        top,
        app,
        UploadKind::Media,
        "Video or audio path (type, paste or drop a file)",
    );

    let mut lines = vec![selection_line(app, UploadKind::Media), Line::raw("")];
    match state.media_result.as_ref().map(MediaView::build) {
        None => lines.push(Line::from(Span::styled(
            "Select a video or audio file, then press Ctrl+P. Long recordings take a while.",
            Style::default().fg(theme.muted),
        ))),
        Some(view) => {
            let badge = if view.ai_powered {
                Span::styled(
                    format!(" ✨ {} ", view.engine),
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    format!(" {} ", view.engine),
                    Style::default().fg(theme.warning),
                )
            };
            lines.push(Line::from(vec![
                Span::styled(
                    "🎬 Summary ",
                    Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
                ),
                badge,
            ]));
            lines.extend(view.summary.lines().map(|l| Line::raw(l.to_string())));
            lines.push(Line::raw(""));
            lines.push(heading("🎙️ Transcription", theme));
            lines.extend(view.transcription.lines().map(|l| Line::raw(l.to_string())));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                stat("Type", view.file_type, theme),
                stat("Duration", view.duration, theme),
                stat("Generated", view.generated, theme),
            ]));
        }
    }

    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(theme.foreground))
            .wrap(Wrap { trim: false })
            .scroll((app.scroll(), 0))
            .block(panel("Media Analysis", theme)),
        bottom,
    );
}
