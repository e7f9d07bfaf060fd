// Smart notes view
//
// Path prompt and selection, then the extracted notes and key terms.

use super::{bullets, heading, panel, selection_line, split_input, stat, upload_prompt};
use crate::controller::views::NotesView;
use crate::controller::UploadKind;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let state = app.vc.state();
    let (top, bottom) = split_input(area, 4);
    upload_prompt(f, top, app, UploadKind::Pdf, "PDF path (type, paste or drop a file)");

    let mut lines = vec![selection_line(app, UploadKind::Pdf), Line::raw("")];
    match state.notes_result.as_ref().map(NotesView::build) {
        None => lines.push(Line::from(Span::styled(
            "Select a PDF, then press Ctrl+P to extract smart notes.",
            Style::default().fg(theme.muted),
        ))),
        Some(view) => {
            lines.push(heading("📚 Smart Notes", theme));
            lines.extend(view.note_lines.into_iter().map(Line::raw));
            lines.push(Line::raw(""));
            lines.push(heading(&format!("🏷️ Key Terms ({})", view.key_term_count), theme));
            lines.extend(bullets(&view.key_terms, theme));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                stat("Pages", view.pages, theme),
                stat("Key terms", view.key_term_count.to_string(), theme),
                stat("Generated", view.generated, theme),
            ]));
        }
    }

    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(theme.foreground))
            .wrap(Wrap { trim: false })
            .scroll((app.scroll(), 0))
            .block(panel("Smart Notes", theme)),
        bottom,
    );
}
