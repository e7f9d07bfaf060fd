// Status bar component
//
// Uptime, backend address, busy spinner and the keys that matter in the
// current section.

use crate::controller::Section;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn hints(section: Section) -> &'static str {
    match section {
        Section::Dashboard => "1-4 open │ r refresh │ ? help │ q quit",
        Section::MentalHealth => "Enter send │ Alt+1-4 prompt │ ^E export │ ^L clear │ ^Y copy",
        Section::TextSummarizer => "^S summarize │ ^T smart summary │ ^R reset │ ^Y copy",
        Section::PdfProcessor | Section::VideoProcessor => {
            "Enter select │ ^P process │ ^D deselect │ ^Y copy"
        }
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let busy = if app.vc.is_busy() {
        format!(" │ {} working", app.spinner_char())
    } else {
        String::new()
    };

    let text = format!(
        " {} │ 🔌 {}{} │ {}",
        app.uptime(),
        app.backend_url,
        busy,
        hints(app.vc.section()),
    );

    let status = Paragraph::new(text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
