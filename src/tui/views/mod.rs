// Views module - screen-level rendering logic
//
// One view per section:
// - Dashboard: backend health, feature cards, particles, logs
// - Chat: wellness conversation with history sidebar
// - Summarizer: text area and summary / smart summary result
// - Notes: PDF path prompt and extracted notes
// - Media: video/audio path prompt and transcript summary
//
// Draw order is background, shell, section, overlay, modal, toast. While a
// section transition plays, the section being drawn is dimmed.

mod chat;
mod dashboard;
mod media;
mod modal;
mod notes;
mod summarizer;

use super::app::App;
use crate::controller::views::SelectionView;
use crate::controller::{Phase, Section, UploadKind};
use crate::tui::components::input_box::InputBox;
use crate::tui::components::{self, loading_overlay, toast};
use crate::tui::theme::Theme;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::time::Instant;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let now = Instant::now();

    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(2),
        ])
        .split(f.area());

    components::render_title(f, chunks[0], app);
    components::render_status(f, chunks[2], app);

    let content = chunks[1];
    match app.vc.visible_section(now) {
        Section::Dashboard => dashboard::render(f, content, app),
        Section::MentalHealth => chat::render(f, content, app),
        Section::TextSummarizer => summarizer::render(f, content, app),
        Section::PdfProcessor => notes::render(f, content, app),
        Section::VideoProcessor => media::render(f, content, app),
    }

    let dim = match app.vc.transition(now) {
        Some(Phase::Exiting { .. }) => true,
        Some(Phase::Entering { progress }) => progress < 50,
        None => false,
    };
    if dim {
        f.buffer_mut()
            .set_style(content, Style::default().add_modifier(Modifier::DIM));
    }

    loading_overlay::render(f, f.area(), app);

    if let Some(modal_state) = app.modal {
        modal::render(f, &modal_state, app);
    }

    if let Some(notification) = app.vc.notifications().current() {
        toast::render(f, f.area(), notification, &app.theme);
    }
}

/// Bordered block in the section style
pub(crate) fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ))
}

pub(crate) fn heading(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    ))
}

pub(crate) fn bullets(items: &[String], theme: &Theme) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled("  • ", Style::default().fg(theme.accent)),
                Span::styled(item.clone(), Style::default().fg(theme.foreground)),
            ])
        })
        .collect()
}

/// "label: value" line for result metadata
pub(crate) fn stat(label: &str, value: impl Into<String>, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!("{label}: {}   ", value.into()),
        Style::default().fg(theme.muted),
    )
}

pub(crate) fn split_input(area: Rect, input_height: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(input_height), Constraint::Min(3)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Path prompt shared by the upload sections
pub(crate) fn upload_prompt(f: &mut Frame, area: Rect, app: &App, kind: UploadKind, title: &str) {
    let state = app.vc.state();
    let editor = match kind {
        UploadKind::Pdf => &state.pdf_path_input,
        UploadKind::Media => &state.media_path_input,
    };
    let limit = match kind {
        UploadKind::Pdf => app.vc.limits().max_pdf_mb,
        UploadKind::Media => app.vc.limits().max_media_mb,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    InputBox {
        editor,
        title,
        placeholder: "/path/to/file",
        focused: app.modal.is_none(),
    }
    .render(f, chunks[0], &app.theme);

    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" Enter to select │ max {limit} MB"),
            Style::default().fg(app.theme.muted),
        )),
        chunks[1],
    );
}

/// "📎 name (size)" for the accepted file, or a hint
pub(crate) fn selection_line(app: &App, kind: UploadKind) -> Line<'static> {
    let theme = &app.theme;
    match app.vc.state().selection(kind).map(SelectionView::build) {
        Some(view) => Line::from(vec![
            Span::styled("📎 ", Style::default().fg(theme.accent)),
            Span::styled(
                view.name,
                Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({})", view.size), Style::default().fg(theme.muted)),
        ]),
        None => Line::from(Span::styled(
            "No file selected",
            Style::default().fg(theme.muted),
        )),
    }
}
