// Dashboard view
//
// Welcome banner over the particle field, backend health, one card per
// feature and the tail of the system log.

use super::panel;
use crate::controller::views::HealthView;
use crate::controller::Section;
use crate::tui::app::App;
use crate::tui::components::logs_panel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const CARDS: [(Section, &str, &str); 4] = [
    (
        Section::MentalHealth,
        "💬",
        "Talk through stress, motivation and study habits",
    ),
    (
        Section::TextSummarizer,
        "📝",
        "Condense long passages into key points",
    ),
    (
        Section::PdfProcessor,
        "📄",
        "Turn lecture PDFs into smart notes",
    ),
    (
        Section::VideoProcessor,
        "🎬",
        "Transcribe and summarize recorded lectures",
    ),
];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Min(4),
        ])
        .split(area);

    render_banner(f, chunks[0], app);
    render_health(f, chunks[1], app);
    render_cards(f, chunks[2], app);

    let entries = app.log_buffer.recent(chunks[3].height as usize);
    logs_panel::render(f, chunks[3], &entries, &app.theme);
}

fn render_banner(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Welcome to StudyByte",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your AI study companion for wellness, summaries and smart notes",
            Style::default().fg(theme.muted),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);

    if app.features.particles {
        app.particles.render(f.buffer_mut(), area, theme.particle);
    }
}

fn render_health(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let lines = match HealthView::build(&app.vc.state().health) {
        HealthView::Checking => vec![Line::from(Span::styled(
            format!("{} Checking backend...", app.spinner_char()),
            Style::default().fg(theme.muted),
        ))],
        HealthView::Online {
            app_name,
            features,
            ai_available,
        } => vec![
            Line::from(vec![
                Span::styled("● Online  ", Style::default().fg(theme.success)),
                Span::styled(app_name, Style::default().fg(theme.foreground)),
                Span::styled(
                    if ai_available {
                        "   AI: Gemini available"
                    } else {
                        "   AI: placeholder responses"
                    },
                    Style::default().fg(if ai_available {
                        theme.success
                    } else {
                        theme.warning
                    }),
                ),
            ]),
            Line::from(Span::styled(
                features.join(" · "),
                Style::default().fg(theme.muted),
            )),
        ],
        HealthView::Offline(reason) => vec![
            Line::from(Span::styled(
                format!("● Offline  {}", app.backend_url),
                Style::default().fg(theme.danger),
            )),
            Line::from(Span::styled(reason, Style::default().fg(theme.muted))),
        ],
    };

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Backend", theme)),
        area,
    );
}

fn render_cards(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, (section, icon, blurb)) in CARDS.iter().enumerate() {
        let title = format!("{} {}", i + 1, section.title());
        let body = vec![
            Line::from(Span::styled(
                icon.to_string(),
                Style::default().fg(theme.highlight),
            )),
            Line::from(Span::styled(
                blurb.to_string(),
                Style::default().fg(theme.foreground),
            )),
        ];
        f.render_widget(
            Paragraph::new(body)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(panel(&title, theme)),
            columns[i],
        );
    }
}
