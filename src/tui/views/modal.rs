// Modal overlay rendering
//
// - Help modal: keyboard shortcuts and active theme
// - Confirm modal: "clear the conversation?"

use crate::tui::app::App;
use crate::tui::components::centered_rect;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::ConfirmClear => render_confirm_clear(f, app),
    }
}

fn render_help(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.accent);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<14}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Sections", header_style)),
        kb("F1-F5", "Jump to a section"),
        kb("Tab/Shift+Tab", "Next / previous section"),
        kb("Esc", "Back to dashboard"),
        kb("1-4", "Open a feature (dashboard)"),
        Line::raw(""),
        Line::from(Span::styled("  Mental Health", header_style)),
        kb("Enter", "Send message"),
        kb("Alt+1-4", "Quick prompt"),
        kb("Ctrl+E", "Export chat"),
        kb("Ctrl+L", "Clear chat"),
        Line::raw(""),
        Line::from(Span::styled("  Text Summarizer", header_style)),
        kb("Ctrl+S", "Summarize"),
        kb("Ctrl+T", "Smart summary"),
        kb("Ctrl+R", "Clear text and result"),
        Line::raw(""),
        Line::from(Span::styled("  Smart Notes / Media", header_style)),
        kb("Enter", "Select typed or pasted path"),
        kb("Ctrl+P", "Process selected file"),
        kb("Ctrl+D", "Clear selection"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("PgUp/PgDn", "Scroll results"),
        kb("Ctrl+Y", "Copy result"),
        kb("Ctrl+X", "Dismiss notification"),
        kb("Ctrl+G, ?", "Toggle this help"),
        kb("Ctrl+C, q", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(theme.name.as_str(), key_style),
        ]),
    ]);

    let area = centered_rect(52, 36, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.highlight))
                .border_type(theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );
    f.render_widget(paragraph, area);
}

fn render_confirm_clear(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(46, 5, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from("Clear the whole conversation?"),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.danger).add_modifier(Modifier::BOLD)),
            Span::raw(" clear   "),
            Span::styled("n", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" keep"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.foreground).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.warning))
                .title(" Confirm "),
        );
    f.render_widget(paragraph, area);
}
