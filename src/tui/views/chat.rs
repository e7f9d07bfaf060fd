// Chat view
//
// Conversation on the left with the typing indicator, quick prompts and
// input under it. History sidebar and mood gauge on the right.

use super::panel;
use crate::controller::insights::Badge;
use crate::controller::views::ChatView;
use crate::controller::{Sender, CHAT_GREETING, QUICK_PROMPTS};
use crate::tui::app::App;
use crate::tui::components::input_box::InputBox;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 34;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let view = ChatView::build(app.vc.state());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(SIDEBAR_WIDTH)])
        .split(area);

    let typing_rows = u16::from(view.typing && app.features.typing_indicator);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(typing_rows),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(columns[0]);

    render_messages(f, left[0], app, &view);
    if typing_rows > 0 {
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("  {} AI Companion is typing...", app.spinner_char()),
                Style::default()
                    .fg(app.theme.muted)
                    .add_modifier(Modifier::ITALIC),
            )),
            left[1],
        );
    }
    render_quick_prompts(f, left[2], &app.theme);

    InputBox {
        editor: &app.vc.state().chat_input,
        title: "Message",
        placeholder: "Share what's on your mind...",
        focused: app.modal.is_none(),
    }
    .render(f, left[3], &app.theme);

    render_sidebar(f, columns[1], app, &view);
}

fn message_lines(sender: Sender, text: &str, timestamp: &str, theme: &Theme) -> Vec<Line<'static>> {
    let color = match sender {
        Sender::User => theme.user_message,
        Sender::Assistant => theme.ai_message,
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(
            sender.label().to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {timestamp}"), Style::default().fg(theme.muted)),
    ])];
    lines.extend(
        text.lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.foreground)))),
    );
    lines.push(Line::raw(""));
    lines
}

fn render_messages(f: &mut Frame, area: Rect, app: &App, view: &ChatView) {
    let theme = &app.theme;
    let mut lines = message_lines(Sender::Assistant, CHAT_GREETING, "", theme);
    for msg in &view.messages {
        lines.extend(message_lines(msg.sender, &msg.text, &msg.timestamp, theme));
    }

    // Stick to the bottom; the scroll offset walks back from there
    let block = panel("Mental Health Companion", theme);
    let inner = block.inner(area);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total = paragraph.line_count(inner.width).min(u16::MAX as usize) as u16;
    let bottom = total.saturating_sub(inner.height);
    let offset = bottom.saturating_sub(app.scroll());

    f.render_widget(paragraph.scroll((offset, 0)).block(block), area);
}

fn render_quick_prompts(f: &mut Frame, area: Rect, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
        spans.push(Span::styled(
            format!("Alt+{}", i + 1),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::styled(
            format!(" {prompt}   "),
            Style::default().fg(theme.muted),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn badge_color(badge: Badge, theme: &Theme) -> ratatui::style::Color {
    match badge {
        Badge::Positive => theme.success,
        Badge::NeedsSupport => theme.warning,
        Badge::Neutral => theme.muted,
    }
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App, view: &ChatView) {
    let theme = &app.theme;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = if view.history.is_empty() {
        vec![ListItem::new(Span::styled(
            "No conversations yet",
            Style::default().fg(theme.muted),
        ))]
    } else {
        view.history
            .iter()
            .map(|h| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(h.label.clone(), Style::default().fg(theme.muted)),
                        Span::raw(" "),
                        Span::styled(
                            h.badge.label(),
                            Style::default().fg(badge_color(h.badge, theme)),
                        ),
                    ]),
                    Line::from(Span::styled(
                        h.preview.clone(),
                        Style::default().fg(theme.foreground),
                    )),
                ])
            })
            .collect()
    };
    f.render_widget(List::new(items).block(panel("Recent", theme)), rows[0]);

    let gauge = Gauge::default()
        .block(panel("Mood", theme))
        .gauge_style(Style::default().fg(theme.success).bg(theme.selection))
        .percent(view.mood_percent.min(100) as u16)
        .label(format!("{}% positive", view.mood_percent));
    f.render_widget(gauge, rows[1]);
}
