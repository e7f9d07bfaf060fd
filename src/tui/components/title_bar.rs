// Title bar component
//
// App name on the left, section tabs in the middle. The highlighted tab is
// the section being navigated to, even while the old one is still fading.

use crate::controller::Section;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let titles: Vec<Line> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("F{} {}", i + 1, s.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.vc.section().index())
        .style(Style::default().fg(theme.muted))
        .highlight_style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("│", Style::default().fg(theme.border)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.title))
                .title(Span::styled(
                    " 🎓 StudyByte ",
                    Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
                ))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(tabs, area);
}
