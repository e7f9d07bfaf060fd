//! Bordered text input with terminal cursor placement
//!
//! Single-line editors scroll horizontally to keep the cursor in view;
//! multi-line editors wrap at newlines only and scroll vertically.

use crate::controller::editor::LineEditor;
use crate::tui::theme::Theme;
use crate::util::display_safe;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub struct InputBox<'a> {
    pub editor: &'a LineEditor,
    pub title: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
}

impl InputBox<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.editor.is_disabled() {
            theme.muted
        } else if self.focused {
            theme.accent
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);

        if self.editor.is_empty() {
            let hint = Paragraph::new(Span::styled(
                self.placeholder,
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ))
            .block(block);
            f.render_widget(hint, area);
            self.place_cursor(f, inner, (0, 0));
            return;
        }

        let (col, row) = cursor_cell(self.editor.before_cursor());
        let x_offset = col.saturating_sub(inner.width.saturating_sub(1));
        let y_offset = row.saturating_sub(inner.height.saturating_sub(1));

        let lines: Vec<Line> = self
            .editor
            .text()
            .split('\n')
            .map(|l| Line::from(display_safe(l)))
            .collect();
        let body = Paragraph::new(lines)
            .style(Style::default().fg(theme.foreground))
            .scroll((y_offset, x_offset))
            .block(block);
        f.render_widget(body, area);

        self.place_cursor(f, inner, (col - x_offset, row - y_offset));
    }

    fn place_cursor(&self, f: &mut Frame, inner: Rect, (col, row): (u16, u16)) {
        if self.focused && !self.editor.is_disabled() && inner.width > 0 && inner.height > 0 {
            f.set_cursor_position(Position::new(inner.x + col, inner.y + row));
        }
    }
}

/// Column and row of the cursor, given the text before it
fn cursor_cell(before: &str) -> (u16, u16) {
    let row = before.matches('\n').count() as u16;
    let last = before.rsplit('\n').next().unwrap_or_default();
    (last.width() as u16, row)
}
