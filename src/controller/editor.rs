//! Editable text buffers for the chat input, the summarizer text area and
//! the file path prompts
//!
//! The cursor is a byte offset that always sits on a grapheme boundary.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    text: String,
    cursor: usize,
    /// Newlines are allowed (summarizer text area)
    multiline: bool,
    /// Input is ignored while a request is in flight
    disabled: bool,
}

impl LineEditor {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Replace the contents and move the cursor to the end
    pub fn set(&mut self, text: &str) {
        self.text = self.clean(text);
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        if self.disabled || (c.is_control() && !(self.multiline && c == '\n')) {
            return;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text; newlines collapse to spaces in single-line mode
    pub fn insert_str(&mut self, s: &str) {
        if self.disabled {
            return;
        }
        let cleaned = self.clean(s);
        self.text.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
    }

    /// Drop carriage returns and controls; newlines survive only in
    /// multi-line mode
    fn clean(&self, s: &str) -> String {
        s.chars()
            .filter_map(|c| match c {
                '\r' => None,
                '\n' if self.multiline => Some('\n'),
                '\n' | '\t' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect()
    }

    pub fn newline(&mut self) {
        if self.multiline {
            self.insert_char('\n');
        }
    }

    pub fn backspace(&mut self) {
        if self.disabled {
            return;
        }
        if let Some(start) = self.prev_boundary() {
            self.text.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    pub fn delete(&mut self) {
        if self.disabled {
            return;
        }
        if let Some(end) = self.next_boundary() {
            self.text.replace_range(self.cursor..end, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(start) = self.prev_boundary() {
            self.cursor = start;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.cursor = end;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
    }

    /// Text before the cursor, for placing the terminal cursor
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut editor = LineEditor::single_line();
        editor.insert_str("ok 👍🏽");
        editor.backspace();
        assert_eq!(editor.text(), "ok ");
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn cursor_moves_over_combining_marks() {
        let mut editor = LineEditor::single_line();
        editor.set("cafe\u{301}!");
        editor.move_left();
        editor.move_left();
        assert_eq!(editor.before_cursor(), "caf");
        editor.delete();
        assert_eq!(editor.text(), "caf!");
    }

    #[test]
    fn single_line_flattens_pasted_newlines() {
        let mut editor = LineEditor::single_line();
        editor.insert_str("one\r\ntwo\tthree");
        assert_eq!(editor.text(), "one two three");
        editor.newline();
        assert_eq!(editor.text(), "one two three");
    }

    #[test]
    fn multi_line_keeps_newlines() {
        let mut editor = LineEditor::multi_line();
        editor.insert_str("a\nb");
        editor.newline();
        editor.insert_char('c');
        assert_eq!(editor.text(), "a\nb\nc");
    }

    #[test]
    fn disabled_editor_ignores_typing() {
        let mut editor = LineEditor::single_line();
        editor.set("keep");
        editor.set_disabled(true);
        editor.insert_char('x');
        editor.backspace();
        assert_eq!(editor.text(), "keep");
    }

    #[test]
    fn set_drops_carriage_returns() {
        let mut editor = LineEditor::multi_line();
        editor.set("line one\r\nline two\r\n");
        assert_eq!(editor.text(), "line one\nline two\n");
        assert_eq!(editor.cursor(), editor.text().len());

        let mut editor = LineEditor::single_line();
        editor.set("a\r\nb");
        assert_eq!(editor.text(), "a b");
    }
}
