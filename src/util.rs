//! Shared utility functions

use regex::Regex;
use std::sync::OnceLock;

/// CSI / OSC / two-byte escape sequences
fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\x1b(?:\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\)|[@-Z\\-_])")
            .expect("ANSI pattern is a valid regex")
    })
}

/// Make arbitrary user or server text safe to put in a terminal cell.
///
/// Escape sequences are removed outright. Other control characters are
/// dropped except newline, which is kept, and tab, which becomes a space.
pub fn display_safe(s: &str) -> String {
    let stripped = ansi_pattern().replace_all(s, "");
    stripped
        .chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// First `max_chars` characters of `s`, with `...` appended when cut
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Byte count as megabytes with two decimals, e.g. "1.50 MB"
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
