// Theme support for the TUI
//
// A handful of built-in palettes selected by name from the config file.
// Unknown names fall back to the StudyByte palette.

use crate::controller::ToastKind;
use crate::logging::LogLevel;
use ratatui::style::{Color, Style};
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,

    // Accents
    pub title: Color,
    pub accent: Color,
    pub highlight: Color,
    pub selection: Color,
    pub status_bar: Color,

    // Chat bubbles
    pub user_message: Color,
    pub ai_message: Color,

    // Toast kinds
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub danger: Color,

    pub particle: Color,
}

impl Theme {
    /// Names accepted by `by_name`
    pub const NAMES: [&'static str; 4] = ["StudyByte", "Midnight", "Forest", "Paper"];

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "midnight" => Self::midnight(),
            "forest" => Self::forest(),
            "paper" => Self::paper(),
            "studybyte" => Self::studybyte(),
            _ => {
                tracing::warn!(name, known = ?Self::NAMES, "Unknown theme, using StudyByte");
                Self::studybyte()
            }
        }
    }

    /// Default palette: soft violet on deep navy
    pub fn studybyte() -> Self {
        Self {
            name: "StudyByte".to_string(),
            background: Color::Rgb(0x1a, 0x1b, 0x2e),
            foreground: Color::Rgb(0xe6, 0xe6, 0xf0),
            muted: Color::Rgb(0x8a, 0x8c, 0xa8),
            border: Color::Rgb(0x4a, 0x4e, 0x7a),
            border_type: BorderType::Rounded,
            title: Color::Rgb(0xa7, 0x8b, 0xfa),
            accent: Color::Rgb(0x66, 0x7e, 0xea),
            highlight: Color::Rgb(0xf6, 0xc1, 0x77),
            selection: Color::Rgb(0x3b, 0x3f, 0x6b),
            status_bar: Color::Rgb(0x7d, 0xd3, 0xa8),
            user_message: Color::Rgb(0x93, 0xc5, 0xfd),
            ai_message: Color::Rgb(0xc4, 0xb5, 0xfd),
            success: Color::Rgb(0x4a, 0xde, 0x80),
            info: Color::Rgb(0x60, 0xa5, 0xfa),
            warning: Color::Rgb(0xfb, 0xbf, 0x24),
            danger: Color::Rgb(0xf8, 0x71, 0x71),
            particle: Color::Rgb(0x6d, 0x5d, 0xb0),
        }
    }

    pub fn midnight() -> Self {
        Self {
            name: "Midnight".to_string(),
            background: Color::Rgb(0x0b, 0x10, 0x20),
            foreground: Color::Rgb(0xcb, 0xd5, 0xe1),
            muted: Color::Rgb(0x64, 0x74, 0x8b),
            border: Color::Rgb(0x33, 0x41, 0x55),
            border_type: BorderType::Plain,
            title: Color::Rgb(0x38, 0xbd, 0xf8),
            accent: Color::Rgb(0x22, 0xd3, 0xee),
            highlight: Color::Rgb(0xfa, 0xcc, 0x15),
            selection: Color::Rgb(0x1e, 0x29, 0x3b),
            status_bar: Color::Rgb(0x38, 0xbd, 0xf8),
            user_message: Color::Rgb(0x7d, 0xd3, 0xfc),
            ai_message: Color::Rgb(0xa5, 0xb4, 0xfc),
            success: Color::Rgb(0x34, 0xd3, 0x99),
            info: Color::Rgb(0x38, 0xbd, 0xf8),
            warning: Color::Rgb(0xfa, 0xcc, 0x15),
            danger: Color::Rgb(0xfb, 0x71, 0x85),
            particle: Color::Rgb(0x1e, 0x40, 0x6e),
        }
    }

    pub fn forest() -> Self {
        Self {
            name: "Forest".to_string(),
            background: Color::Rgb(0x14, 0x1f, 0x17),
            foreground: Color::Rgb(0xe2, 0xe8, 0xd8),
            muted: Color::Rgb(0x7c, 0x8f, 0x76),
            border: Color::Rgb(0x3f, 0x5a, 0x43),
            border_type: BorderType::Rounded,
            title: Color::Rgb(0x86, 0xef, 0xac),
            accent: Color::Rgb(0x4a, 0xde, 0x80),
            highlight: Color::Rgb(0xfd, 0xe6, 0x8a),
            selection: Color::Rgb(0x2a, 0x3d, 0x2e),
            status_bar: Color::Rgb(0xbe, 0xf2, 0x64),
            user_message: Color::Rgb(0xbe, 0xf2, 0x64),
            ai_message: Color::Rgb(0x86, 0xef, 0xac),
            success: Color::Rgb(0x4a, 0xde, 0x80),
            info: Color::Rgb(0x67, 0xe8, 0xf9),
            warning: Color::Rgb(0xfd, 0xba, 0x74),
            danger: Color::Rgb(0xfc, 0xa5, 0xa5),
            particle: Color::Rgb(0x36, 0x5a, 0x3c),
        }
    }

    /// Light palette for bright terminals
    pub fn paper() -> Self {
        Self {
            name: "Paper".to_string(),
            background: Color::Rgb(0xfa, 0xf8, 0xf3),
            foreground: Color::Rgb(0x2d, 0x2a, 0x32),
            muted: Color::Rgb(0x8b, 0x86, 0x90),
            border: Color::Rgb(0xc9, 0xc2, 0xb8),
            border_type: BorderType::Plain,
            title: Color::Rgb(0x6d, 0x28, 0xd9),
            accent: Color::Rgb(0x4f, 0x46, 0xe5),
            highlight: Color::Rgb(0xb4, 0x53, 0x09),
            selection: Color::Rgb(0xe7, 0xe0, 0xf5),
            status_bar: Color::Rgb(0x04, 0x78, 0x57),
            user_message: Color::Rgb(0x1d, 0x4e, 0xd8),
            ai_message: Color::Rgb(0x6d, 0x28, 0xd9),
            success: Color::Rgb(0x15, 0x80, 0x3d),
            info: Color::Rgb(0x1d, 0x4e, 0xd8),
            warning: Color::Rgb(0xb4, 0x53, 0x09),
            danger: Color::Rgb(0xb9, 0x1c, 0x1c),
            particle: Color::Rgb(0xdd, 0xd6, 0xfe),
        }
    }

    /// Drop the palette background so the terminal's own shows through
    pub fn with_background(mut self, enabled: bool) -> Self {
        if !enabled {
            self.background = Color::Reset;
        }
        self
    }

    pub fn toast_color(&self, kind: ToastKind) -> Color {
        match kind {
            ToastKind::Success => self.success,
            ToastKind::Info => self.info,
            ToastKind::Warning => self.warning,
            ToastKind::Danger => self.danger,
        }
    }

    pub fn log_style(&self, level: &LogLevel) -> Style {
        let fg = match level {
            LogLevel::Error => self.danger,
            LogLevel::Warn => self.warning,
            LogLevel::Info => self.foreground,
            LogLevel::Debug | LogLevel::Trace => self.muted,
        };
        Style::default().fg(fg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::studybyte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_with_fallback() {
        assert_eq!(Theme::by_name("forest").name, "Forest");
        assert_eq!(Theme::by_name("MIDNIGHT").name, "Midnight");
        assert_eq!(Theme::by_name("no-such-theme").name, "StudyByte");
        for name in Theme::NAMES {
            assert_eq!(Theme::by_name(name).name, name);
        }
    }

    #[test]
    fn background_can_be_disabled() {
        let theme = Theme::paper().with_background(false);
        assert_eq!(theme.background, Color::Reset);
        assert_ne!(Theme::paper().with_background(true).background, Color::Reset);
    }
}
