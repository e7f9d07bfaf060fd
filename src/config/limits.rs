//! Validation limits, toast timing and chat behaviour

use serde::Deserialize;
use std::time::Duration;

const MB: u64 = 1024 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Limits
// ─────────────────────────────────────────────────────────────────────────────

/// Client-side validation limits, checked before any network call
#[derive(Debug, Clone, PartialEq)]
pub struct Limits {
    /// Largest accepted video/audio file, in MB
    pub max_media_mb: u64,
    /// Largest accepted PDF, in MB
    pub max_pdf_mb: u64,
    /// Minimum trimmed length for text analysis (summarize has none)
    pub min_analysis_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_media_mb: 200,
            max_pdf_mb: 200,
            min_analysis_chars: 50,
        }
    }
}

impl Limits {
    pub fn max_media_bytes(&self) -> u64 {
        self.max_media_mb * MB
    }

    pub fn max_pdf_bytes(&self) -> u64 {
        self.max_pdf_mb * MB
    }

    pub fn from_file(file: Option<FileLimits>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            max_media_mb: file.max_media_mb.unwrap_or(defaults.max_media_mb),
            max_pdf_mb: file.max_pdf_mb.unwrap_or(defaults.max_pdf_mb),
            min_analysis_chars: file
                .min_analysis_chars
                .unwrap_or(defaults.min_analysis_chars),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLimits {
    pub max_media_mb: Option<u64>,
    pub max_pdf_mb: Option<u64>,
    pub min_analysis_chars: Option<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Notifications
// ─────────────────────────────────────────────────────────────────────────────

/// Toast behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationConfig {
    /// Seconds before a toast dismisses itself
    pub toast_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { toast_secs: 4 }
    }
}

impl NotificationConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }

    pub fn from_file(file: Option<FileNotificationConfig>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            toast_secs: file.toast_secs.unwrap_or(Self::default().toast_secs),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileNotificationConfig {
    pub toast_secs: Option<u64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

/// Chat behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Quick prompt auto-send delay when the input is left unchanged
    pub quick_prompt_delay_ms: u64,
    /// Entries kept in the history sidebar
    pub history_size: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            quick_prompt_delay_ms: 1500,
            history_size: 10,
        }
    }
}

impl ChatConfig {
    pub fn quick_prompt_delay(&self) -> Duration {
        Duration::from_millis(self.quick_prompt_delay_ms)
    }

    pub fn from_file(file: Option<FileChatConfig>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            quick_prompt_delay_ms: file
                .quick_prompt_delay_ms
                .unwrap_or(defaults.quick_prompt_delay_ms),
            history_size: file.history_size.unwrap_or(defaults.history_size),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub quick_prompt_delay_ms: Option<u64>,
    pub history_size: Option<usize>,
}
