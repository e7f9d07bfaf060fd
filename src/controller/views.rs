//! Render-ready view models
//!
//! Every string that came from the user or the backend passes through
//! `display_safe` here, so renderers can draw fields verbatim.

use super::insights::{mood_percent, Badge};
use super::session::{
    HealthStatus, MediaResult, NotesResult, SelectedFile, SessionState, Sender, TextResult,
};
use crate::util::{display_safe, format_mb};
use chrono::{DateTime, Local};

fn safe_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| display_safe(s)).collect()
}

fn clock(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// `round((1 - summary / original) * 100)`, in characters
pub fn compression_percent(original_chars: usize, summary_chars: usize) -> i64 {
    if original_chars == 0 {
        return 0;
    }
    ((1.0 - summary_chars as f64 / original_chars as f64) * 100.0).round() as i64
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryView {
    pub label: String,
    pub preview: String,
    pub badge: Badge,
}

#[derive(Debug, Clone)]
pub struct ChatView {
    pub messages: Vec<MessageView>,
    pub typing: bool,
    pub history: Vec<HistoryView>,
    pub mood_percent: u32,
}

impl ChatView {
    pub fn build(state: &SessionState) -> Self {
        Self {
            messages: state
                .chat_log
                .iter()
                .map(|m| MessageView {
                    sender: m.sender,
                    text: display_safe(&m.text),
                    timestamp: m.timestamp.clone(),
                })
                .collect(),
            typing: state.typing,
            history: state
                .history
                .entries()
                .map(|e| HistoryView {
                    label: e.label(),
                    preview: display_safe(&e.preview),
                    badge: e.badge,
                })
                .collect(),
            mood_percent: mood_percent(&state.chat_log),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Summarizer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TextResultView {
    Summary {
        summary: String,
        key_points: Vec<String>,
        original_chars: usize,
        compression_percent: i64,
        generated: String,
    },
    Analysis {
        summary: String,
        key_concepts: Vec<String>,
        key_points: Vec<String>,
        character_count: usize,
        concept_count: usize,
        generated: String,
    },
}

impl TextResultView {
    pub fn build(result: &TextResult) -> Self {
        match result {
            TextResult::Summary {
                reply,
                original_chars,
                generated_at,
            } => TextResultView::Summary {
                summary: display_safe(&reply.summary),
                key_points: safe_all(&reply.key_points),
                original_chars: *original_chars,
                compression_percent: compression_percent(
                    *original_chars,
                    reply.summary.chars().count(),
                ),
                generated: clock(generated_at),
            },
            TextResult::Analysis {
                reply,
                original_chars,
                generated_at,
            } => TextResultView::Analysis {
                summary: display_safe(&reply.summary),
                key_concepts: safe_all(&reply.key_concepts),
                key_points: safe_all(&reply.key_points),
                character_count: *original_chars,
                concept_count: reply.key_concepts.len(),
                generated: clock(generated_at),
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Uploads
// ─────────────────────────────────────────────────────────────────────────────

/// What the upload affordance shows once a file is accepted
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionView {
    pub name: String,
    pub size: String,
}

impl SelectionView {
    pub fn build(file: &SelectedFile) -> Self {
        Self {
            name: display_safe(&file.name),
            size: format_mb(file.size),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotesView {
    /// Non-blank lines of the notes
    pub note_lines: Vec<String>,
    pub key_terms: Vec<String>,
    pub key_term_count: usize,
    pub pages: String,
    pub generated: String,
}

impl NotesView {
    pub fn build(result: &NotesResult) -> Self {
        let reply = &result.reply;
        Self {
            note_lines: reply
                .smart_notes
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(display_safe)
                .collect(),
            key_terms: safe_all(&reply.key_terms),
            key_term_count: reply.key_terms.len(),
            pages: match reply.pages {
                Some(p) if p > 0 => p.to_string(),
                _ => "N/A".to_string(),
            },
            generated: clock(&result.generated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaView {
    pub summary: String,
    pub transcription: String,
    pub file_type: String,
    pub duration: String,
    /// "Gemini AI" or "Placeholder"
    pub engine: &'static str,
    pub ai_powered: bool,
    pub generated: String,
}

impl MediaView {
    pub fn build(result: &MediaResult) -> Self {
        let reply = &result.reply;
        let or = |field: &Option<String>, fallback: &str| {
            field
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(display_safe)
                .unwrap_or_else(|| fallback.to_string())
        };
        Self {
            summary: or(&reply.summary, "No summary available"),
            transcription: or(&reply.transcription, "No transcription available"),
            file_type: or(&reply.file_type, "Unknown"),
            duration: or(&reply.duration, "Unknown"),
            engine: if reply.ai_powered {
                "Gemini AI"
            } else {
                "Placeholder"
            },
            ai_powered: reply.ai_powered,
            generated: clock(&result.generated_at),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HealthView {
    Checking,
    Online {
        app_name: String,
        features: Vec<String>,
        ai_available: bool,
    },
    Offline(String),
}

impl HealthView {
    pub fn build(status: &HealthStatus) -> Self {
        match status {
            HealthStatus::Unknown => HealthView::Checking,
            HealthStatus::Online(reply) => HealthView::Online {
                app_name: reply
                    .app_name
                    .as_deref()
                    .map(display_safe)
                    .unwrap_or_else(|| "StudyByte".to_string()),
                features: safe_all(&reply.features),
                ai_available: reply.gemini_available,
            },
            HealthStatus::Offline(reason) => HealthView::Offline(display_safe(reason)),
        }
    }
}
