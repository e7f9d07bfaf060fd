//! Session state: everything the views render from

use super::editor::LineEditor;
use super::insights::ChatHistory;
use super::notify::LoadingOverlay;
use crate::api::{HealthReply, MediaReply, NotesReply, SummaryReply, TextAnalysisReply};
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Top-level views. Exactly one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    MentalHealth,
    TextSummarizer,
    PdfProcessor,
    VideoProcessor,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::MentalHealth,
        Section::TextSummarizer,
        Section::PdfProcessor,
        Section::VideoProcessor,
    ];

    /// Label used in the title-bar navigation
    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::MentalHealth => "Mental Health",
            Section::TextSummarizer => "Text Summarizer",
            Section::PdfProcessor => "Smart Notes",
            Section::VideoProcessor => "Media Analysis",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> Option<Section> {
        Self::ALL.get(i).copied()
    }

    pub fn next(&self) -> Section {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Section {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "AI Companion",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Local `HH:MM`
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Local::now().format("%H:%M").to_string(),
        }
    }
}

/// Which upload affordance a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Media,
}

/// A file that passed validation and is waiting to be processed
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Result slots
// ─────────────────────────────────────────────────────────────────────────────

/// Latest output of the summarizer section
#[derive(Debug, Clone)]
pub enum TextResult {
    Summary {
        reply: SummaryReply,
        /// Character count of the submitted (trimmed) text
        original_chars: usize,
        generated_at: DateTime<Local>,
    },
    Analysis {
        reply: TextAnalysisReply,
        original_chars: usize,
        generated_at: DateTime<Local>,
    },
}

#[derive(Debug, Clone)]
pub struct NotesResult {
    pub reply: NotesReply,
    pub generated_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct MediaResult {
    pub reply: MediaReply,
    pub generated_at: DateTime<Local>,
}

/// Backend health as last seen
#[derive(Debug, Clone)]
pub enum HealthStatus {
    Unknown,
    Online(HealthReply),
    Offline(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// UI state owned by the controller
#[derive(Debug)]
pub struct SessionState {
    pub section: Section,
    pub chat_log: Vec<ChatMessage>,
    pub history: ChatHistory,
    /// Chat reply pending
    pub typing: bool,

    pub chat_input: LineEditor,
    pub text_input: LineEditor,
    /// Path prompt for the PDF upload
    pub pdf_path_input: LineEditor,
    /// Path prompt for the media upload
    pub media_path_input: LineEditor,

    pub selected_pdf: Option<SelectedFile>,
    pub selected_media: Option<SelectedFile>,

    pub text_result: Option<TextResult>,
    pub notes_result: Option<NotesResult>,
    pub media_result: Option<MediaResult>,

    pub health: HealthStatus,
    pub overlay: LoadingOverlay,
}

impl SessionState {
    pub fn new(history_size: usize) -> Self {
        Self {
            section: Section::Dashboard,
            chat_log: Vec::new(),
            history: ChatHistory::new(history_size),
            typing: false,
            chat_input: LineEditor::single_line(),
            text_input: LineEditor::multi_line(),
            pdf_path_input: LineEditor::single_line(),
            media_path_input: LineEditor::single_line(),
            selected_pdf: None,
            selected_media: None,
            text_result: None,
            notes_result: None,
            media_result: None,
            health: HealthStatus::Unknown,
            overlay: LoadingOverlay::default(),
        }
    }

    pub fn selection(&self, kind: UploadKind) -> Option<&SelectedFile> {
        match kind {
            UploadKind::Pdf => self.selected_pdf.as_ref(),
            UploadKind::Media => self.selected_media.as_ref(),
        }
    }

    pub(crate) fn selection_mut(&mut self, kind: UploadKind) -> &mut Option<SelectedFile> {
        match kind {
            UploadKind::Pdf => &mut self.selected_pdf,
            UploadKind::Media => &mut self.selected_media,
        }
    }

    pub(crate) fn path_input_mut(&mut self, kind: UploadKind) -> &mut LineEditor {
        match kind {
            UploadKind::Pdf => &mut self.pdf_path_input,
            UploadKind::Media => &mut self.media_path_input,
        }
    }
}
