// API module - typed access to the StudyByte backend
//
// The controller only sees the `Backend` trait. The real implementation is
// `HttpBackend` (reqwest); tests substitute a scripted backend.

mod client;
mod error;
pub mod models;

pub use client::HttpBackend;
pub use error::ApiError;
pub use models::{
    ChatReply, HealthReply, MediaReply, NotesReply, SummaryReply, TextAnalysisReply, Upload,
};

use async_trait::async_trait;

/// Endpoints the client consumes
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /api/chat`
    async fn chat(&self, message: String) -> Result<ChatReply, ApiError>;

    /// `POST /api/summarize`
    async fn summarize(&self, text: String) -> Result<SummaryReply, ApiError>;

    /// `POST /api/process-text`
    async fn process_text(&self, text: String) -> Result<TextAnalysisReply, ApiError>;

    /// `POST /api/process-pdf` with multipart field `pdf_file`
    async fn process_pdf(&self, upload: Upload) -> Result<NotesReply, ApiError>;

    /// `POST /api/process-video` with multipart field `video_file`
    async fn process_video(&self, upload: Upload) -> Result<MediaReply, ApiError>;

    /// `GET /api/health`
    async fn health(&self) -> Result<HealthReply, ApiError>;
}
