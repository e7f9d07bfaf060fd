//! Wire types for the StudyByte backend
//!
//! Request bodies are what the endpoints accept; reply types mirror the JSON
//! the backend returns. Fields the client cannot render without are required
//! (a missing one is a decode failure); everything decorative is optional.

use serde::{Deserialize, Serialize};

/// Body for `POST /api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Body for `POST /api/summarize` and `POST /api/process-text`
#[derive(Debug, Clone, Serialize)]
pub struct TextRequest {
    pub text: String,
}

/// Reply from `/api/chat`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatReply {
    pub response: String,
    /// Backend sentiment label ("positive", "negative", "neutral")
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub ai_powered: Option<bool>,
    /// Server-side `HH:MM`; the client stamps its own display time
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Reply from `/api/summarize`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SummaryReply {
    pub summary: String,
    /// The bundled backend omits this field; treat absence as no points
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub ai_powered: Option<bool>,
}

/// Reply from `/api/process-text`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TextAnalysisReply {
    pub summary: String,
    pub key_concepts: Vec<String>,
    pub key_points: Vec<String>,
    #[serde(default)]
    pub word_count: Option<u64>,
    #[serde(default)]
    pub character_count: Option<u64>,
}

/// Reply from `/api/process-pdf`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NotesReply {
    pub smart_notes: String,
    pub key_terms: Vec<String>,
    #[serde(default)]
    pub pages: Option<u64>,
}

/// Reply from `/api/process-video`
///
/// Every field is optional: the view falls back to placeholder text.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MediaReply {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub transcription: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub ai_powered: bool,
}

/// Reply from `GET /api/health`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HealthReply {
    pub status: String,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub gemini_available: bool,
}

/// Error envelope the backend uses for both non-2xx and in-body failures
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// A file ready to be sent as a multipart part
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reply_tolerates_missing_key_points() {
        let reply: SummaryReply =
            serde_json::from_str(r#"{"summary":"short","ai_powered":false}"#).unwrap();
        assert_eq!(reply.summary, "short");
        assert!(reply.key_points.is_empty());
    }

    #[test]
    fn notes_reply_requires_key_terms() {
        let parsed: Result<NotesReply, _> = serde_json::from_str(r#"{"smart_notes":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn media_reply_defaults_everything() {
        let reply: MediaReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply, MediaReply::default());
        assert!(!reply.ai_powered);
    }

    #[test]
    fn chat_reply_ignores_unknown_fields() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response":"hi","sentiment":"positive","ai_powered":true,"timestamp":"10:42","extra":1}"#,
        )
        .unwrap();
        assert_eq!(reply.response, "hi");
        assert_eq!(reply.sentiment.as_deref(), Some("positive"));
    }
}
