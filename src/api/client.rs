//! reqwest implementation of `Backend`

use super::error::ApiError;
use super::models::*;
use super::Backend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// HTTP client bound to one backend base URL
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client for `base_url`. `timeout` of `None` means a call waits
    /// as long as the backend takes.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(4);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST json");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &'static str,
        upload: Upload,
    ) -> Result<T, ApiError> {
        tracing::debug!(
            path,
            field,
            file = %upload.file_name,
            bytes = upload.bytes.len(),
            "POST multipart"
        );
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime)?;
        let form = Form::new().part(field, part);
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }
}

/// Turn a response into a typed reply.
///
/// Non-2xx is a failure carrying the body's `error` field when it parses;
/// a 2xx body that carries `error` is a failure too.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|b| b.error);
        tracing::warn!(%status, message = message.as_deref().unwrap_or(""), "Backend returned error status");
        return Err(ApiError::Status { status, message });
    }

    if let Ok(ErrorBody { error }) = serde_json::from_slice::<ErrorBody>(&body) {
        return Err(ApiError::Rejected(error));
    }

    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, message: String) -> Result<ChatReply, ApiError> {
        self.post_json("/api/chat", &ChatRequest { message }).await
    }

    async fn summarize(&self, text: String) -> Result<SummaryReply, ApiError> {
        self.post_json("/api/summarize", &TextRequest { text }).await
    }

    async fn process_text(&self, text: String) -> Result<TextAnalysisReply, ApiError> {
        self.post_json("/api/process-text", &TextRequest { text })
            .await
    }

    async fn process_pdf(&self, upload: Upload) -> Result<NotesReply, ApiError> {
        self.post_file("/api/process-pdf", "pdf_file", upload).await
    }

    async fn process_video(&self, upload: Upload) -> Result<MediaReply, ApiError> {
        self.post_file("/api/process-video", "video_file", upload)
            .await
    }

    async fn health(&self) -> Result<HealthReply, ApiError> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn serve(app: Router) -> HttpBackend {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        HttpBackend::new(&format!("http://{addr}/"), None).unwrap()
    }

    async fn echo_chat(Json(body): Json<Value>) -> Json<Value> {
        let message = body["message"].as_str().unwrap_or_default().to_string();
        Json(json!({
            "response": format!("echo: {message}"),
            "sentiment": "neutral",
            "ai_powered": false,
            "timestamp": "09:15"
        }))
    }

    async fn describe_upload(mut multipart: Multipart) -> Json<Value> {
        let field = multipart.next_field().await.unwrap().unwrap();
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let mime = field.content_type().unwrap_or_default().to_string();
        let len = field.bytes().await.unwrap().len();
        Json(json!({
            "smart_notes": format!("{name}|{file_name}|{mime}|{len}"),
            "key_terms": ["alpha", "beta"],
            "pages": 3
        }))
    }

    #[tokio::test]
    async fn chat_posts_message_json() {
        let backend = serve(Router::new().route("/api/chat", post(echo_chat))).await;
        let reply = backend.chat("hello".into()).await.unwrap();
        assert_eq!(reply.response, "echo: hello");
        assert_eq!(reply.timestamp.as_deref(), Some("09:15"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:5000///", None).unwrap();
        assert_eq!(backend.url("/api/chat"), "http://localhost:5000/api/chat");
    }

    #[tokio::test]
    async fn pdf_upload_uses_pdf_file_field() {
        let backend = serve(Router::new().route("/api/process-pdf", post(describe_upload))).await;
        let reply = backend
            .process_pdf(Upload {
                file_name: "notes.pdf".into(),
                mime: "application/pdf".into(),
                bytes: vec![0u8; 1234],
            })
            .await
            .unwrap();
        assert_eq!(reply.smart_notes, "pdf_file|notes.pdf|application/pdf|1234");
        assert_eq!(reply.key_terms.len(), 2);
        assert_eq!(reply.pages, Some(3));
    }

    #[tokio::test]
    async fn non_success_status_carries_server_message() {
        let app = Router::new().route(
            "/api/process-video",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Unsupported file format"})),
                )
            }),
        );
        let backend = serve(app).await;
        let err = backend
            .process_video(Upload {
                file_name: "clip.mp4".into(),
                mime: "video/mp4".into(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(message.as_deref(), Some("Unsupported file format"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_has_no_message() {
        let app = Router::new().route(
            "/api/summarize",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let backend = serve(app).await;
        let err = backend.summarize("text".into()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { message: None, .. }));
    }

    #[tokio::test]
    async fn success_with_error_field_is_rejected() {
        let app = Router::new().route(
            "/api/process-text",
            post(|| async { Json(json!({"error": "Text too short"})) }),
        );
        let backend = serve(app).await;
        let err = backend.process_text("short".into()).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Text too short"));
    }

    #[tokio::test]
    async fn malformed_json_is_decode_error() {
        let app = Router::new().route("/api/summarize", post(|| async { "not json" }));
        let backend = serve(app).await;
        let err = backend.summarize("text".into()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn health_reads_feature_list() {
        let app = Router::new().route(
            "/api/health",
            get(|| async {
                Json(json!({
                    "status": "healthy",
                    "app_name": "AI Student Companion",
                    "features": ["Mental Health Chat", "PDF Smart Notes"],
                    "gemini_available": true
                }))
            }),
        );
        let backend = serve(app).await;
        let health = backend.health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.features.len(), 2);
        assert!(health.gemini_available);
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(&format!("http://{addr}"), None).unwrap();
        let err = backend.chat("hi".into()).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
