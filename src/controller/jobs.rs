//! The asynchronous half of each operation
//!
//! A `Job` is built synchronously by the controller once validation passed
//! and the busy permit was taken. Running it performs exactly one backend
//! call and yields a `Completion`, which the controller applies back on the
//! UI task. Both carry the permit, so the gate stays closed until the result
//! has been rendered.

use super::busy::BusyPermit;
use super::session::SelectedFile;
use crate::api::{
    ApiError, Backend, ChatReply, MediaReply, NotesReply, SummaryReply, TextAnalysisReply, Upload,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Which operation a job or completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Chat,
    Summarize,
    Analyze,
    ProcessPdf,
    ProcessMedia,
}

impl Operation {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Chat => "/api/chat",
            Operation::Summarize => "/api/summarize",
            Operation::Analyze => "/api/process-text",
            Operation::ProcessPdf => "/api/process-pdf",
            Operation::ProcessMedia => "/api/process-video",
        }
    }
}

#[derive(Debug)]
pub(crate) enum Request {
    Chat(String),
    Summarize(String),
    Analyze(String),
    Pdf(SelectedFile),
    Media(SelectedFile),
}

impl Request {
    fn operation(&self) -> Operation {
        match self {
            Request::Chat(_) => Operation::Chat,
            Request::Summarize(_) => Operation::Summarize,
            Request::Analyze(_) => Operation::Analyze,
            Request::Pdf(_) => Operation::ProcessPdf,
            Request::Media(_) => Operation::ProcessMedia,
        }
    }
}

/// One backend call waiting to run
#[derive(Debug)]
pub struct Job {
    request: Request,
    permit: BusyPermit,
}

#[derive(Debug)]
pub(crate) enum Outcome {
    Chat(Result<ChatReply, ApiError>),
    Summary {
        original_chars: usize,
        result: Result<SummaryReply, ApiError>,
    },
    Analysis {
        original_chars: usize,
        result: Result<TextAnalysisReply, ApiError>,
    },
    Notes(Result<NotesReply, ApiError>),
    Media(Result<MediaReply, ApiError>),
    /// The task running the job panicked or was cancelled
    Crashed { panicked: bool },
}

/// Result of a job, ready to be applied to the session
#[derive(Debug)]
pub struct Completion {
    pub operation: Operation,
    pub(crate) outcome: Outcome,
    _permit: BusyPermit,
}

impl Completion {
    pub fn is_success(&self) -> bool {
        match &self.outcome {
            Outcome::Chat(r) => r.is_ok(),
            Outcome::Summary { result, .. } => result.is_ok(),
            Outcome::Analysis { result, .. } => result.is_ok(),
            Outcome::Notes(r) => r.is_ok(),
            Outcome::Media(r) => r.is_ok(),
            Outcome::Crashed { .. } => false,
        }
    }
}

async fn read_upload(file: &SelectedFile) -> Result<Upload, ApiError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| ApiError::FileRead {
            path: file.path.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(Upload {
        file_name: file.name.clone(),
        mime: file.mime.clone(),
        bytes,
    })
}

impl Job {
    pub(crate) fn new(request: Request, permit: BusyPermit) -> Self {
        Self { request, permit }
    }

    pub fn operation(&self) -> Operation {
        self.request.operation()
    }

    /// Perform the backend call
    pub async fn run<B: Backend + ?Sized>(self, backend: &B) -> Completion {
        let operation = self.operation();
        let outcome = perform(self.request, backend).await;
        Completion {
            operation,
            outcome,
            _permit: self.permit,
        }
    }
}

async fn perform<B: Backend + ?Sized>(request: Request, backend: &B) -> Outcome {
    tracing::debug!(endpoint = request.operation().endpoint(), "Request started");
    match request {
        Request::Chat(message) => Outcome::Chat(backend.chat(message).await),
        Request::Summarize(text) => Outcome::Summary {
            original_chars: text.chars().count(),
            result: backend.summarize(text).await,
        },
        Request::Analyze(text) => Outcome::Analysis {
            original_chars: text.chars().count(),
            result: backend.process_text(text).await,
        },
        Request::Pdf(file) => Outcome::Notes(match read_upload(&file).await {
            Ok(upload) => backend.process_pdf(upload).await,
            Err(e) => Err(e),
        }),
        Request::Media(file) => Outcome::Media(match read_upload(&file).await {
            Ok(upload) => backend.process_video(upload).await,
            Err(e) => Err(e),
        }),
    }
}

/// Run `job` on its own task and deliver the completion on `tx`.
///
/// Only the request moves into the task that may panic. The permit stays
/// with the supervisor and rides on whatever completion it sends, so the
/// gate stays closed until that completion is applied.
pub fn spawn<B>(job: Job, backend: Arc<B>, tx: mpsc::UnboundedSender<Completion>)
where
    B: Backend + ?Sized + 'static,
{
    let operation = job.operation();
    let Job { request, permit } = job;
    let endpoint = operation.endpoint();
    let handle = tokio::spawn(async move { perform(request, backend.as_ref()).await });

    tokio::spawn(async move {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => {
                tracing::error!(endpoint, "Request task panicked");
                Outcome::Crashed { panicked: true }
            }
            Err(_) => {
                tracing::warn!(endpoint, "Request task cancelled");
                Outcome::Crashed { panicked: false }
            }
        };
        let completion = Completion {
            operation,
            outcome,
            _permit: permit,
        };
        if tx.send(completion).is_err() {
            tracing::debug!("Completion dropped: UI loop has exited");
        }
    });
}
