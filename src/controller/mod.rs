// Controller module - UI state and the operations that change it
//
// `ViewController` knows nothing about terminals. The TUI feeds it key
// actions and renders the view models it produces; the headless CLI drives
// the same operations through the inline `async` wrappers.

mod busy;
pub mod editor;
pub mod export;
pub mod insights;
pub mod jobs;
pub mod navigation;
pub mod notify;
pub mod session;
pub mod validation;
pub mod views;

pub use busy::{BusyGate, BusyPermit};
pub use jobs::{Completion, Job, Operation};
pub use navigation::Phase;
pub use notify::{Notification, Notifications, ToastKind};
pub use session::{
    ChatMessage, HealthStatus, MediaResult, NotesResult, Section, Sender,
    SessionState, TextResult, UploadKind,
};

use crate::api::{ApiError, Backend, HealthReply};
use crate::config::{Config, Limits};
use chrono::Local;
use jobs::{Outcome, Request};
use navigation::Navigator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub const CHAT_FALLBACK: &str = "I apologize, but I'm having trouble processing your message right now. Please try again in a moment. 💙";

pub const CHAT_GREETING: &str =
    "Hi there! I'm here to support you on your wellness journey. How are you feeling today? 😊";

pub const GENERIC_FAILURE: &str = "An error occurred while processing your request.";

/// Preset prompts offered under the chat input
pub const QUICK_PROMPTS: [&str; 4] = [
    "I'm feeling stressed about my exams",
    "How can I manage my study time better?",
    "I need some motivation to keep going",
    "Can you suggest a quick relaxation exercise?",
];

/// A quick prompt waiting to send itself
#[derive(Debug)]
struct PendingPrompt {
    text: String,
    due: Instant,
}

pub struct ViewController<B: Backend + ?Sized> {
    backend: Arc<B>,
    state: SessionState,
    busy: BusyGate,
    nav: Navigator,
    notifications: Notifications,
    limits: Limits,
    export_dir: PathBuf,
    quick_prompt_delay: Duration,
    pending_prompt: Option<PendingPrompt>,
}

impl<B: Backend + ?Sized + 'static> ViewController<B> {
    pub fn new(backend: Arc<B>, config: &Config) -> Self {
        Self {
            backend,
            state: SessionState::new(config.chat.history_size),
            busy: BusyGate::new(),
            nav: Navigator::default(),
            notifications: Notifications::new(config.notifications.toast_duration()),
            limits: config.limits.clone(),
            export_dir: config.export_dir.clone(),
            quick_prompt_delay: config.chat.quick_prompt_delay(),
            pending_prompt: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn backend(&self) -> Arc<B> {
        self.backend.clone()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.notifications.notify(kind, message);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn section(&self) -> Section {
        self.state.section
    }

    /// Section whose content should be drawn right now
    pub fn visible_section(&self, now: Instant) -> Section {
        self.nav.visible(self.state.section, now)
    }

    pub fn transition(&self, now: Instant) -> Option<Phase> {
        self.nav.current(now).map(|(_, phase)| phase)
    }

    pub fn navigate(&mut self, to: Section) -> bool {
        self.navigate_at(to, Instant::now())
    }

    /// Switch sections. Ignored while a transition plays or when `to` is
    /// already showing.
    pub fn navigate_at(&mut self, to: Section, now: Instant) -> bool {
        if !self.nav.start(self.state.section, to, now) {
            return false;
        }
        tracing::debug!(from = ?self.state.section, ?to, "Navigate");
        self.state.section = to;
        true
    }

    pub fn show_dashboard(&mut self) -> bool {
        self.navigate(Section::Dashboard)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chat
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit whatever is in the chat input
    pub fn begin_chat(&mut self) -> Option<Job> {
        let message = validation::chat_message(self.state.chat_input.text())?.to_string();
        let Some(permit) = self.busy.try_acquire() else {
            tracing::debug!("Chat ignored: another request is pending");
            return None;
        };

        self.pending_prompt = None;
        self.state.chat_input.clear();
        self.state.chat_input.set_disabled(true);
        self.state.history.record(&message);
        self.state
            .chat_log
            .push(ChatMessage::new(Sender::User, message.clone()));
        self.state.typing = true;
        self.state.overlay.show();

        Some(Job::new(Request::Chat(message), permit))
    }

    /// Fill the input with a preset; it sends itself unless edited in time
    pub fn quick_prompt(&mut self, prompt: &str) {
        self.quick_prompt_at(prompt, Instant::now());
    }

    pub(crate) fn quick_prompt_at(&mut self, prompt: &str, now: Instant) {
        if self.state.chat_input.is_disabled() {
            return;
        }
        self.state.chat_input.set(prompt);
        self.pending_prompt = Some(PendingPrompt {
            text: self.state.chat_input.text().to_string(),
            due: now + self.quick_prompt_delay,
        });
    }

    /// Empty the log and the history sidebar
    pub fn clear_chat(&mut self) {
        self.state.chat_log.clear();
        self.state.history.clear();
        self.notifications
            .notify(ToastKind::Success, "Chat cleared successfully");
        tracing::info!("Chat cleared");
    }

    /// Write the transcript into the export directory
    pub fn export_chat(&mut self) -> Option<PathBuf> {
        if self.state.chat_log.is_empty() {
            self.notifications
                .notify(ToastKind::Warning, "No chat messages to export");
            return None;
        }
        match export::write(&self.export_dir, &self.state.chat_log, Local::now().date_naive()) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Chat exported");
                self.notifications.notify(
                    ToastKind::Success,
                    format!("Chat exported successfully to {}", path.display()),
                );
                Some(path)
            }
            Err(e) => {
                tracing::error!("Chat export failed: {:#}", e);
                self.notifications
                    .notify(ToastKind::Danger, format!("Failed to export chat: {e}"));
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Summarizer
    // ─────────────────────────────────────────────────────────────────────────

    pub fn begin_summarize(&mut self) -> Option<Job> {
        let text = match validation::summary_text(self.state.text_input.text()) {
            Ok(text) => text.to_string(),
            Err(rejection) => {
                self.reject(rejection);
                return None;
            }
        };
        let permit = self.acquire("summarize")?;
        self.state.text_result = None;
        self.state.overlay.show();
        Some(Job::new(Request::Summarize(text), permit))
    }

    pub fn begin_analyze(&mut self) -> Option<Job> {
        let min = self.limits.min_analysis_chars;
        let text = match validation::analysis_text(self.state.text_input.text(), min) {
            Ok(text) => text.to_string(),
            Err(rejection) => {
                self.reject(rejection);
                return None;
            }
        };
        let permit = self.acquire("analyze")?;
        self.state.text_result = None;
        self.state.overlay.show();
        Some(Job::new(Request::Analyze(text), permit))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Uploads
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate `path` and make it the selection for `kind`. A rejected
    /// file clears any previous selection.
    pub fn select_file(&mut self, kind: UploadKind, path: &Path) -> bool {
        let checked = validation::inspect(path)
            .and_then(|file| validation::check_file(kind, &file, &self.limits).map(|_| file));

        match checked {
            Ok(file) => {
                tracing::info!(?kind, file = %file.name, bytes = file.size, "File selected");
                *self.state.selection_mut(kind) = Some(file);
                self.notifications.notify(
                    ToastKind::Success,
                    "File selected successfully! Ready to process.",
                );
                true
            }
            Err(rejection) => {
                *self.state.selection_mut(kind) = None;
                self.state.path_input_mut(kind).clear();
                self.reject(rejection);
                false
            }
        }
    }

    /// Select whatever path was typed or pasted into the prompt for `kind`
    pub fn select_from_input(&mut self, kind: UploadKind) -> bool {
        let raw = self.state.path_input_mut(kind).text().to_string();
        let path = clean_path(&raw);
        if path.is_empty() {
            self.reject(validation::Rejection::NoPath);
            return false;
        }
        self.select_file(kind, Path::new(&path))
    }

    pub fn clear_selection(&mut self, kind: UploadKind) {
        *self.state.selection_mut(kind) = None;
        self.state.path_input_mut(kind).clear();
    }

    /// Send the selected file of `kind` for processing
    pub fn begin_process(&mut self, kind: UploadKind) -> Option<Job> {
        let Some(file) = self.state.selection(kind).cloned() else {
            let message = match kind {
                UploadKind::Pdf => "Please select a PDF file first.",
                UploadKind::Media => "Please select a video or audio file first.",
            };
            self.notifications.notify(ToastKind::Warning, message);
            return None;
        };
        let permit = self.acquire("process")?;
        self.state.overlay.show();

        let request = match kind {
            UploadKind::Pdf => {
                self.state.notes_result = None;
                Request::Pdf(file)
            }
            UploadKind::Media => {
                self.state.media_result = None;
                self.notifications.notify(
                    ToastKind::Info,
                    "Processing video... This may take several minutes.",
                );
                Request::Media(file)
            }
        };
        Some(Job::new(request, permit))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completion
    // ─────────────────────────────────────────────────────────────────────────

    /// Render a finished job. Dropping the completion at the end reopens
    /// the busy gate.
    pub fn apply(&mut self, completion: Completion) {
        let endpoint = completion.operation.endpoint();
        let generated_at = Local::now();
        self.state.overlay.hide();

        match completion.outcome {
            Outcome::Chat(result) => {
                self.finish_chat();
                let text = match result {
                    Ok(reply) => {
                        tracing::info!(endpoint, "Chat reply received");
                        reply.response
                    }
                    Err(e) => {
                        tracing::warn!(endpoint, "Chat failed: {}", e);
                        CHAT_FALLBACK.to_string()
                    }
                };
                self.state
                    .chat_log
                    .push(ChatMessage::new(Sender::Assistant, text));
            }
            Outcome::Summary {
                original_chars,
                result,
            } => match result {
                Ok(reply) => {
                    tracing::info!(endpoint, original_chars, "Summary generated");
                    self.state.text_result = Some(TextResult::Summary {
                        reply,
                        original_chars,
                        generated_at,
                    });
                    self.notifications
                        .notify(ToastKind::Success, "Summary generated successfully!");
                }
                Err(e) => {
                    tracing::warn!(endpoint, "Summarize failed: {}", e);
                    self.notifications.notify(
                        ToastKind::Danger,
                        "Failed to generate summary. Please try again.",
                    );
                }
            },
            Outcome::Analysis {
                original_chars,
                result,
            } => match result {
                Ok(reply) => {
                    tracing::info!(endpoint, original_chars, "Text analysis generated");
                    self.state.text_result = Some(TextResult::Analysis {
                        reply,
                        original_chars,
                        generated_at,
                    });
                    self.notifications
                        .notify(ToastKind::Success, "Smart summary generated successfully!");
                }
                Err(e) => {
                    tracing::warn!(endpoint, "Text analysis failed: {}", e);
                    self.notifications.notify(
                        ToastKind::Danger,
                        "Failed to process text. Please try again.",
                    );
                }
            },
            Outcome::Notes(result) => match result {
                Ok(reply) => {
                    tracing::info!(endpoint, key_terms = reply.key_terms.len(), "Smart notes extracted");
                    self.state.notes_result = Some(NotesResult {
                        reply,
                        generated_at,
                    });
                    self.notifications
                        .notify(ToastKind::Success, "Smart notes extracted successfully!");
                }
                Err(e) => {
                    tracing::warn!(endpoint, "PDF processing failed: {}", e);
                    let message = pdf_failure_message(&e);
                    self.notifications.notify(ToastKind::Danger, message);
                }
            },
            Outcome::Media(result) => match result {
                Ok(reply) => {
                    tracing::info!(endpoint, ai_powered = reply.ai_powered, "Media processed");
                    self.state.media_result = Some(MediaResult {
                        reply,
                        generated_at,
                    });
                    self.notifications.notify(
                        ToastKind::Success,
                        "Video processed and summarized successfully! 🎉",
                    );
                }
                Err(e) => {
                    tracing::warn!(endpoint, "Media processing failed: {}", e);
                    self.notifications.notify(
                        ToastKind::Danger,
                        format!("Failed to process video: {}", e.detail()),
                    );
                }
            },
            Outcome::Crashed { panicked } => {
                if completion.operation == Operation::Chat {
                    self.finish_chat();
                }
                tracing::error!(endpoint, panicked, "Request did not complete");
                self.notifications.notify(ToastKind::Danger, GENERIC_FAILURE);
            }
        }
    }

    fn finish_chat(&mut self) {
        self.state.typing = false;
        self.state.chat_input.set_disabled(false);
    }

    /// Record the latest health probe
    pub fn apply_health(&mut self, result: Result<HealthReply, ApiError>) {
        self.state.health = match result {
            Ok(reply) => {
                tracing::info!(status = %reply.status, ai = reply.gemini_available, "Backend health");
                HealthStatus::Online(reply)
            }
            Err(e) => {
                tracing::warn!("Backend health check failed: {}", e);
                HealthStatus::Offline(e.to_string())
            }
        };
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Time
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance timers. Returns a chat job when a quick prompt came due with
    /// its text untouched.
    pub fn tick(&mut self, now: Instant) -> Option<Job> {
        self.notifications.expire(now);
        self.nav.settle(now);

        if !self.pending_prompt.as_ref().is_some_and(|p| now >= p.due) {
            return None;
        }
        let prompt = self.pending_prompt.take()?;
        if self.state.chat_input.text() == prompt.text {
            self.begin_chat()
        } else {
            None
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Running jobs
    // ─────────────────────────────────────────────────────────────────────────

    /// Run `job` on a tokio task; its completion arrives on `tx`
    pub fn spawn(&self, job: Job, tx: mpsc::UnboundedSender<Completion>) {
        jobs::spawn(job, self.backend.clone(), tx);
    }

    async fn run_inline(&mut self, job: Option<Job>) -> bool {
        let Some(job) = job else {
            return false;
        };
        let completion = job.run(self.backend.as_ref()).await;
        self.apply(completion);
        true
    }

    /// Put `message` in the chat input and send it. False when nothing was
    /// sent.
    pub async fn send_chat(&mut self, message: &str) -> bool {
        self.state.chat_input.set(message);
        let job = self.begin_chat();
        self.run_inline(job).await
    }

    pub async fn summarize_text(&mut self, text: &str) -> bool {
        self.state.text_input.set(text);
        let job = self.begin_summarize();
        self.run_inline(job).await
    }

    pub async fn analyze_text(&mut self, text: &str) -> bool {
        self.state.text_input.set(text);
        let job = self.begin_analyze();
        self.run_inline(job).await
    }

    pub async fn process_file(&mut self, kind: UploadKind, path: &Path) -> bool {
        if !self.select_file(kind, path) {
            return false;
        }
        let job = self.begin_process(kind);
        self.run_inline(job).await
    }

    pub async fn refresh_health(&mut self) {
        let result = self.backend.health().await;
        self.apply_health(result);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn acquire(&self, action: &str) -> Option<BusyPermit> {
        let permit = self.busy.try_acquire();
        if permit.is_none() {
            tracing::debug!(action, "Ignored: another request is pending");
        }
        permit
    }

    fn reject(&mut self, rejection: validation::Rejection) {
        tracing::debug!(?rejection, "Input rejected");
        self.notifications
            .notify(ToastKind::Warning, rejection.message());
    }
}

fn pdf_failure_message(e: &ApiError) -> String {
    e.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| "Failed to process PDF. Please try again.".to_string())
}

/// Terminals paste dropped files as quoted or backslash-escaped paths
fn clean_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')));
    match unquoted {
        Some(s) => s.to_string(),
        None => trimmed.replace("\\ ", " "),
    }
}

#[cfg(test)]
mod tests;
