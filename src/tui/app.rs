// TUI application state
//
// Wraps the headless ViewController with everything that only matters on a
// terminal: theme, modal, particle field, key debouncing and the channels
// background tasks report back on.

use super::clipboard;
use super::input::InputHandler;
use super::modal::Modal;
use super::particles::{ParticleField, DEFAULT_COUNT};
use super::theme::Theme;
use crate::api::{ApiError, Backend, HealthReply};
use crate::config::{Config, Features};
use crate::controller::editor::LineEditor;
use crate::controller::{
    Completion, Job, Section, Sender, TextResult, ToastKind, UploadKind, ViewController,
};
use crate::logging::LogBuffer;
use crossterm::event::KeyCode;
use std::time::Instant;
use tokio::sync::mpsc;

/// Spinner frames shared by the overlay and the typing indicator
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub type HealthResult = Result<HealthReply, ApiError>;

pub struct App {
    pub vc: ViewController<dyn Backend>,
    pub theme: Theme,
    pub features: Features,
    pub backend_url: String,
    pub log_buffer: LogBuffer,
    pub modal: Option<Modal>,
    pub should_quit: bool,
    pub particles: ParticleField,
    pub start_time: Instant,
    /// Result-pane scroll offset per section
    scroll: [u16; Section::ALL.len()],
    frame: usize,
    input: InputHandler,
    completions: mpsc::UnboundedSender<Completion>,
    health: mpsc::UnboundedSender<HealthResult>,
}

impl App {
    pub fn new(
        vc: ViewController<dyn Backend>,
        config: &Config,
        log_buffer: LogBuffer,
        completions: mpsc::UnboundedSender<Completion>,
        health: mpsc::UnboundedSender<HealthResult>,
    ) -> Self {
        Self {
            vc,
            theme: Theme::by_name(&config.theme).with_background(config.use_theme_background),
            features: config.features.clone(),
            backend_url: config.backend_url.clone(),
            log_buffer,
            modal: None,
            should_quit: false,
            particles: ParticleField::new(DEFAULT_COUNT),
            start_time: Instant::now(),
            scroll: [0; Section::ALL.len()],
            frame: 0,
            input: InputHandler::default(),
            completions,
            health,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Background work
    // ─────────────────────────────────────────────────────────────────────────

    pub fn spawn(&self, job: Option<Job>) {
        if let Some(job) = job {
            self.vc.spawn(job, self.completions.clone());
        }
    }

    /// Probe `/api/health` off the UI task
    pub fn refresh_health(&self) {
        let backend = self.vc.backend();
        let tx = self.health.clone();
        tokio::spawn(async move {
            if tx.send(backend.health().await).is_err() {
                tracing::debug!("Health result dropped: UI loop has exited");
            }
        });
    }

    /// Apply a finished job. True when the bell should ring.
    pub fn on_completion(&mut self, completion: Completion) -> bool {
        let ring = self.features.notification_bell
            && completion.operation == crate::controller::Operation::Chat
            && completion.is_success();
        self.vc.apply(completion);
        ring
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.frame = self.frame.wrapping_add(1);
        if self.features.particles {
            self.particles.step();
        }
        let job = self.vc.tick(now);
        self.spawn(job);
    }

    pub fn spinner_char(&self) -> &'static str {
        SPINNER[self.frame % SPINNER.len()]
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input.press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input.release(key);
    }

    /// Editor that receives typed characters in the current section
    pub fn active_editor(&mut self) -> Option<&mut LineEditor> {
        let state = self.vc.state_mut();
        match state.section {
            Section::Dashboard => None,
            Section::MentalHealth => Some(&mut state.chat_input),
            Section::TextSummarizer => Some(&mut state.text_input),
            Section::PdfProcessor => Some(&mut state.pdf_path_input),
            Section::VideoProcessor => Some(&mut state.media_path_input),
        }
    }

    pub fn upload_kind(&self) -> Option<UploadKind> {
        match self.vc.section() {
            Section::PdfProcessor => Some(UploadKind::Pdf),
            Section::VideoProcessor => Some(UploadKind::Media),
            _ => None,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll[self.vc.section().index()]
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let slot = &mut self.scroll[self.vc.section().index()];
        *slot = slot.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let slot = &mut self.scroll[self.vc.section().index()];
        *slot = slot.saturating_add(lines);
    }

    pub fn reset_scroll(&mut self) {
        self.scroll[self.vc.section().index()] = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────────────────────

    /// Text the copy key puts on the clipboard for the current section
    pub fn copyable_text(&self) -> Option<String> {
        let state = self.vc.state();
        match state.section {
            Section::Dashboard => None,
            Section::MentalHealth => state
                .chat_log
                .iter()
                .rev()
                .find(|m| m.sender == Sender::Assistant)
                .map(|m| m.text.clone()),
            Section::TextSummarizer => state.text_result.as_ref().map(|r| match r {
                TextResult::Summary { reply, .. } => reply.summary.clone(),
                TextResult::Analysis { reply, .. } => reply.summary.clone(),
            }),
            Section::PdfProcessor => state
                .notes_result
                .as_ref()
                .map(|r| r.reply.smart_notes.clone()),
            Section::VideoProcessor => state.media_result.as_ref().map(|r| {
                let reply = &r.reply;
                format!(
                    "{}\n\n{}",
                    reply.summary.as_deref().unwrap_or_default(),
                    reply.transcription.as_deref().unwrap_or_default()
                )
            }),
        }
    }

    pub fn copy_current(&mut self) {
        let Some(text) = self.copyable_text() else {
            self.vc.notify(ToastKind::Warning, "Nothing to copy yet");
            return;
        };
        match clipboard::copy_to_clipboard(&text) {
            Ok(()) => self.vc.notify(ToastKind::Success, "Copied to clipboard"),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.vc.notify(ToastKind::Danger, format!("Copy failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use std::sync::Arc;

    pub(crate) struct Harness {
        pub app: App,
        pub backend: Arc<MockBackend>,
        pub completions: mpsc::UnboundedReceiver<Completion>,
        pub health: mpsc::UnboundedReceiver<HealthResult>,
    }

    pub(crate) fn harness(backend: MockBackend) -> Harness {
        let mut config = Config::default();
        config.features.particles = false;
        config.export_dir = std::env::temp_dir();
        let backend = Arc::new(backend);
        let dyn_backend: Arc<dyn Backend> = backend.clone();
        let (ctx, crx) = mpsc::unbounded_channel();
        let (htx, hrx) = mpsc::unbounded_channel();
        let vc = ViewController::new(dyn_backend, &config);
        Harness {
            app: App::new(vc, &config, LogBuffer::new(), ctx, htx),
            backend,
            completions: crx,
            health: hrx,
        }
    }

    #[test]
    fn active_editor_follows_section() {
        let mut h = harness(MockBackend::default());
        assert!(h.app.active_editor().is_none());

        h.app.vc.state_mut().section = Section::TextSummarizer;
        h.app.active_editor().unwrap().insert_str("notes");
        assert_eq!(h.app.vc.state().text_input.text(), "notes");
        assert_eq!(h.app.upload_kind(), None);

        h.app.vc.state_mut().section = Section::VideoProcessor;
        assert_eq!(h.app.upload_kind(), Some(UploadKind::Media));
    }

    #[test]
    fn scroll_is_per_section() {
        let mut h = harness(MockBackend::default());
        h.app.vc.state_mut().section = Section::PdfProcessor;
        h.app.scroll_down(5);
        h.app.scroll_up(2);
        assert_eq!(h.app.scroll(), 3);

        h.app.vc.state_mut().section = Section::VideoProcessor;
        assert_eq!(h.app.scroll(), 0);
        h.app.scroll_up(4);
        assert_eq!(h.app.scroll(), 0);
    }

    #[test]
    fn copyable_text_is_latest_reply() {
        let mut h = harness(MockBackend::default());
        h.app.vc.state_mut().section = Section::MentalHealth;
        assert_eq!(h.app.copyable_text(), None);

        let log = &mut h.app.vc.state_mut().chat_log;
        log.push(crate::controller::ChatMessage::new(Sender::Assistant, "first"));
        log.push(crate::controller::ChatMessage::new(Sender::User, "thanks"));
        assert_eq!(h.app.copyable_text().as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn chat_success_rings_bell_when_enabled() {
        let mut h = harness(MockBackend::default());
        *h.backend.chat.lock().unwrap() = Some(Ok(crate::api::ChatReply {
            response: "Take a deep breath.".into(),
            sentiment: None,
            ai_powered: None,
            timestamp: None,
        }));
        h.app.vc.state_mut().chat_input.set("hello");

        let job = h.app.vc.begin_chat();
        h.app.spawn(job);
        let completion = h.completions.recv().await.unwrap();

        assert!(h.app.on_completion(completion));
        assert!(!h.app.vc.is_busy());
    }
}
