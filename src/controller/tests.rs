//! Controller behaviour against a scripted backend

use super::*;
use crate::api::mock::MockBackend;
use crate::api::{ChatReply, MediaReply, NotesReply, SummaryReply, TextAnalysisReply};
use std::fs::File;

fn controller() -> (ViewController<MockBackend>, Arc<MockBackend>) {
    controller_with(Config::default())
}

fn controller_with(config: Config) -> (ViewController<MockBackend>, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::default());
    (ViewController::new(backend.clone(), &config), backend)
}

fn toast(vc: &ViewController<MockBackend>) -> (ToastKind, String) {
    let n = vc.notifications().current().expect("a toast");
    (n.kind, n.message.clone())
}

fn chat_reply(text: &str) -> ChatReply {
    ChatReply {
        response: text.to_string(),
        sentiment: Some("neutral".into()),
        ai_powered: Some(false),
        timestamp: None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Navigation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn only_first_navigation_during_transition_is_honored() {
    let (mut vc, _) = controller();
    let t0 = Instant::now();

    assert!(vc.navigate_at(Section::MentalHealth, t0));
    for (i, target) in [Section::PdfProcessor, Section::VideoProcessor, Section::Dashboard]
        .into_iter()
        .enumerate()
    {
        let at = t0 + Duration::from_millis(100 * (i as u64 + 1));
        assert!(!vc.navigate_at(target, at));
    }
    assert_eq!(vc.section(), Section::MentalHealth);

    // Once both halves have played the next request goes through
    assert!(vc.navigate_at(Section::PdfProcessor, t0 + Duration::from_millis(1000)));
    assert_eq!(vc.section(), Section::PdfProcessor);
}

#[test]
fn navigating_to_current_section_is_noop() {
    let (mut vc, _) = controller();
    let now = Instant::now();
    assert!(!vc.navigate_at(Section::Dashboard, now));
    assert!(vc.transition(now).is_none());
}

#[test]
fn old_section_stays_visible_during_exit() {
    let (mut vc, _) = controller();
    let t0 = Instant::now();
    vc.navigate_at(Section::TextSummarizer, t0);
    assert_eq!(
        vc.visible_section(t0 + Duration::from_millis(100)),
        Section::Dashboard
    );
    assert_eq!(
        vc.visible_section(t0 + Duration::from_millis(500)),
        Section::TextSummarizer
    );
}

#[tokio::test]
async fn navigation_is_allowed_while_busy() {
    let (mut vc, _) = controller();
    vc.state_mut().chat_input.set("hello");
    let _job = vc.begin_chat().unwrap();
    assert!(vc.is_busy());
    assert!(vc.navigate(Section::PdfProcessor));
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn blank_chat_is_noop() {
    let (mut vc, backend) = controller();
    assert!(!vc.send_chat("   \n\t ").await);
    assert!(vc.state().chat_log.is_empty());
    assert!(vc.state().history.is_empty());
    assert_eq!(backend.total_calls(), 0);
    assert!(!vc.is_busy());
}

#[tokio::test]
async fn failed_chat_appends_exactly_one_fallback() {
    let (mut vc, backend) = controller();
    *backend.chat.lock().unwrap() = Some(Err(503));

    assert!(vc.send_chat("  I feel anxious  ").await);

    let log = &vc.state().chat_log;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].sender, Sender::User);
    assert_eq!(log[0].text, "I feel anxious");
    assert_eq!(log[1].sender, Sender::Assistant);
    assert_eq!(log[1].text, CHAT_FALLBACK);
    assert!(!vc.is_busy());
    assert!(!vc.state().typing);
    assert!(!vc.state().chat_input.is_disabled());
    assert!(!vc.state().overlay.is_visible());
    // The fallback replaces an error toast
    assert!(vc.notifications().current().is_none());
}

#[tokio::test]
async fn chat_reply_is_appended_and_history_recorded() {
    let (mut vc, backend) = controller();
    *backend.chat.lock().unwrap() = Some(Ok(chat_reply("That sounds great!")));

    assert!(vc.send_chat("I had a good day").await);

    let log = &vc.state().chat_log;
    assert_eq!(log[1].text, "That sounds great!");
    let entry = vc.state().history.entries().next().unwrap();
    assert_eq!(entry.preview, "I had a good day");
    assert_eq!(entry.badge, insights::Badge::Positive);
    assert!(vc.state().chat_input.is_empty());
}

#[tokio::test]
async fn chat_submit_sets_busy_state_until_applied() {
    let (mut vc, backend) = controller();
    *backend.chat.lock().unwrap() = Some(Ok(chat_reply("hi")));
    vc.state_mut().chat_input.set("hello");

    let job = vc.begin_chat().unwrap();
    assert!(vc.is_busy());
    assert!(vc.state().typing);
    assert!(vc.state().chat_input.is_disabled());
    assert!(vc.state().chat_input.is_empty());
    assert_eq!(vc.state().chat_log.len(), 1);

    let completion = job.run(backend.as_ref()).await;
    assert!(vc.is_busy());
    vc.apply(completion);
    assert!(!vc.is_busy());
}

#[tokio::test]
async fn crashed_chat_keeps_gate_closed_until_applied() {
    let (mut vc, backend) = controller();
    backend
        .chat_panics
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let (tx, mut rx) = mpsc::unbounded_channel();
    vc.state_mut().chat_input.set("hello");
    vc.state_mut().text_input.set("Some notes to condense");

    let job = vc.begin_chat().unwrap();
    vc.spawn(job, tx);
    let completion = rx.recv().await.unwrap();

    // The crash is in hand but not yet applied
    assert!(vc.is_busy());
    assert!(vc.begin_summarize().is_none());
    assert!(vc.state().overlay.is_visible());

    vc.apply(completion);
    assert!(!vc.is_busy());
    assert!(!vc.state().overlay.is_visible());
    assert!(!vc.state().typing);
    assert_eq!(
        toast(&vc),
        (ToastKind::Danger, GENERIC_FAILURE.to_string())
    );
    assert_eq!(backend.calls("summarize"), 0);
}

#[tokio::test]
async fn quick_prompt_sends_when_untouched() {
    let (mut vc, backend) = controller();
    *backend.chat.lock().unwrap() = Some(Ok(chat_reply("Let's plan it")));
    let t0 = Instant::now();

    vc.quick_prompt_at(QUICK_PROMPTS[1], t0);
    assert_eq!(vc.state().chat_input.text(), QUICK_PROMPTS[1]);
    assert!(vc.tick(t0 + Duration::from_millis(1499)).is_none());

    let job = vc.tick(t0 + Duration::from_millis(1500)).expect("auto-send");
    let completion = job.run(backend.as_ref()).await;
    vc.apply(completion);
    assert_eq!(vc.state().chat_log[0].text, QUICK_PROMPTS[1]);
    assert_eq!(backend.calls("chat"), 1);
}

#[test]
fn edited_quick_prompt_is_not_sent() {
    let (mut vc, _) = controller();
    let t0 = Instant::now();
    vc.quick_prompt_at(QUICK_PROMPTS[0], t0);
    vc.state_mut().chat_input.insert_char('!');
    assert!(vc.tick(t0 + Duration::from_secs(2)).is_none());
    assert!(vc.state().chat_log.is_empty());
}

#[tokio::test]
async fn clear_chat_empties_log_and_history() {
    let (mut vc, backend) = controller();
    *backend.chat.lock().unwrap() = Some(Ok(chat_reply("ok")));
    vc.send_chat("hello").await;

    vc.clear_chat();
    assert!(vc.state().chat_log.is_empty());
    assert!(vc.state().history.is_empty());
    assert_eq!(
        toast(&vc),
        (ToastKind::Success, "Chat cleared successfully".to_string())
    );
}

#[tokio::test]
async fn export_writes_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        export_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let (mut vc, backend) = controller_with(config);

    assert!(vc.export_chat().is_none());
    assert_eq!(
        toast(&vc),
        (ToastKind::Warning, "No chat messages to export".to_string())
    );

    *backend.chat.lock().unwrap() = Some(Ok(chat_reply("Breathe in slowly.")));
    vc.send_chat("help me relax").await;
    let path = vc.export_chat().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("ai_chat_export_"));
    assert!(text.contains("You: help me relax\n"));
    assert!(text.contains("AI Companion: Breathe in slowly.\n"));
    assert_eq!(toast(&vc).0, ToastKind::Success);
}

// ─────────────────────────────────────────────────────────────────────────────
// Summarizer
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn summary_of_quarter_length_shows_75_percent() {
    let (mut vc, backend) = controller();
    *backend.summary.lock().unwrap() = Some(Ok(SummaryReply {
        summary: "s".repeat(250),
        key_points: vec!["Point one".into()],
        ai_powered: Some(true),
    }));

    assert!(vc.summarize_text(&"t".repeat(1000)).await);

    let view = views::TextResultView::build(vc.state().text_result.as_ref().unwrap());
    match view {
        views::TextResultView::Summary {
            compression_percent,
            original_chars,
            ..
        } => {
            assert_eq!(compression_percent, 75);
            assert_eq!(original_chars, 1000);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        toast(&vc),
        (ToastKind::Success, "Summary generated successfully!".to_string())
    );
}

#[tokio::test]
async fn empty_summary_input_warns_without_request() {
    let (mut vc, backend) = controller();
    assert!(!vc.summarize_text("   ").await);
    assert_eq!(
        toast(&vc),
        (
            ToastKind::Warning,
            "Please enter some text to summarize.".to_string()
        )
    );
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn short_text_analysis_is_rejected_but_summary_is_not() {
    let (mut vc, backend) = controller();
    *backend.summary.lock().unwrap() = Some(Ok(SummaryReply {
        summary: "tiny".into(),
        key_points: vec![],
        ai_powered: None,
    }));

    assert!(!vc.analyze_text("Too short to analyze").await);
    assert_eq!(
        toast(&vc).1,
        "Please enter at least 50 characters for meaningful analysis."
    );
    assert_eq!(backend.calls("process-text"), 0);

    assert!(vc.summarize_text("Too short to analyze").await);
    assert_eq!(backend.calls("summarize"), 1);
}

#[tokio::test]
async fn analysis_renders_concepts() {
    let (mut vc, backend) = controller();
    *backend.analysis.lock().unwrap() = Some(Ok(TextAnalysisReply {
        summary: "Cells divide.".into(),
        key_concepts: vec!["mitosis".into(), "meiosis".into()],
        key_points: vec!["Division is regulated".into()],
        word_count: None,
        character_count: None,
    }));

    assert!(vc.analyze_text(&"Cell biology text. ".repeat(5)).await);
    match views::TextResultView::build(vc.state().text_result.as_ref().unwrap()) {
        views::TextResultView::Analysis {
            concept_count,
            character_count,
            ..
        } => {
            assert_eq!(concept_count, 2);
            // Trailing space trimmed before counting
            assert_eq!(character_count, 94);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn failed_summary_shows_danger_and_keeps_no_result() {
    let (mut vc, backend) = controller();
    *backend.summary.lock().unwrap() = Some(Err(500));

    assert!(vc.summarize_text("Some text").await);
    assert!(vc.state().text_result.is_none());
    assert_eq!(
        toast(&vc),
        (
            ToastKind::Danger,
            "Failed to generate summary. Please try again.".to_string()
        )
    );
    assert_eq!(backend.calls("summarize"), 1);
}

#[tokio::test]
async fn rapid_double_submit_makes_one_call() {
    let (mut vc, backend) = controller();
    *backend.summary.lock().unwrap() = Some(Ok(SummaryReply {
        summary: "short".into(),
        key_points: vec![],
        ai_powered: None,
    }));
    vc.state_mut().text_input.set("Some text to summarize");

    let first = vc.begin_summarize();
    let second = vc.begin_summarize();
    let third = vc.begin_analyze();
    vc.state_mut().chat_input.set("and a chat");
    let fourth = vc.begin_chat();
    assert!(first.is_some());
    assert!(second.is_none());
    assert!(third.is_none());
    assert!(fourth.is_none());
    // The rejected chat keeps its text
    assert_eq!(vc.state().chat_input.text(), "and a chat");

    let completion = first.unwrap().run(backend.as_ref()).await;
    vc.apply(completion);
    assert_eq!(backend.total_calls(), 1);
    assert!(!vc.is_busy());
}

// ─────────────────────────────────────────────────────────────────────────────
// Uploads
// ─────────────────────────────────────────────────────────────────────────────

fn sized_file(dir: &Path, name: &str, len: u64) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    file.set_len(len).unwrap();
    path
}

#[tokio::test]
async fn oversized_media_is_rejected_and_selection_cleared() {
    let dir = tempfile::tempdir().unwrap();
    let (mut vc, backend) = controller();

    let ok = sized_file(dir.path(), "lecture.mp4", 1024);
    assert!(vc.select_file(UploadKind::Media, &ok));
    assert!(vc.state().selected_media.is_some());

    let big = sized_file(dir.path(), "movie.mp4", 200 * 1024 * 1024 + 1);
    assert!(!vc.process_file(UploadKind::Media, &big).await);

    assert!(vc.state().selected_media.is_none());
    assert_eq!(
        toast(&vc),
        (
            ToastKind::Warning,
            "File size exceeds 200MB limit. Please choose a smaller file.".to_string()
        )
    );
    assert_eq!(backend.total_calls(), 0);
}

#[test]
fn disallowed_type_is_rejected_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let (mut vc, _) = controller();

    let doc = sized_file(dir.path(), "essay.docx", 100);
    assert!(!vc.select_file(UploadKind::Media, &doc));
    assert_eq!(
        toast(&vc),
        (
            ToastKind::Warning,
            "Please upload a valid video or audio file.".to_string()
        )
    );

    assert!(!vc.select_file(UploadKind::Pdf, &doc));
    assert_eq!(toast(&vc).0, ToastKind::Warning);
    assert!(vc.state().selected_pdf.is_none());
}

#[test]
fn process_without_selection_warns() {
    let (mut vc, _) = controller();
    assert!(vc.begin_process(UploadKind::Pdf).is_none());
    assert_eq!(toast(&vc).1, "Please select a PDF file first.");
    assert!(vc.begin_process(UploadKind::Media).is_none());
    assert_eq!(toast(&vc).1, "Please select a video or audio file first.");
    assert!(!vc.is_busy());
}

#[tokio::test]
async fn pdf_success_renders_every_key_term() {
    let dir = tempfile::tempdir().unwrap();
    let (mut vc, backend) = controller();
    *backend.notes.lock().unwrap() = Some(Ok(NotesReply {
        smart_notes: "Newton's laws\n\nForce equals mass times acceleration".into(),
        key_terms: vec!["force".into(), "mass".into(), "acceleration".into(), "inertia".into()],
        pages: Some(12),
    }));

    let pdf = dir.path().join("physics.pdf");
    std::fs::write(&pdf, b"%PDF-1.7 content").unwrap();
    assert!(vc.process_file(UploadKind::Pdf, &pdf).await);

    let view = views::NotesView::build(vc.state().notes_result.as_ref().unwrap());
    assert_eq!(view.key_term_count, 4);
    assert_eq!(view.key_terms.len(), 4);
    assert_eq!(view.note_lines.len(), 2);
    assert_eq!(view.pages, "12");

    let uploads = backend.uploads.lock().unwrap();
    assert_eq!(
        uploads[0],
        ("physics.pdf".to_string(), "application/pdf".to_string(), 16)
    );
}

#[tokio::test]
async fn pdf_failure_prefers_server_message() {
    let dir = tempfile::tempdir().unwrap();
    let (mut vc, backend) = controller();
    let pdf = dir.path().join("scan.pdf");
    std::fs::write(&pdf, b"%PDF").unwrap();

    *backend.notes.lock().unwrap() = Some(Err((400, Some("Please upload a valid PDF file".into()))));
    vc.process_file(UploadKind::Pdf, &pdf).await;
    assert_eq!(
        toast(&vc),
        (ToastKind::Danger, "Please upload a valid PDF file".to_string())
    );

    *backend.notes.lock().unwrap() = Some(Err((500, None)));
    vc.process_file(UploadKind::Pdf, &pdf).await;
    assert_eq!(toast(&vc).1, "Failed to process PDF. Please try again.");
    assert!(!vc.is_busy());
}

#[tokio::test]
async fn media_success_and_failure_toasts() {
    let dir = tempfile::tempdir().unwrap();
    let (mut vc, backend) = controller();
    let clip = sized_file(dir.path(), "talk.mp3", 2048);

    *backend.media.lock().unwrap() = Some(Ok(MediaReply {
        summary: Some("A talk about sleep".into()),
        ai_powered: true,
        ..MediaReply::default()
    }));
    assert!(vc.process_file(UploadKind::Media, &clip).await);
    let view = views::MediaView::build(vc.state().media_result.as_ref().unwrap());
    assert_eq!(view.engine, "Gemini AI");
    assert_eq!(view.duration, "Unknown");
    assert_eq!(
        toast(&vc).1,
        "Video processed and summarized successfully! 🎉"
    );

    *backend.media.lock().unwrap() = Some(Err((400, Some("Unsupported file format".into()))));
    vc.process_file(UploadKind::Media, &clip).await;
    assert_eq!(
        toast(&vc),
        (
            ToastKind::Danger,
            "Failed to process video: Unsupported file format".to_string()
        )
    );
    // The failed run cleared the earlier result
    assert!(vc.state().media_result.is_none());
}

#[test]
fn typed_path_is_unquoted() {
    let dir = tempfile::tempdir().unwrap();
    let (mut vc, _) = controller();
    let path = sized_file(dir.path(), "my notes.pdf", 10);

    vc.state_mut()
        .pdf_path_input
        .set(&format!("'{}'", path.display()));
    assert!(vc.select_from_input(UploadKind::Pdf));
    assert_eq!(vc.state().selected_pdf.as_ref().unwrap().name, "my notes.pdf");

    assert_eq!(clean_path(r"/tmp/my\ notes.pdf"), "/tmp/my notes.pdf");
    assert_eq!(clean_path("  \"/a b.mp4\" "), "/a b.mp4");
}

#[test]
fn empty_path_prompt_warns() {
    let (mut vc, _) = controller();
    assert!(!vc.select_from_input(UploadKind::Media));
    assert_eq!(toast(&vc).0, ToastKind::Warning);
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_probe_updates_dashboard() {
    let (mut vc, backend) = controller();
    vc.refresh_health().await;
    assert!(matches!(vc.state().health, HealthStatus::Online(_)));
    assert_eq!(backend.calls("health"), 1);

    vc.apply_health(Err(ApiError::Transport("connection refused".into())));
    assert!(matches!(vc.state().health, HealthStatus::Offline(_)));
}
