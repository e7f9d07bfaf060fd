// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the TUI starts. Subcommands:
// - config: show, locate, reset, edit or update the config file
// - chat / summarize / analyze / notes / media / health: one-shot headless
//   requests through the same ViewController the TUI drives

use crate::api::{Backend, HttpBackend};
use crate::config::{Config, VERSION};
use crate::controller::views::{HealthView, MediaView, NotesView, TextResultView};
use crate::controller::{Sender, UploadKind, ViewController, CHAT_FALLBACK};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

/// StudyByte - AI study companion in your terminal
#[derive(Parser)]
#[command(name = "studybyte")]
#[command(version = VERSION)]
#[command(about = "AI study companion: wellness chat, summaries and smart notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config(ConfigArgs),

    /// Send one message to the wellness companion
    Chat {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Summarize text into a summary and key points
    Summarize(TextSource),

    /// Smart summary with key concepts
    Analyze(TextSource),

    /// Extract smart notes from a PDF
    Notes {
        /// Path to the PDF
        path: PathBuf,
    },

    /// Transcribe and summarize a video or audio file
    Media {
        /// Path to the video or audio file
        path: PathBuf,
    },

    /// Check whether the backend is reachable
    Health,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Show effective configuration
    #[arg(long)]
    show: bool,

    /// Reset config file to defaults
    #[arg(long)]
    reset: bool,

    /// Open config file in $EDITOR
    #[arg(long)]
    edit: bool,

    /// Update config with new defaults (preserves user values)
    #[arg(long)]
    update: bool,

    /// Show config file path
    #[arg(long)]
    path: bool,
}

/// Text given inline, from a file, or on stdin when neither is present
#[derive(Args)]
pub struct TextSource {
    /// Text to process
    text: Vec<String>,

    /// Read the text from this file instead
    #[arg(long, short, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl TextSource {
    fn read(&self) -> Result<String> {
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }
        if !self.text.is_empty() {
            return Ok(self.text.join(" "));
        }
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read text from stdin")?;
        Ok(buf)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Headless commands
// ─────────────────────────────────────────────────────────────────────────────

/// Run one headless command against the configured backend. Returns false
/// when the request was rejected or failed; the reason is on stderr.
pub async fn run_headless(command: Commands, config: &Config) -> Result<bool> {
    let backend: Arc<dyn Backend> = Arc::new(
        HttpBackend::new(&config.backend_url, config.request_timeout)
            .context("Failed to build HTTP client")?,
    );
    let mut vc = ViewController::new(backend, config);
    let mut stdout = std::io::stdout().lock();

    let ok = execute(&mut vc, command, &mut stdout).await?;
    if !ok {
        if let Some(n) = vc.notifications().current() {
            eprintln!("{} {}", n.kind.icon(), n.message);
        }
    }
    Ok(ok)
}

pub(crate) async fn execute(
    vc: &mut ViewController<dyn Backend>,
    command: Commands,
    out: &mut dyn Write,
) -> Result<bool> {
    match command {
        Commands::Config(args) => {
            handle_config(args);
            Ok(true)
        }
        Commands::Chat { message } => {
            if !vc.send_chat(&message.join(" ")).await {
                return Ok(false);
            }
            let reply = vc
                .state()
                .chat_log
                .iter()
                .rev()
                .find(|m| m.sender == Sender::Assistant)
                .map(|m| crate::util::display_safe(&m.text))
                .unwrap_or_default();
            writeln!(out, "{reply}")?;
            Ok(reply != CHAT_FALLBACK)
        }
        Commands::Summarize(source) => {
            let text = source.read()?;
            vc.summarize_text(&text).await;
            print_text_result(vc, out)
        }
        Commands::Analyze(source) => {
            let text = source.read()?;
            vc.analyze_text(&text).await;
            print_text_result(vc, out)
        }
        Commands::Notes { path } => {
            vc.process_file(UploadKind::Pdf, &path).await;
            let Some(view) = vc.state().notes_result.as_ref().map(NotesView::build) else {
                return Ok(false);
            };
            writeln!(out, "Smart Notes\n")?;
            for line in &view.note_lines {
                writeln!(out, "{line}")?;
            }
            writeln!(out, "\nKey Terms ({})", view.key_term_count)?;
            for term in &view.key_terms {
                writeln!(out, "  • {term}")?;
            }
            writeln!(out, "\nPages: {}", view.pages)?;
            Ok(true)
        }
        Commands::Media { path } => {
            vc.process_file(UploadKind::Media, &path).await;
            let Some(view) = vc.state().media_result.as_ref().map(MediaView::build) else {
                return Ok(false);
            };
            writeln!(out, "Summary ({})\n{}\n", view.engine, view.summary)?;
            writeln!(out, "Transcription\n{}\n", view.transcription)?;
            writeln!(out, "Type: {}  Duration: {}", view.file_type, view.duration)?;
            Ok(true)
        }
        Commands::Health => {
            vc.refresh_health().await;
            match HealthView::build(&vc.state().health) {
                HealthView::Online {
                    app_name,
                    features,
                    ai_available,
                } => {
                    writeln!(out, "{app_name}: online")?;
                    writeln!(
                        out,
                        "AI: {}",
                        if ai_available { "available" } else { "placeholder" }
                    )?;
                    for feature in features {
                        writeln!(out, "  • {feature}")?;
                    }
                    Ok(true)
                }
                HealthView::Offline(reason) => {
                    writeln!(out, "offline: {reason}")?;
                    Ok(false)
                }
                HealthView::Checking => Ok(false),
            }
        }
    }
}

fn print_text_result(vc: &ViewController<dyn Backend>, out: &mut dyn Write) -> Result<bool> {
    let Some(view) = vc.state().text_result.as_ref().map(TextResultView::build) else {
        return Ok(false);
    };
    match view {
        TextResultView::Summary {
            summary,
            key_points,
            original_chars,
            compression_percent,
            ..
        } => {
            writeln!(out, "Summary\n{summary}\n")?;
            if !key_points.is_empty() {
                writeln!(out, "Key Points")?;
                for point in &key_points {
                    writeln!(out, "  • {point}")?;
                }
                writeln!(out)?;
            }
            writeln!(
                out,
                "Original: {original_chars} characters  Compression: {compression_percent}%"
            )?;
        }
        TextResultView::Analysis {
            summary,
            key_concepts,
            key_points,
            character_count,
            concept_count,
            ..
        } => {
            writeln!(out, "Smart Summary\n{summary}\n")?;
            writeln!(out, "Key Concepts")?;
            for concept in &key_concepts {
                writeln!(out, "  • {concept}")?;
            }
            writeln!(out, "\nKey Points")?;
            for point in &key_points {
                writeln!(out, "  • {point}")?;
            }
            writeln!(
                out,
                "\nCharacters: {character_count}  Concepts: {concept_count}"
            )?;
        }
    }
    Ok(true)
}

// ─────────────────────────────────────────────────────────────────────────────
// Config commands
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(args: ConfigArgs) {
    if args.path {
        handle_config_path();
    } else if args.show {
        handle_config_show();
    } else if args.reset {
        handle_config_reset();
    } else if args.edit {
        handle_config_edit();
    } else if args.update {
        handle_config_update();
    } else {
        println!("Usage: studybyte config [--show|--reset|--edit|--update|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --update  Update config with new defaults (preserves user values)");
        println!("  --path    Show config file path");
    }
}

fn config_path_or_exit() -> PathBuf {
    match Config::config_path() {
        Some(path) => path,
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_path() {
    println!("{}", config_path_or_exit().display());
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn confirm(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    if std::io::stderr().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    match std::io::stdin().read_line(&mut input) {
        Ok(_) => input.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}

fn handle_config_reset() {
    let path = config_path_or_exit();

    if path.exists()
        && !confirm(&format!(
            "Config file exists at {}. Overwrite?",
            path.display()
        ))
    {
        println!("Aborted.");
        return;
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let path = config_path_or_exit();

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}

fn handle_config_update() {
    let path = config_path_or_exit();

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return;
    }

    // Re-render the effective values through the current template
    let updated = Config::from_env().to_toml();

    let backup_path = path.with_extension("toml.bak");
    if let Err(e) = std::fs::copy(&path, &backup_path) {
        eprintln!("Warning: Could not create backup: {}", e);
    } else {
        println!("Backup created: {}", backup_path.display());
    }

    if let Err(e) = std::fs::write(&path, updated) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::api::{ChatReply, NotesReply, SummaryReply, TextAnalysisReply};

    fn controller(backend: MockBackend) -> (ViewController<dyn Backend>, Arc<MockBackend>) {
        let backend = Arc::new(backend);
        let dyn_backend: Arc<dyn Backend> = backend.clone();
        (ViewController::new(dyn_backend, &Config::default()), backend)
    }

    async fn run(vc: &mut ViewController<dyn Backend>, args: &[&str]) -> (bool, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let ok = execute(vc, cli.command.unwrap(), &mut out).await.unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["studybyte"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn text_and_file_conflict() {
        assert!(Cli::try_parse_from(["studybyte", "summarize", "hi", "--file", "x.txt"]).is_err());
        assert!(Cli::try_parse_from(["studybyte", "chat"]).is_err());
    }

    #[tokio::test]
    async fn chat_prints_reply() {
        let backend = MockBackend::default();
        *backend.chat.lock().unwrap() = Some(Ok(ChatReply {
            response: "Try a short walk.".into(),
            sentiment: None,
            ai_powered: None,
            timestamp: None,
        }));
        let (mut vc, backend) = controller(backend);

        let (ok, out) = run(&mut vc, &["studybyte", "chat", "I", "feel", "stuck"]).await;
        assert!(ok);
        assert_eq!(out, "Try a short walk.\n");
        assert_eq!(backend.calls("chat"), 1);
    }

    #[tokio::test]
    async fn chat_failure_prints_fallback_and_fails() {
        let (mut vc, _) = controller(MockBackend::default());
        let (ok, out) = run(&mut vc, &["studybyte", "chat", "hello"]).await;
        assert!(!ok);
        assert_eq!(out.trim_end(), CHAT_FALLBACK);
    }

    #[tokio::test]
    async fn short_analysis_is_rejected_locally() {
        let (mut vc, backend) = controller(MockBackend::default());
        let (ok, out) = run(&mut vc, &["studybyte", "analyze", "too", "short"]).await;
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(backend.total_calls(), 0);
        assert!(vc.notifications().current().is_some());
    }

    #[tokio::test]
    async fn analysis_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("chapter.txt");
        std::fs::write(&file, "Mitochondria produce ATP through cellular respiration in cells.").unwrap();

        let backend = MockBackend::default();
        *backend.analysis.lock().unwrap() = Some(Ok(TextAnalysisReply {
            summary: "Mitochondria make energy.".into(),
            key_concepts: vec!["ATP".into(), "respiration".into()],
            key_points: vec!["Energy comes from respiration".into()],
            word_count: None,
            character_count: None,
        }));
        let (mut vc, _) = controller(backend);

        let path = file.to_string_lossy().to_string();
        let (ok, out) = run(&mut vc, &["studybyte", "analyze", "--file", &path]).await;
        assert!(ok);
        assert!(out.starts_with("Smart Summary\nMitochondria make energy."));
        assert!(out.contains("Characters: 63  Concepts: 2"));
    }

    #[tokio::test]
    async fn summary_of_crlf_file_counts_characters_without_carriage_returns() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("windows.txt");
        std::fs::write(&file, "ab\r\ncd\r\nef\r\ngh").unwrap();

        let backend = MockBackend::default();
        *backend.summary.lock().unwrap() = Some(Ok(SummaryReply {
            summary: "abcd".into(),
            key_points: vec![],
            ai_powered: None,
        }));
        let (mut vc, _) = controller(backend);

        let path = file.to_string_lossy().to_string();
        let (ok, out) = run(&mut vc, &["studybyte", "summarize", "--file", &path]).await;
        assert!(ok);
        assert!(out.contains("Original: 11 characters  Compression: 64%"));
    }

    #[tokio::test]
    async fn notes_print_terms_and_pages() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lecture.pdf");
        std::fs::write(&file, b"%PDF-1.4 fake").unwrap();

        let backend = MockBackend::default();
        *backend.notes.lock().unwrap() = Some(Ok(NotesReply {
            smart_notes: "Newton's laws\n\nF = ma".into(),
            key_terms: vec!["force".into(), "mass".into()],
            pages: Some(3),
        }));
        let (mut vc, _) = controller(backend);

        let path = file.to_string_lossy().to_string();
        let (ok, out) = run(&mut vc, &["studybyte", "notes", &path]).await;
        assert!(ok);
        assert!(out.contains("Newton's laws\nF = ma\n"));
        assert!(out.contains("Key Terms (2)"));
        assert!(out.contains("Pages: 3"));
    }

    #[tokio::test]
    async fn health_reports_online() {
        let (mut vc, _) = controller(MockBackend::default());
        let (ok, out) = run(&mut vc, &["studybyte", "health"]).await;
        assert!(ok);
        assert!(out.starts_with("StudyByte: online\nAI: placeholder"));
    }
}
