// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and paste input, timer ticks, job completions)
// - Layered key dispatch into the ViewController

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod modal;
pub mod particles;
pub mod theme;
pub mod views;

use crate::api::{Backend, HttpBackend};
use crate::config::Config;
use crate::controller::editor::LineEditor;
use crate::controller::{Completion, Section, ViewController, QUICK_PROMPTS};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, HealthResult};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::panic;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Lines moved per PageUp/PageDown
const PAGE: u16 = 10;

/// Run the TUI until the user quits
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let backend: Arc<dyn Backend> = Arc::new(
        HttpBackend::new(&config.backend_url, config.request_timeout)
            .context("Failed to build HTTP client")?,
    );
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel();
    let (health_tx, mut health_rx) = mpsc::unbounded_channel();
    let vc = ViewController::new(backend, &config);
    let mut app = App::new(vc, &config, log_buffer, completion_tx, health_tx);

    tracing::info!(backend = %config.backend_url, theme = %app.theme.name, "StudyByte started");
    app.refresh_health();

    install_panic_hook();
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .context("Failed to setup terminal")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut completion_rx, &mut health_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Leave the alternate screen before the default hook prints the panic
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(info);
    }));
}

/// Main event loop
///
/// Waits on terminal input, the animation tick, finished jobs and health
/// probes, redrawing after whichever arrives first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    completion_rx: &mut mpsc::UnboundedReceiver<Completion>,
    health_rx: &mut mpsc::UnboundedReceiver<HealthResult>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Paste(text)) => handle_paste(app, &text),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.on_tick(Instant::now());
            }

            Some(completion) = completion_rx.recv() => {
                if app.on_completion(completion) {
                    ring_bell();
                }
            }

            Some(health) = health_rx.recv() => {
                app.vc.apply_health(health);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn ring_bell() {
    let mut stdout = io::stdout();
    if stdout.write_all(b"\x07").and_then(|_| stdout.flush()).is_err() {
        tracing::debug!("Could not ring terminal bell");
    }
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Section
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    match app.vc.section() {
        Section::Dashboard => handle_dashboard_keys(app, &key_event),
        Section::MentalHealth => handle_chat_keys(app, &key_event),
        Section::TextSummarizer => handle_summarizer_keys(app, &key_event),
        Section::PdfProcessor | Section::VideoProcessor => handle_upload_keys(app, &key_event),
    }
}

/// Layer 1: an open modal captures all input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(modal) = app.modal else {
        return false;
    };
    if is_ctrl(key_event, 'c') {
        app.should_quit = true;
        return true;
    }
    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::ConfirmClear => {
            app.modal = None;
            app.vc.clear_chat();
            app.reset_scroll();
        }
    }
    true
}

/// Layer 2: keys that work in every section
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('g') if ctrl => app.modal = Some(Modal::Help),
        KeyCode::Char('x') if ctrl => app.vc.dismiss_notification(),
        KeyCode::Char('y') if ctrl => app.copy_current(),
        KeyCode::Tab => {
            if app.handle_key_press(KeyCode::Tab) {
                let next = app.vc.section().next();
                app.vc.navigate(next);
            }
        }
        KeyCode::BackTab => {
            if app.handle_key_press(KeyCode::BackTab) {
                let prev = app.vc.section().prev();
                app.vc.navigate(prev);
            }
        }
        KeyCode::F(n @ 1..=5) => {
            if app.handle_key_press(key_event.code) {
                if let Some(section) = Section::from_index(n as usize - 1) {
                    app.vc.navigate(section);
                }
            }
        }
        KeyCode::Esc => {
            if app.handle_key_press(KeyCode::Esc) {
                app.vc.show_dashboard();
            }
        }
        KeyCode::PageUp => {
            if app.handle_key_press(KeyCode::PageUp) {
                page(app, true);
            }
        }
        KeyCode::PageDown => {
            if app.handle_key_press(KeyCode::PageDown) {
                page(app, false);
            }
        }
        KeyCode::Up => {
            if app.handle_key_press(KeyCode::Up) {
                scroll(app, true, 1);
            }
        }
        KeyCode::Down => {
            if app.handle_key_press(KeyCode::Down) {
                scroll(app, false, 1);
            }
        }
        _ => return false,
    }
    true
}

/// Chat scrolls back from the newest message, the other panes forward
/// from the top, so "up" means a different direction for each
fn scroll(app: &mut App, up: bool, lines: u16) {
    let from_bottom = app.vc.section() == Section::MentalHealth;
    if up == from_bottom {
        app.scroll_down(lines);
    } else {
        app.scroll_up(lines);
    }
}

fn page(app: &mut App, up: bool) {
    scroll(app, up, PAGE);
}

fn handle_dashboard_keys(app: &mut App, key_event: &KeyEvent) {
    match key_event.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.modal = Some(Modal::Help),
        KeyCode::Char('x') => app.vc.dismiss_notification(),
        KeyCode::Char('r') => app.refresh_health(),
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(section) = c.to_digit(10).and_then(|d| Section::from_index(d as usize)) {
                app.vc.navigate(section);
            }
        }
        _ => {}
    }
}

fn handle_chat_keys(app: &mut App, key_event: &KeyEvent) {
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);
    match key_event.code {
        KeyCode::Enter => {
            if app.handle_key_press(KeyCode::Enter) {
                let job = app.vc.begin_chat();
                if job.is_some() {
                    app.reset_scroll();
                }
                app.spawn(job);
            }
        }
        KeyCode::Char('l') if is_ctrl(key_event, 'l') => {
            app.modal = Some(Modal::ConfirmClear);
        }
        KeyCode::Char('e') if is_ctrl(key_event, 'e') => {
            app.vc.export_chat();
        }
        KeyCode::Char(c @ '1'..='4') if alt => {
            let idx = c as usize - '1' as usize;
            app.vc.quick_prompt(QUICK_PROMPTS[idx]);
        }
        _ => edit(&mut app.vc.state_mut().chat_input, key_event),
    }
}

fn handle_summarizer_keys(app: &mut App, key_event: &KeyEvent) {
    match key_event.code {
        KeyCode::Char('s') if is_ctrl(key_event, 's') => {
            let job = app.vc.begin_summarize();
            app.reset_scroll();
            app.spawn(job);
        }
        KeyCode::Char('t') if is_ctrl(key_event, 't') => {
            let job = app.vc.begin_analyze();
            app.reset_scroll();
            app.spawn(job);
        }
        KeyCode::Char('r') if is_ctrl(key_event, 'r') => {
            if !app.vc.is_busy() {
                let state = app.vc.state_mut();
                state.text_input.clear();
                state.text_result = None;
                app.reset_scroll();
            }
        }
        KeyCode::Enter => app.vc.state_mut().text_input.newline(),
        _ => edit(&mut app.vc.state_mut().text_input, key_event),
    }
}

fn handle_upload_keys(app: &mut App, key_event: &KeyEvent) {
    let Some(kind) = app.upload_kind() else {
        return;
    };
    match key_event.code {
        KeyCode::Enter => {
            if app.handle_key_press(KeyCode::Enter) {
                app.vc.select_from_input(kind);
            }
        }
        KeyCode::Char('p') if is_ctrl(key_event, 'p') => {
            let job = app.vc.begin_process(kind);
            app.reset_scroll();
            app.spawn(job);
        }
        KeyCode::Char('d') if is_ctrl(key_event, 'd') => app.vc.clear_selection(kind),
        _ => {
            if let Some(editor) = app.active_editor() {
                edit(editor, key_event);
            }
        }
    }
}

/// Plain editing keys shared by every input
fn edit(editor: &mut LineEditor, key_event: &KeyEvent) {
    let mods = key_event.modifiers;
    if mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return;
    }
    match key_event.code {
        KeyCode::Char(c) => editor.insert_char(c),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Home => editor.home(),
        KeyCode::End => editor.end(),
        _ => {}
    }
}

/// Bracketed paste goes to the section's editor in one piece; a file
/// dropped onto the terminal arrives here as its path
fn handle_paste(app: &mut App, text: &str) {
    if app.modal.is_some() {
        return;
    }
    if let Some(editor) = app.active_editor() {
        editor.insert_str(text);
    }
}

fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => scroll(app, true, 3),
        MouseEventKind::ScrollDown => scroll(app, false, 3),
        _ => {}
    }
}

fn is_ctrl(key_event: &KeyEvent, c: char) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char(c)
}
