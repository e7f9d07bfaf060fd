// StudyByte - terminal client for the StudyByte student-assistance backend
//
// Wellness chat, text summaries, smart notes from PDFs and lecture media
// analysis, all served by the StudyByte HTTP backend.
//
// Architecture:
// - API (reqwest): typed client for the backend endpoints
// - Controller: headless UI state and operations, shared by TUI and CLI
// - TUI (ratatui): sections, overlays and toasts over the controller
// - CLI (clap): config management and one-shot headless commands

mod api;
mod cli;
mod config;
mod controller;
mod logging;
mod tui;
mod util;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Config commands never touch logging or the backend
    if let Some(Commands::Config(args)) = cli.command {
        cli::handle_config(args);
        return Ok(ExitCode::SUCCESS);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();
    let tui_mode = cli.command.is_none();
    let log_buffer = LogBuffer::new();

    // The guard must live until exit so buffered file logs flush
    let _file_guard = init_logging(&config, tui_mode, &log_buffer);

    match cli.command {
        None => {
            if let Err(e) = tui::run_tui(config, log_buffer).await {
                tracing::error!("TUI error: {:#}", e);
                eprintln!("Error: {:#}", e);
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(command) => {
            let ok = cli::run_headless(command, &config).await?;
            Ok(if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Install the global subscriber
///
/// TUI mode captures logs into the buffer shown on the dashboard, since
/// writing to the terminal would garble the display. Headless commands log
/// to stderr so stdout stays clean for results. File logging adds a
/// rotating JSON writer on top of either.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_logging(
    config: &Config,
    tui_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("studybyte={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = tui_mode.then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer = (!tui_mode).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let (file_layer, guard) = match file_writer(config) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Non-blocking rolling file writer, when file logging is enabled and the
/// directory is usable
fn file_writer(
    config: &Config,
) -> Option<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    let logging = &config.logging;
    if !logging.file_enabled {
        return None;
    }
    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };
    Some(tracing_appender::non_blocking(appender))
}
