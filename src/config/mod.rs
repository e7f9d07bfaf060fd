//! Configuration for the StudyByte client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/studybyte/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod features;
mod limits;
mod logging;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use features::{Features, FileFeatures};
pub use limits::{
    ChatConfig, FileChatConfig, FileLimits, FileNotificationConfig, Limits, NotificationConfig,
};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend the bundled Flask server listens on
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Default palette name
pub const DEFAULT_THEME: &str = "StudyByte";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the StudyByte backend
    pub backend_url: String,

    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,

    /// Palette name: "StudyByte", "Midnight", "Forest", "Paper"
    pub theme: String,

    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,

    /// Where chat transcripts are exported to
    pub export_dir: PathBuf,

    /// Feature flags for decorative extras
    pub features: Features,

    /// Client-side validation limits
    pub limits: Limits,

    /// Toast behaviour
    pub notifications: NotificationConfig,

    /// Chat behaviour
    pub chat: ChatConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: None,
            theme: DEFAULT_THEME.to_string(),
            use_theme_background: true,
            export_dir: default_export_dir(),
            features: Features::default(),
            limits: Limits::default(),
            notifications: NotificationConfig::default(),
            chat: ChatConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub backend_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<String>,
    pub use_theme_background: Option<bool>,
    pub export_dir: Option<String>,

    /// Optional [features] section
    pub features: Option<FileFeatures>,

    /// Optional [limits] section
    pub limits: Option<FileLimits>,

    /// Optional [notifications] section
    pub notifications: Option<FileNotificationConfig>,

    /// Optional [chat] section
    pub chat: Option<FileChatConfig>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/studybyte/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("studybyte").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let template = Self::default().to_toml();
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be parsed: a broken
    /// config should fail fast rather than silently fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `studybyte config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Layer `env` over `file` over defaults
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Backend URL: env > file > default
        let backend_url = env("STUDYBYTE_BACKEND_URL")
            .or(file.backend_url)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        // Timeout: env > file > none; 0 also means none
        let request_timeout = env("STUDYBYTE_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .or(file.request_timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        // Theme: env > file > default
        let theme = env("STUDYBYTE_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Use theme background: file > default
        let use_theme_background = file.use_theme_background.unwrap_or(true);

        // Export directory: env > file > downloads dir
        let export_dir = env("STUDYBYTE_EXPORT_DIR")
            .or(file.export_dir)
            .map(PathBuf::from)
            .unwrap_or_else(default_export_dir);

        Self {
            backend_url,
            request_timeout,
            theme,
            use_theme_background,
            export_dir,
            features: Features::from_file(file.features),
            limits: Limits::from_file(file.limits),
            notifications: NotificationConfig::from_file(file.notifications),
            chat: ChatConfig::from_file(file.chat),
            logging: LoggingConfig::from_file(file.logging),
        }
    }
}
