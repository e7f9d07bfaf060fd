//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let timeout = match self.request_timeout {
            Some(t) => format!("request_timeout_secs = {}", t.as_secs()),
            None => "# request_timeout_secs = 120".to_string(),
        };

        format!(
            r#"# studybyte configuration

# StudyByte backend base URL
backend_url = {backend}

# Per-request timeout in seconds (unset or 0 = wait indefinitely)
{timeout}

# Theme: StudyByte, Midnight, Forest, Paper
theme = {theme}

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Directory chat transcripts are exported to
export_dir = {export_dir}

# Decorative extras
[features]
particles = {particles}
notification_bell = {bell}
typing_indicator = {typing}

# Client-side validation, checked before anything is sent
[limits]
max_media_mb = {max_media}
max_pdf_mb = {max_pdf}
min_analysis_chars = {min_chars}

[notifications]
toast_secs = {toast}

[chat]
# Quick prompts send themselves after this delay unless edited
quick_prompt_delay_ms = {qp_delay}
history_size = {history}

[logging]
# trace, debug, info, warn, error (RUST_LOG overrides)
level = {level}
file_enabled = {file_enabled}
file_dir = {file_dir}
# hourly, daily, never
file_rotation = "{rotation}"
file_prefix = {prefix}
"#,
            backend = quoted(&self.backend_url),
            timeout = timeout,
            theme = quoted(&self.theme),
            use_bg = self.use_theme_background,
            export_dir = quoted(&self.export_dir.to_string_lossy()),
            particles = self.features.particles,
            bell = self.features.notification_bell,
            typing = self.features.typing_indicator,
            max_media = self.limits.max_media_mb,
            max_pdf = self.limits.max_pdf_mb,
            min_chars = self.limits.min_analysis_chars,
            toast = self.notifications.toast_secs,
            qp_delay = self.chat.quick_prompt_delay_ms,
            history = self.chat.history_size,
            level = quoted(&self.logging.level),
            file_enabled = self.logging.file_enabled,
            file_dir = quoted(&self.logging.file_dir.to_string_lossy()),
            rotation = self.logging.file_rotation.as_str(),
            prefix = quoted(&self.logging.file_prefix),
        )
    }
}
