//! Feature flags configuration
//!
//! Decorative extras (opt-out: default enabled).

use serde::Deserialize;

/// Feature flags for decorative extras
#[derive(Debug, Clone)]
pub struct Features {
    /// Animated particle field behind the dashboard
    pub particles: bool,

    /// Ring the terminal bell when a chat reply arrives
    pub notification_bell: bool,

    /// Show "typing..." under the chat log while a reply is pending
    pub typing_indicator: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            particles: true,
            notification_bell: true,
            typing_indicator: true,
        }
    }
}

/// Feature flags as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileFeatures {
    pub particles: Option<bool>,
    pub notification_bell: Option<bool>,
    pub typing_indicator: Option<bool>,
}

impl Features {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileFeatures>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            particles: file.particles.unwrap_or(true),
            notification_bell: file.notification_bell.unwrap_or(true),
            typing_indicator: file.typing_indicator.unwrap_or(true),
        }
    }
}
