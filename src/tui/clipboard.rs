//! Clipboard helper for copying results to the system clipboard
//!
//! Uses `arboard` for cross-platform support. The clipboard handle is
//! created per copy so nothing is held between uses.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Fails when no display server is reachable, as on a headless Linux box.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
