//! Plain-text chat transcript export

use super::session::ChatMessage;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

const HEADER: &str = "AI Student Companion - Chat Export";

pub fn file_name(date: NaiveDate) -> String {
    format!("ai_chat_export_{}.txt", date.format("%Y-%m-%d"))
}

pub fn render(log: &[ChatMessage]) -> String {
    let mut out = format!("{HEADER}\n{}\n\n", "=".repeat(50));
    for msg in log {
        out.push_str(&format!("{}: {}\n", msg.sender.label(), msg.text));
        out.push_str(&format!("Time: {}\n\n", msg.timestamp));
    }
    out
}

/// Write the transcript into `dir`, returning the file's path
pub fn write(dir: &Path, log: &[ChatMessage], date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(file_name(date));
    std::fs::write(&path, render(log))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
