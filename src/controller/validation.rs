//! Client-side checks that run before any request is built

use super::session::{SelectedFile, UploadKind};
use crate::config::Limits;
use std::path::Path;

const MEDIA_MIME_TYPES: [&str; 13] = [
    "video/mp4",
    "video/avi",
    "video/mov",
    "video/mkv",
    "video/flv",
    "video/wmv",
    "video/webm",
    "video/x-msvideo",
    "audio/mp3",
    "audio/wav",
    "audio/m4a",
    "audio/flac",
    "audio/aac",
];

const MEDIA_EXTENSIONS: [&str; 13] = [
    "mp4", "avi", "mov", "mkv", "flv", "wmv", "webm", "m4v", "mp3", "wav", "m4a", "flac", "aac",
];

/// Why an input was turned away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    EmptyText,
    TextTooShort { min: usize },
    InvalidMedia,
    InvalidPdf,
    TooLarge { limit_mb: u64 },
    NoPath,
    Unreadable { path: String, reason: String },
}

impl Rejection {
    /// Toast text
    pub fn message(&self) -> String {
        match self {
            Rejection::EmptyText => "Please enter some text to summarize.".to_string(),
            Rejection::TextTooShort { min } => {
                format!("Please enter at least {min} characters for meaningful analysis.")
            }
            Rejection::InvalidMedia => "Please upload a valid video or audio file.".to_string(),
            Rejection::InvalidPdf => "Please select a valid PDF file.".to_string(),
            Rejection::TooLarge { limit_mb } => {
                format!("File size exceeds {limit_mb}MB limit. Please choose a smaller file.")
            }
            Rejection::NoPath => "Please enter a file path.".to_string(),
            Rejection::Unreadable { path, reason } => format!("Cannot open {path}: {reason}"),
        }
    }
}

/// Trimmed chat message, or `None` when there is nothing to send
pub fn chat_message(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Summarize accepts any non-empty text
pub fn summary_text(input: &str) -> Result<&str, Rejection> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Rejection::EmptyText);
    }
    Ok(trimmed)
}

/// Analysis wants at least `min` characters after trimming
pub fn analysis_text(input: &str, min: usize) -> Result<&str, Rejection> {
    let trimmed = summary_text(input)?;
    if trimmed.chars().count() < min {
        return Err(Rejection::TextTooShort { min });
    }
    Ok(trimmed)
}

fn extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Type and size policy for an upload
pub fn check_file(kind: UploadKind, file: &SelectedFile, limits: &Limits) -> Result<(), Rejection> {
    let ext = extension(&file.name);
    let (type_ok, max_bytes, limit_mb) = match kind {
        UploadKind::Media => (
            MEDIA_MIME_TYPES.contains(&file.mime.as_str()) || MEDIA_EXTENSIONS.contains(&ext.as_str()),
            limits.max_media_bytes(),
            limits.max_media_mb,
        ),
        UploadKind::Pdf => (
            file.mime == "application/pdf" || ext == "pdf",
            limits.max_pdf_bytes(),
            limits.max_pdf_mb,
        ),
    };

    if !type_ok {
        return Err(match kind {
            UploadKind::Media => Rejection::InvalidMedia,
            UploadKind::Pdf => Rejection::InvalidPdf,
        });
    }
    if file.size > max_bytes {
        return Err(Rejection::TooLarge { limit_mb });
    }
    Ok(())
}

/// Stat `path` and describe it as an upload candidate
pub fn inspect(path: &Path) -> Result<SelectedFile, Rejection> {
    let unreadable = |reason: String| Rejection::Unreadable {
        path: path.display().to_string(),
        reason,
    };

    let metadata = std::fs::metadata(path).map_err(|e| unreadable(e.to_string()))?;
    if !metadata.is_file() {
        return Err(unreadable("not a regular file".to_string()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let mime = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string();

    Ok(SelectedFile {
        path: path.to_path_buf(),
        name,
        size: metadata.len(),
        mime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, mime: &str, size: u64) -> SelectedFile {
        SelectedFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            size,
            mime: mime.to_string(),
        }
    }

    const MB: u64 = 1024 * 1024;

    #[test]
    fn chat_message_trims() {
        assert_eq!(chat_message("  hello \n"), Some("hello"));
        assert_eq!(chat_message(" \t "), None);
    }

    #[test]
    fn summary_has_no_minimum() {
        assert_eq!(summary_text("  x "), Ok("x"));
        assert_eq!(summary_text("   "), Err(Rejection::EmptyText));
    }

    #[test]
    fn analysis_minimum_counts_trimmed_chars() {
        let padded = format!("   {}   ", "é".repeat(49));
        assert_eq!(
            analysis_text(&padded, 50),
            Err(Rejection::TextTooShort { min: 50 })
        );
        let ok = "é".repeat(50);
        assert_eq!(analysis_text(&ok, 50), Ok(ok.as_str()));
        assert_eq!(analysis_text("", 50), Err(Rejection::EmptyText));
    }

    #[test]
    fn media_accepts_extension_or_mime() {
        let limits = Limits::default();
        assert!(check_file(UploadKind::Media, &file("clip.MKV", "application/octet-stream", MB), &limits).is_ok());
        assert!(check_file(UploadKind::Media, &file("noext", "audio/wav", MB), &limits).is_ok());
        assert_eq!(
            check_file(UploadKind::Media, &file("notes.txt", "text/plain", MB), &limits),
            Err(Rejection::InvalidMedia)
        );
    }

    #[test]
    fn size_limit_is_inclusive() {
        let limits = Limits::default();
        assert!(check_file(UploadKind::Media, &file("a.mp4", "video/mp4", 200 * MB), &limits).is_ok());
        assert_eq!(
            check_file(UploadKind::Media, &file("a.mp4", "video/mp4", 200 * MB + 1), &limits),
            Err(Rejection::TooLarge { limit_mb: 200 })
        );
        assert_eq!(
            Rejection::TooLarge { limit_mb: 200 }.message(),
            "File size exceeds 200MB limit. Please choose a smaller file."
        );
    }

    #[test]
    fn pdf_policy() {
        let limits = Limits::default();
        assert!(check_file(UploadKind::Pdf, &file("lecture.pdf", "application/pdf", MB), &limits).is_ok());
        assert_eq!(
            check_file(UploadKind::Pdf, &file("lecture.docx", "application/msword", MB), &limits),
            Err(Rejection::InvalidPdf)
        );
    }

    #[test]
    fn inspect_reads_size_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week1.pdf");
        std::fs::write(&path, b"%PDF-1.4 fake").unwrap();

        let selected = inspect(&path).unwrap();
        assert_eq!(selected.name, "week1.pdf");
        assert_eq!(selected.size, 13);
        assert_eq!(selected.mime, "application/pdf");
    }

    #[test]
    fn inspect_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = inspect(&dir.path().join("missing.mp4")).unwrap_err();
        assert!(matches!(err, Rejection::Unreadable { .. }));
        let err = inspect(dir.path()).unwrap_err();
        assert!(matches!(err, Rejection::Unreadable { .. }));
    }
}
