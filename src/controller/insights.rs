//! Chat history sidebar and mood figure
//!
//! Keyword matching only; the backend does the real sentiment analysis.

use super::session::ChatMessage;
use crate::util::preview;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

const POSITIVE_WORDS: [&str; 9] = [
    "good",
    "great",
    "happy",
    "wonderful",
    "excellent",
    "amazing",
    "positive",
    "excited",
    "grateful",
];

const NEGATIVE_WORDS: [&str; 8] = [
    "bad",
    "sad",
    "angry",
    "stressed",
    "anxious",
    "worried",
    "depressed",
    "frustrated",
];

/// The mood figure counts against a shorter list than the badges do
const MOOD_WORDS: usize = 7;

const PREVIEW_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Positive,
    NeedsSupport,
    Neutral,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::Positive => "Positive",
            Badge::NeedsSupport => "Needs Support",
            Badge::Neutral => "Neutral",
        }
    }

    /// Positive wins over negative when both appear
    pub fn classify(message: &str) -> Badge {
        let lower = message.to_lowercase();
        if POSITIVE_WORDS.iter().any(|w| lower.contains(w)) {
            Badge::Positive
        } else if NEGATIVE_WORDS.iter().any(|w| lower.contains(w)) {
            Badge::NeedsSupport
        } else {
            Badge::Neutral
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub preview: String,
    pub badge: Badge,
    pub at: DateTime<Local>,
}

impl HistoryEntry {
    /// e.g. "Oct 14, 3:05 PM"
    pub fn label(&self) -> String {
        self.at.format("%b %-d, %-I:%M %p").to_string()
    }
}

/// Most-recent-first, bounded
#[derive(Debug, Clone)]
pub struct ChatHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl ChatHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, message: &str) {
        self.record_at(message, Local::now());
    }

    pub(crate) fn record_at(&mut self, message: &str, at: DateTime<Local>) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(HistoryEntry {
            preview: preview(message, PREVIEW_CHARS),
            badge: Badge::classify(message),
            at,
        });
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Percent of messages that read positive, never shown below 50
pub fn mood_percent(log: &[ChatMessage]) -> u32 {
    let total = log.len().max(1);
    let positive = log
        .iter()
        .filter(|m| {
            let lower = m.text.to_lowercase();
            POSITIVE_WORDS[..MOOD_WORDS].iter().any(|w| lower.contains(w))
        })
        .count();
    let pct = (positive as f64 / total as f64 * 100.0).max(50.0);
    pct.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::session::Sender;
    use chrono::TimeZone;

    #[test]
    fn badge_prefers_positive() {
        assert_eq!(Badge::classify("I'm GRATEFUL today"), Badge::Positive);
        assert_eq!(Badge::classify("stressed but happy"), Badge::Positive);
        assert_eq!(Badge::classify("so anxious about exams"), Badge::NeedsSupport);
        assert_eq!(Badge::classify("what is osmosis"), Badge::Neutral);
    }

    #[test]
    fn history_is_newest_first_and_bounded() {
        let mut history = ChatHistory::new(3);
        for i in 0..5 {
            history.record(&format!("message {i}"));
        }
        let previews: Vec<_> = history.entries().map(|e| e.preview.clone()).collect();
        assert_eq!(previews, vec!["message 4", "message 3", "message 2"]);
    }

    #[test]
    fn history_preview_truncates_long_messages() {
        let mut history = ChatHistory::new(10);
        history.record(&"a".repeat(60));
        let entry = history.entries().next().unwrap();
        assert_eq!(entry.preview.chars().count(), 43);
        assert!(entry.preview.ends_with("..."));
    }

    #[test]
    fn history_label_format() {
        let mut history = ChatHistory::new(1);
        let at = Local.with_ymd_and_hms(2026, 10, 14, 15, 5, 0).unwrap();
        history.record_at("hi", at);
        assert_eq!(history.entries().next().unwrap().label(), "Oct 14, 3:05 PM");
    }

    #[test]
    fn mood_floor_is_fifty() {
        assert_eq!(mood_percent(&[]), 50);
        let log = vec![
            ChatMessage::new(Sender::User, "meh"),
            ChatMessage::new(Sender::Assistant, "tell me more"),
        ];
        assert_eq!(mood_percent(&log), 50);
    }

    #[test]
    fn mood_counts_positive_share() {
        let log = vec![
            ChatMessage::new(Sender::User, "I feel great"),
            ChatMessage::new(Sender::Assistant, "That's wonderful to hear"),
            ChatMessage::new(Sender::User, "yes"),
            ChatMessage::new(Sender::Assistant, "ok"),
        ];
        assert_eq!(mood_percent(&log), 50);

        let log = vec![
            ChatMessage::new(Sender::User, "I feel great"),
            ChatMessage::new(Sender::Assistant, "amazing"),
            ChatMessage::new(Sender::User, "good"),
            ChatMessage::new(Sender::Assistant, "ok"),
        ];
        assert_eq!(mood_percent(&log), 75);
    }

    #[test]
    fn mood_ignores_words_outside_its_list() {
        // "excited" earns a Positive badge but does not move the mood figure
        let log = vec![ChatMessage::new(Sender::User, "excited")];
        assert_eq!(Badge::classify("excited"), Badge::Positive);
        assert_eq!(mood_percent(&log), 50);
    }
}
