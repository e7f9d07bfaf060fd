//! Toast notifications and the shared loading overlay
//!
//! Only the newest toast is ever on screen: posting one replaces whatever
//! was showing.

use std::time::{Duration, Instant};

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Info => "ℹ",
            ToastKind::Warning => "⚠",
            ToastKind::Danger => "✖",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: ToastKind,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.created_at) >= ttl
    }
}

/// The notification slot
#[derive(Debug)]
pub struct Notifications {
    current: Option<Notification>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Show `message`, dismissing any earlier toast
    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.notify_at(kind, message, Instant::now());
    }

    pub(crate) fn notify_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!(?kind, %message, "Toast");
        self.current = Some(Notification {
            kind,
            message,
            created_at: now,
        });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the toast once its time is up
    pub fn expire(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.ttl))
        {
            self.current = None;
        }
    }
}

/// Shared "processing" overlay. Show and hide are idempotent.
#[derive(Debug, Default)]
pub struct LoadingOverlay {
    shown_at: Option<Instant>,
}

impl LoadingOverlay {
    pub fn show(&mut self) {
        if self.shown_at.is_none() {
            self.shown_at = Some(Instant::now());
        }
    }

    pub fn hide(&mut self) {
        self.shown_at = None;
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.shown_at.is_some()
    }

    /// Time since the overlay appeared, drives the spinner
    pub fn elapsed(&self) -> Option<Duration> {
        self.shown_at.map(|t| t.elapsed())
    }
}
