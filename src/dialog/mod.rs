//! Modal overlays and the error notification.
//!
//! A dialog is either closed or open with its content. Opening always derives
//! fresh content from the selected record; closing drops it.

use std::time::{Duration, Instant};

/// Open/closed overlay holding `T` while open.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog<T> {
    Closed,
    Open(T),
}

impl<T> Default for Dialog<T> {
    fn default() -> Self {
        Dialog::Closed
    }
}

impl<T> Dialog<T> {
    /// Open with `content`, replacing whatever was shown before.
    pub fn open(&mut self, content: T) {
        *self = Dialog::Open(content);
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            Dialog::Open(content) => Some(content),
            Dialog::Closed => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        match self {
            Dialog::Open(content) => Some(content),
            Dialog::Closed => None,
        }
    }

    /// Close and discard the content.
    pub fn close(&mut self) {
        *self = Dialog::Closed;
    }
}

/// A visible error message.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

/// Single-slot error notification that dismisses itself after `duration`.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Toast>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Show `message`, replacing any message already visible.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Toast {
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|t| t.message.as_str())
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the message once it has been visible for the full duration.
    /// Returns true if a message was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|t| now.saturating_duration_since(t.shown_at) >= self.duration);
        if expired {
            self.current = None;
        }
        expired
    }
}
