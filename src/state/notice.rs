//! Ephemeral success/error banners.
//!
//! Each banner expires a fixed time after it was posted or is replaced by
//! the next outcome. Nothing is queued. Methods take `now` explicitly so
//! expiry is testable without sleeping.

use std::time::{Duration, Instant};

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    posted_at: Instant,
}

/// One success slot and one error slot, as the dashboard shows them.
#[derive(Clone, Debug)]
pub struct NoticeBoard {
    success: Option<Notice>,
    error: Option<Notice>,
    ttl: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}

impl NoticeBoard {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { success: None, error: None, ttl }
    }

    pub fn post_success_at(&mut self, text: impl Into<String>, now: Instant) {
        self.success = Some(Notice { kind: NoticeKind::Success, text: text.into(), posted_at: now });
    }

    pub fn post_error_at(&mut self, text: impl Into<String>, now: Instant) {
        self.error = Some(Notice { kind: NoticeKind::Error, text: text.into(), posted_at: now });
    }

    pub fn post_success(&mut self, text: impl Into<String>) {
        self.post_success_at(text, Instant::now());
    }

    pub fn post_error(&mut self, text: impl Into<String>) {
        self.post_error_at(text, Instant::now());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop banners older than the TTL and return what is still visible,
    /// error first.
    pub fn visible_at(&mut self, now: Instant) -> Vec<Notice> {
        let ttl = self.ttl;
        let expired = |n: &Notice| now.saturating_duration_since(n.posted_at) >= ttl;
        if self.success.as_ref().is_some_and(expired) {
            self.success = None;
        }
        if self.error.as_ref().is_some_and(expired) {
            self.error = None;
        }
        self.error
            .iter()
            .chain(self.success.iter())
            .cloned()
            .collect()
    }

    pub fn visible(&mut self) -> Vec<Notice> {
        self.visible_at(Instant::now())
    }

    /// Remove and return every unexpired banner.
    pub fn drain(&mut self) -> Vec<Notice> {
        let visible = self.visible();
        self.success = None;
        self.error = None;
        visible
    }
}

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;
