//! Ephemeral user notifications
//!
//! Toasts stacked in the top-right corner of the screen. Each one carries its
//! own expiry deadline, so notifications shown a second apart also disappear a
//! second apart.

use crate::error_classifier::LogLevel;
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn log_level(&self) -> LogLevel {
        match self {
            Severity::Info | Severity::Success => LogLevel::Info,
            Severity::Warning => LogLevel::Warn,
            Severity::Danger => LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct NotificationCenter {
    ttl: Duration,
    next_id: u64,
    /// Oldest first.
    active: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 1,
            active: Vec::new(),
        }
    }

    /// Show a notification now. Returns its id.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> u64 {
        self.push_at(severity, message, Instant::now())
    }

    pub fn push_at(&mut self, severity: Severity, message: impl Into<String>, now: Instant) -> u64 {
        let message = message.into();
        log::log!(log::Level::from(severity.log_level()), "[{}] {}", severity, message);

        let id = self.next_id;
        self.next_id += 1;
        self.active.push(Notification {
            id,
            severity,
            message,
            expires_at: now + self.ttl,
        });
        id
    }

    /// Close a notification before its timer. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    /// Remove every notification whose own deadline has passed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        self.active.retain(|n| n.expires_at > now);
        before - self.active.len()
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.active.last()
    }
}
