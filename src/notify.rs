//! Transient user notifications ("toasts").
//!
//! SYSTEM CONTEXT
//! ==============
//! Guard denials and auth failures each produce exactly one notification.
//! Delivery is fire-and-forget: the web host queues them in a flash cookie
//! and renders them on the next page; background code can log them instead.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

impl Severity {
    /// CSS modifier used by the page shell.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self { severity, message: message.into() }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }
}

/// Fire-and-forget notification channel.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Collects notifications for the next rendered page.
#[derive(Debug, Default)]
pub struct FlashQueue {
    pending: Mutex<Vec<Notification>>,
}

impl FlashQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue pre-populated with notifications carried over from a request.
    #[must_use]
    pub fn from_pending(pending: Vec<Notification>) -> Self {
        Self { pending: Mutex::new(pending) }
    }

    /// Take everything queued so far, leaving the queue empty.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for FlashQueue {
    fn notify(&self, notification: Notification) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Writes notifications to the log. Used where no page will render them.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::error!(message = %notification.message, "notification"),
            Severity::Warning => tracing::warn!(message = %notification.message, "notification"),
            Severity::Info | Severity::Success => {
                tracing::info!(message = %notification.message, "notification");
            }
        }
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
