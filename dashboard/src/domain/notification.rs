//! Transient user-facing messages shown after an operation completes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// An operation completed.
    Success,
    /// An operation was rejected.
    Error,
    /// Informational confirmation.
    Info,
}

/// A non-blocking toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notification {
    /// Success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Informational toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
            NotificationLevel::Info => "info",
        };
        write!(f, "[{marker}] {}", self.message)
    }
}
