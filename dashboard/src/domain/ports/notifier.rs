//! Port for transient user-facing notifications.

use crate::domain::Notification;

/// Sink for toasts emitted by the slices.
pub trait Notifier: Send + Sync {
    /// Show `notification` to the user without blocking.
    fn notify(&self, notification: Notification);
}

