//! Expiring toast queue.
//!
//! Toasts auto-close after [`TOAST_TTL`]. The queue never runs a timer:
//! expiry is evaluated against the injected clock whenever the queue is
//! read, which keeps tests deterministic.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::debug;

use crate::domain::Notification;
use crate::domain::ports::Notifier;

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    shown_at: DateTime<Utc>,
    seen: bool,
}

/// Notifier that keeps toasts until they expire.
pub struct ToastQueue {
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    toasts: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    /// Queue using [`TOAST_TTL`].
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, TOAST_TTL)
    }

    /// Queue with a custom lifetime.
    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            toasts: Mutex::new(Vec::new()),
        }
    }

    /// Toasts still visible, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        self.with_live(|toasts| {
            toasts
                .iter()
                .map(|toast| toast.notification.clone())
                .collect()
        })
    }

    /// Visible toasts not returned by a previous call, oldest first.
    pub fn take_unseen(&self) -> Vec<Notification> {
        self.with_live(|toasts| {
            toasts
                .iter_mut()
                .filter(|toast| !toast.seen)
                .map(|toast| {
                    toast.seen = true;
                    toast.notification.clone()
                })
                .collect()
        })
    }

    /// Close every toast.
    pub fn dismiss_all(&self) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn with_live<R>(&self, f: impl FnOnce(&mut Vec<Toast>) -> R) -> R {
        let now = self.clock.utc();
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        let before = toasts.len();
        toasts.retain(|toast| now.signed_duration_since(toast.shown_at) < self.ttl);
        let expired = before - toasts.len();
        if expired > 0 {
            debug!(expired, "toasts closed");
        }
        f(&mut toasts)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        let shown_at = self.clock.utc();
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Toast {
                notification,
                shown_at,
                seen: false,
            });
    }
}
