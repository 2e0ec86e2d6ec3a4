//! User-facing notification messages.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::notify_secs;

/// Severity of a notification, which also decides its styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    /// An operation is in flight
    Progress,
    /// Operation finished
    Success,
    /// Local precondition rejected the action
    Warning,
    /// Transport or device error
    Error,
}

/// A single notice shown in the notification bar, with a unique ID.
#[derive(Clone, Debug)]
pub struct Notification {
    /// Unique ID so a delayed hide only removes the notice it was scheduled for
    pub id: usize,
    pub kind: NotificationKind,
    pub message: String,
    /// Seconds until auto-hide; `None` stays until replaced
    pub duration_secs: Option<u32>,
}

// Global counter for generating unique IDs
static NOTIFICATION_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl Notification {
    fn new(kind: NotificationKind, message: String, duration_secs: Option<u32>) -> Self {
        Self {
            id: NOTIFICATION_COUNTER.fetch_add(1, Ordering::Relaxed),
            kind,
            message,
            duration_secs,
        }
    }

    pub fn progress(s: impl Into<String>) -> Self {
        Self::new(NotificationKind::Progress, s.into(), None)
    }

    pub fn success(s: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, s.into(), Some(notify_secs::SUCCESS))
    }

    pub fn warning(s: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, s.into(), Some(notify_secs::WARNING))
    }

    pub fn error(s: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, s.into(), Some(notify_secs::ERROR))
    }

    /// Error notice that stays until replaced.
    pub fn persistent_error(s: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, s.into(), None)
    }

    /// Progress notice that hides after the success duration.
    pub fn brief_progress(s: impl Into<String>) -> Self {
        Self::new(NotificationKind::Progress, s.into(), Some(notify_secs::SUCCESS))
    }

    /// Progress notice shown for the error duration.
    pub fn timed_progress(s: impl Into<String>) -> Self {
        Self::new(NotificationKind::Progress, s.into(), Some(notify_secs::ERROR))
    }
}

impl PartialEq for Notification {
    fn eq(&self, other: &Self) -> bool {
        // Only compare content, not ID
        self.kind == other.kind
            && self.message == other.message
            && self.duration_secs == other.duration_secs
    }
}
