//! Transient toast notifications
//!
//! Every toast is timed from its own creation: fully visible for the
//! visible period, then fading for the fade period, then gone. Toasts stack
//! in creation order and never affect one another's timing.

use std::time::{Duration, Instant};

use artgen_config::NotificationConfig;
use strum::{AsRefStr, Display};

/// Styling tag of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
}

/// Where a toast is in its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Fading,
    Expired,
}

/// One toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created: Instant,
}

impl Notification {
    /// CSS classes of the toast node
    pub fn class_name(&self) -> String {
        format!("toast toast-{}", self.severity)
    }
}

/// Visible and fade periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub visible: Duration,
    pub fade: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_secs(4),
            fade: Duration::from_millis(300),
        }
    }
}

impl NotificationTiming {
    /// # Errors
    ///
    /// Returns an error if either duration fails to parse
    pub fn from_config(config: &NotificationConfig) -> anyhow::Result<Self> {
        Ok(Self {
            visible: config.visible_duration()?,
            fade: config.fade_duration()?,
        })
    }

    /// Total time a toast spends in the container
    pub fn lifetime(&self) -> Duration {
        self.visible + self.fade
    }
}

/// The toast container
#[derive(Debug, Default)]
pub struct Notifications {
    timing: NotificationTiming,
    active: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn new(timing: NotificationTiming) -> Self {
        Self {
            timing,
            active: Vec::new(),
            next_id: 0,
        }
    }

    pub const fn timing(&self) -> NotificationTiming {
        self.timing
    }

    /// Append a toast created at `now`, returning its id
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let message = message.into();
        tracing::debug!(id, severity = %severity, message = %message, "toast shown");

        self.active.push(Notification {
            id,
            message,
            severity,
            created: now,
        });

        id
    }

    /// Lifetime stage of `notification` at `now`
    pub fn visibility(&self, notification: &Notification, now: Instant) -> Visibility {
        let age = now.saturating_duration_since(notification.created);

        if age < self.timing.visible {
            Visibility::Visible
        } else if age < self.timing.lifetime() {
            Visibility::Fading
        } else {
            Visibility::Expired
        }
    }

    /// Drop every toast whose fade has finished; returns how many went
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        let lifetime = self.timing.lifetime();
        self.active.retain(|n| now.saturating_duration_since(n.created) < lifetime);
        before - self.active.len()
    }

    /// Toasts still in the container, oldest first
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Most recent toast, if any
    pub fn latest(&self) -> Option<&Notification> {
        self.active.last()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
