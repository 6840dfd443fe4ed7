use crate::constants::{NOTIFICATION_HOLD, NOTIFICATION_TEXT};
use instant::Instant;
use std::time::Duration;

/// Visibility transition the frontend has to apply to the banner element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationChange {
    Show,
    Hide,
}

/// Transient banner with a single hide deadline.
///
/// A new trigger replaces the deadline of the previous one; messages are not
/// queued. The frontend polls once per frame and mirrors the returned
/// transitions onto the DOM.
#[derive(Clone, Debug)]
pub struct Notification {
    text: String,
    hold: Duration,
    visible_until: Option<Instant>,
    pending_show: bool,
    shown: bool,
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(NOTIFICATION_TEXT, NOTIFICATION_HOLD)
    }
}

impl Notification {
    pub fn new(text: impl Into<String>, hold: Duration) -> Self {
        Self {
            text: text.into(),
            hold,
            visible_until: None,
            pending_show: false,
            shown: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    pub fn trigger(&mut self, now: Instant) {
        self.visible_until = Some(now + self.hold);
        self.pending_show = true;
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.visible_until.is_some_and(|until| now < until)
    }

    /// Report the transition since the last poll, if any.
    ///
    /// A trigger always yields a `Show` on the next poll even when its
    /// deadline already passed, so every spawn is announced at least once.
    pub fn poll(&mut self, now: Instant) -> Option<NotificationChange> {
        if std::mem::take(&mut self.pending_show) && !self.shown {
            self.shown = true;
            return Some(NotificationChange::Show);
        }
        let visible = self.is_visible(now);
        if visible == self.shown {
            return None;
        }
        self.shown = visible;
        if !visible {
            self.visible_until = None;
        }
        Some(if visible {
            NotificationChange::Show
        } else {
            NotificationChange::Hide
        })
    }
}
