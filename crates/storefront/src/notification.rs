//! Transient toast notifications.
//!
//! At most one notification is on screen. It stays fully visible for
//! [`DISPLAY_DURATION`], fades for [`FADE_DURATION`], then disappears.
//! Callers pass the current time in, so nothing here owns a timer.

use chrono::{DateTime, TimeDelta, Utc};

/// How long a notification is shown before it starts fading.
pub const DISPLAY_DURATION: TimeDelta = TimeDelta::milliseconds(2000);

/// Length of the fade-out.
pub const FADE_DURATION: TimeDelta = TimeDelta::milliseconds(300);

/// Shown after a product is added to the cart.
pub const ADDED_TO_CART: &str = "Added to cart!";

/// Shown after a form passes validation.
pub const FORM_SUBMITTED: &str = "Form submitted successfully!";

/// Lifecycle phase of a notification at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    FadingOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Notification {
    /// Phase at `now`, or `None` once the fade has finished.
    #[must_use]
    pub fn phase(&self, now: DateTime<Utc>) -> Option<Phase> {
        let elapsed = now - self.shown_at;
        if elapsed < DISPLAY_DURATION {
            Some(Phase::Visible)
        } else if elapsed < DISPLAY_DURATION + FADE_DURATION {
            Some(Phase::FadingOut)
        } else {
            None
        }
    }
}

/// Holds the single active notification.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
}

impl NotificationCenter {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Show `message`, replacing whatever is on screen.
    pub fn show(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        let message = message.into();
        tracing::debug!(%message, "Showing notification");
        self.current = Some(Notification {
            message,
            shown_at: now,
        });
    }

    /// The notification on screen at `now`, with its phase.
    #[must_use]
    pub fn current(&self, now: DateTime<Utc>) -> Option<(&Notification, Phase)> {
        let notification = self.current.as_ref()?;
        notification.phase(now).map(|phase| (notification, phase))
    }

    /// Drop the notification if it has fully faded by `now`.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        if self
            .current
            .as_ref()
            .is_some_and(|n| n.phase(now).is_none())
        {
            self.current = None;
        }
    }
}
