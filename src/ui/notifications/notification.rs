// SPDX-License-Identifier: MPL-2.0
//! A single toast: what it says, how serious it is and when it appeared.

use crate::ui::design_tokens::palette;
use iced::Color;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Warning,
    /// Stays until the user closes it.
    Error,
}

impl Severity {
    /// Accent stripe and glyph color.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Self::Success => palette::POSITIVE,
            Self::Warning => palette::CAUTION,
            Self::Error => palette::DANGER,
        }
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        if self == Self::Success {
            "✓"
        } else {
            "!"
        }
    }

    /// How long the toast stays on screen; `None` means until dismissed.
    #[must_use]
    pub fn auto_dismiss_duration(self) -> Option<Duration> {
        match self {
            Self::Success => Some(Duration::from_secs(3)),
            Self::Warning => Some(Duration::from_secs(5)),
            Self::Error => None,
        }
    }
}

/// Toast content. The text is looked up from `message_key` at render time so
/// a language switch also retranslates toasts already on screen.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Fills `{ $name }` in the translated message.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    /// Same severity, key and arguments; ids and timestamps are ignored.
    #[must_use]
    pub fn says_same_as(&self, other: &Notification) -> bool {
        (self.severity, &self.message_key, &self.message_args)
            == (other.severity, &other.message_key, &other.message_args)
    }

    #[must_use]
    pub fn should_auto_dismiss(&self) -> bool {
        match self.severity.auto_dismiss_duration() {
            Some(lifetime) => self.created_at.elapsed() >= lifetime,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_toast_gets_its_own_id() {
        let first = Notification::warning("notification-config-load-error");
        let second = Notification::warning("notification-config-load-error");
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn severities_look_different() {
        let colors = [
            Severity::Success.color(),
            Severity::Warning.color(),
            Severity::Error.color(),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn errors_wait_for_the_user() {
        assert_eq!(Severity::Error.auto_dismiss_duration(), None);
        assert!(!Notification::error("notification-config-save-error").should_auto_dismiss());
    }

    #[test]
    fn warnings_linger_longer_than_successes() {
        assert!(
            Severity::Warning.auto_dismiss_duration() > Severity::Success.auto_dismiss_duration()
        );
        assert!(!Notification::success("notification-download-saved").should_auto_dismiss());
    }

    #[test]
    fn arguments_distinguish_messages() {
        let a = Notification::success("notification-download-saved").with_arg("file", "a.svg");
        let b = Notification::success("notification-download-saved").with_arg("file", "b.svg");
        let a_again = Notification::success("notification-download-saved").with_arg("file", "a.svg");
        assert!(!a.says_same_as(&b));
        assert!(a.says_same_as(&a_again));
        assert_ne!(a.id(), a_again.id());
    }

    #[test]
    fn arguments_are_kept_in_order() {
        let notification =
            Notification::error("notification-download-failed").with_arg("error", "timeout");

        assert_eq!(notification.severity(), Severity::Error);
        assert_eq!(notification.message_key(), "notification-download-failed");
        assert_eq!(
            notification.message_args(),
            &[("error".to_string(), "timeout".to_string())]
        );
    }
}
