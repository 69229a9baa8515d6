// SPDX-License-Identifier: MPL-2.0
//! Toast bookkeeping.
//!
//! Notifications are kept in arrival order. The oldest few are on screen, the
//! others wait for a slot; dismissing or expiring a toast lets the next one in.

use super::notification::{Notification, NotificationId, Severity};
use std::collections::VecDeque;

/// Toasts on screen at the same time.
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick,
}

#[derive(Debug, Default)]
pub struct Manager {
    entries: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `notification`, shown as soon as a slot is free.
    ///
    /// A toast saying the same thing as a pending one replaces it, so repeated
    /// failures (every preference change retrying a broken settings file) do
    /// not pile up. Warnings and errors are also logged.
    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Warning => tracing::warn!(key = notification.message_key(), "notification"),
            Severity::Error => tracing::error!(key = notification.message_key(), "notification"),
            Severity::Success => {}
        }

        match self
            .entries
            .iter_mut()
            .find(|pending| pending.says_same_as(&notification))
        {
            Some(pending) => *pending = notification,
            None => self.entries.push_back(notification),
        }
    }

    /// Removes the notification; `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        self.entries.len() != before
    }

    /// Drops on-screen toasts whose display time is over.
    pub fn tick(&mut self) {
        let expired: Vec<NotificationId> = self
            .visible()
            .filter(|entry| entry.should_auto_dismiss())
            .map(Notification::id)
            .collect();
        for id in expired {
            self.dismiss(id);
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(),
        }
    }

    /// Toasts currently on screen, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().take(MAX_VISIBLE)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.entries.len().min(MAX_VISIBLE)
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.entries.len().saturating_sub(MAX_VISIBLE)
    }

    /// Whether anything is visible or waiting. Drives the tick subscription.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(file: &str) -> Notification {
        Notification::success("notification-download-saved").with_arg("file", file)
    }

    #[test]
    fn starts_empty() {
        let manager = Manager::new();
        assert!(!manager.has_notifications());
        assert_eq!(manager.visible().count(), 0);
    }

    #[test]
    fn overflow_waits_for_a_slot() {
        let mut manager = Manager::new();
        for file in ["a.svg", "b.svg", "c.svg", "d.svg"] {
            manager.push(saved(file));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);
    }

    #[test]
    fn dismissing_lets_the_next_one_in() {
        let mut manager = Manager::new();
        let first = saved("a.svg");
        let first_id = first.id();
        manager.push(first);
        for file in ["b.svg", "c.svg"] {
            manager.push(saved(file));
        }
        manager.push(Notification::warning("notification-config-load-error"));

        assert!(manager.dismiss(first_id));
        assert_eq!(manager.queued_count(), 0);
        assert!(manager
            .visible()
            .any(|n| n.message_key() == "notification-config-load-error"));
        assert!(!manager.dismiss(first_id), "already gone");
    }

    #[test]
    fn dismiss_message_removes_toast() {
        let mut manager = Manager::new();
        let warning = Notification::warning("notification-config-load-error");
        let id = warning.id();
        manager.push(warning);

        manager.handle_message(&Message::Dismiss(id));
        assert!(!manager.has_notifications());
    }

    #[test]
    fn repeated_message_replaces_previous_toast() {
        let mut manager = Manager::new();
        manager.push(Notification::error("notification-config-save-error"));
        manager.push(Notification::error("notification-config-save-error"));
        assert_eq!(manager.visible_count(), 1);

        manager.push(saved("a.svg"));
        manager.push(saved("b.svg"));
        assert_eq!(manager.visible_count(), 3);
    }

    #[test]
    fn errors_survive_ticks() {
        let mut manager = Manager::new();
        manager.push(Notification::error("notification-download-failed"));
        manager.handle_message(&Message::Tick);
        assert_eq!(manager.visible_count(), 1);
    }
}
