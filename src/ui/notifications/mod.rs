// SPDX-License-Identifier: MPL-2.0
//! Toasts for things that happen away from the main panels: downloads
//! finishing, the settings file failing to load or save.
//!
//! - [`notification`] - what a toast says and how long it stays
//! - [`manager`] - which toasts are on screen and which are waiting
//! - [`toast`] - the overlay widget
//!
//! ```ignore
//! let mut manager = Manager::new();
//! manager.push(Notification::success("notification-download-saved").with_arg("file", "diagram.svg"));
//!
//! stack![content, toast::overlay(&manager, &i18n).map(Message::Notification)]
//! ```
//!
//! Success toasts last 3s, warnings 5s, errors stay until dismissed. At most
//! three are visible at once.

mod manager;
mod notification;
pub mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, Severity};
