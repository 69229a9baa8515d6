// SPDX-License-Identifier: MPL-2.0
//! Widgets shared by several panels.
//!
//! - [`error_panel`] - failure message with collapsible technical details

pub mod error_panel;
