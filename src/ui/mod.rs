// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! panel owns its widget state, renders from a `ViewContext` and reports
//! `Event`s to the application.
//!
//! # Panels
//!
//! - [`header`] - Title bar and settings toggle
//! - [`settings`] - API key, theme, render format and language
//! - [`prompt`] - Description input and Generate button
//! - [`source_editor`] - Editable PlantUML source
//! - [`preview`] - Rendered diagram and downloads
//!
//! # Shared Infrastructure
//!
//! - [`components`] - Shared widgets (error panel)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`notifications`] - Toast notification system for user feedback

pub mod components;
pub mod design_tokens;
pub mod header;
pub mod notifications;
pub mod preview;
pub mod prompt;
pub mod settings;
pub mod source_editor;
pub mod styles;
pub mod theming;
