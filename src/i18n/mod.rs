// SPDX-License-Identifier: MPL-2.0
//! Localized UI strings.
//!
//! Translations are Fluent `.ftl` files under `assets/i18n/`, compiled into
//! the binary. The active locale is picked from `--lang`, then the settings
//! file, then the system locale, and falls back to `en-US`. It can be changed
//! at runtime from the settings panel.

pub mod fluent;
