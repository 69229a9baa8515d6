// SPDX-License-Identifier: MPL-2.0
//! Configuration persistence logic.
//!
//! Every preference change is written back right away. Failures never block
//! the UI: they are logged and surfaced as an error toast.

use super::config::{self, Config};
use crate::diagram::RenderFormat;
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{Manager, Notification};
use crate::ui::theming::{ResolvedTheme, ThemeMode};
use std::path::PathBuf;
use unic_langid::LanguageIdentifier;

/// Writes `config` to disk, reporting failures through `notifications`.
///
/// Returns whether the file was written.
pub fn persist_config(
    config: &Config,
    config_dir: Option<PathBuf>,
    notifications: &mut Manager,
) -> bool {
    match config::save_with_override(config, config_dir) {
        Ok(()) => true,
        Err(error) => {
            tracing::error!("failed to save settings: {error}");
            notifications.push(Notification::error("notification-config-save-error"));
            false
        }
    }
}

/// Stores a new API key.
pub fn store_credential(config: &mut Config, key: String) {
    config.generator.gemini_api_key = Some(key);
}

/// Records the theme preference and resolves it for the window.
pub fn apply_theme_change(config: &mut Config, mode: ThemeMode) -> ResolvedTheme {
    config.general.theme = mode;
    mode.resolve()
}

pub fn apply_format_change(config: &mut Config, format: RenderFormat) {
    config.render.format = format;
}

/// Switches the active locale and records it in the config.
pub fn apply_language_change(i18n: &mut I18n, config: &mut Config, locale: LanguageIdentifier) {
    config.general.language = Some(locale.to_string());
    i18n.set_locale(locale);
}
