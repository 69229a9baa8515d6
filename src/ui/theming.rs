// SPDX-License-Identifier: MPL-2.0
//! Theme preference and its resolution to a concrete light or dark theme.

use serde::{Deserialize, Serialize};

/// Theme preference stored in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    /// Case-insensitive parse of `light`, `dark` or `system`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }

    /// i18n key of the label shown in the settings panel.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            ThemeMode::Light => "settings-theme-light",
            ThemeMode::Dark => "settings-theme-dark",
            ThemeMode::System => "settings-theme-system",
        }
    }

    /// Resolves the preference to a concrete theme.
    ///
    /// `System` queries the desktop once; the result is not updated when the
    /// desktop preference changes later. Detection failures resolve to dark.
    #[must_use]
    pub fn resolve(self) -> ResolvedTheme {
        match self {
            ThemeMode::Light => ResolvedTheme::Light,
            ThemeMode::Dark => ResolvedTheme::Dark,
            ThemeMode::System => ResolvedTheme::from_system(dark_light::detect()),
        }
    }
}

/// Theme actually applied to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    Light,
    #[default]
    Dark,
}

impl ResolvedTheme {
    fn from_system<E>(detected: Result<dark_light::Mode, E>) -> Self {
        match detected {
            Ok(dark_light::Mode::Light) => ResolvedTheme::Light,
            _ => ResolvedTheme::Dark,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == ResolvedTheme::Dark
    }

    #[must_use]
    pub fn to_iced_theme(self) -> iced::Theme {
        match self {
            ResolvedTheme::Light => iced::Theme::Light,
            ResolvedTheme::Dark => iced::Theme::Dark,
        }
    }
}
