// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in `settings.toml`.
//!
//! ```toml
//! [general]
//! language = "fr"       # optional
//! theme = "system"      # light | dark | system
//!
//! [generator]
//! gemini_api_key = "…"  # optional
//! model = "gemini-2.0-flash"
//!
//! [render]
//! format = "svg"        # svg | png
//! server_url = "https://www.plantuml.com/plantuml"
//! ```
//!
//! Every key is optional and missing keys take their default. An unknown
//! theme or format only resets that key; the rest of the file, the API key
//! included, is kept and the user gets a warning. A file that cannot be parsed
//! at all is copied to `settings.toml.bak` before defaults are used, so the
//! next save cannot destroy it. Files from the first releases kept
//! `gemini_api_key`, `theme` and `format` at top level; they are read
//! transparently and rewritten in sections on the next save.
//!
//! The directory comes from [`paths`](crate::app::paths).
//!
//! ```no_run
//! use iced_uml::app::config;
//! use iced_uml::diagram::RenderFormat;
//!
//! let (mut config, _warning) = config::load();
//! config.render.format = RenderFormat::Png;
//! config::save(&config).expect("settings directory is writable");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::diagram::RenderFormat;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Copy of an unparsable settings file, kept for the user.
const BACKUP_FILE: &str = "settings.toml.bak";

const LOAD_WARNING: &str = "notification-config-load-error";

/// Section names; a file mentioning none of them is a flat legacy file.
const SECTIONS: [&str; 3] = ["[general]", "[generator]", "[render]"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// BCP 47 code such as `en-US` or `fr`. `None` follows the system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "theme_mode")]
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Stored in plain text, exactly as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
        }
    }
}

impl GeneratorConfig {
    /// The saved key, unless it is blank.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default, deserialize_with = "render_format")]
    pub format: RenderFormat,

    /// PlantUML server base URL, without the format segment.
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: RenderFormat::default(),
            server_url: default_server_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Flat layout written by the first releases.
#[derive(Debug, Deserialize)]
struct FlatConfig {
    #[serde(default)]
    gemini_api_key: Option<String>,
    #[serde(default, deserialize_with = "theme_mode")]
    theme: ThemeMode,
    #[serde(default, deserialize_with = "render_format")]
    format: RenderFormat,
    #[serde(default)]
    language: Option<String>,
}

impl From<FlatConfig> for Config {
    fn from(flat: FlatConfig) -> Self {
        Config {
            general: GeneralConfig {
                language: flat.language,
                theme: flat.theme,
            },
            generator: GeneratorConfig {
                gemini_api_key: flat.gemini_api_key,
                ..GeneratorConfig::default()
            },
            render: RenderConfig {
                format: flat.format,
                ..RenderConfig::default()
            },
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Accepts `Light`, `DARK`, `system`… Anything else keeps the default.
fn theme_mode<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<ThemeMode, D::Error> {
    let raw = toml::Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(ThemeMode::parse).unwrap_or_else(|| {
        tracing::warn!(value = %raw, "unknown theme in settings, using default");
        ThemeMode::default()
    }))
}

/// Accepts `svg`, `PNG`… Anything else keeps the default.
fn render_format<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<RenderFormat, D::Error> {
    let raw = toml::Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(RenderFormat::parse).unwrap_or_else(|| {
        tracing::warn!(value = %raw, "unknown format in settings, using default");
        RenderFormat::default()
    }))
}

/// Whether the file holds a theme or format value that was reset to its
/// default while loading. Looks at both layouts.
fn has_unknown_values(content: &str) -> bool {
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    let lookup = |section: &str, key: &str| {
        table
            .get(section)
            .and_then(|section| section.get(key))
            .or_else(|| table.get(key))
    };
    fn rejected(value: Option<&toml::Value>, known: impl Fn(&str) -> bool) -> bool {
        value.is_some_and(|value| !value.as_str().is_some_and(known))
    }

    rejected(lookup("general", "theme"), |raw| ThemeMode::parse(raw).is_some())
        || rejected(lookup("render", "format"), |raw| RenderFormat::parse(raw).is_some())
}

fn config_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the settings from the default directory.
///
/// Never fails: problems yield the defaults and the i18n key of a warning to
/// show the user.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Like [`load`], reading from `base_dir` when given.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = config_path(base_dir).filter(|path| path.exists()) else {
        return (Config::default(), None);
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(error) => {
            tracing::warn!(path = %path.display(), "unreadable settings, using defaults: {error}");
            return (Config::default(), Some(LOAD_WARNING.to_string()));
        }
    };

    match parse(&content) {
        Ok(config) if has_unknown_values(&content) => (config, Some(LOAD_WARNING.to_string())),
        Ok(config) => (config, None),
        Err(error) => {
            tracing::warn!(path = %path.display(), "invalid settings, using defaults: {error}");
            back_up(&path);
            (Config::default(), Some(LOAD_WARNING.to_string()))
        }
    }
}

/// Keeps an unparsable file next to the original before it can be
/// overwritten by a save.
fn back_up(path: &Path) {
    let backup = path.with_file_name(BACKUP_FILE);
    match fs::copy(path, &backup) {
        Ok(_) => tracing::info!(backup = %backup.display(), "kept a copy of the invalid settings"),
        Err(error) => tracing::error!(backup = %backup.display(), "could not back up settings: {error}"),
    }
}

/// Parses the settings file at `path`, accepting both layouts. Unknown theme
/// or format values fall back to their default.
///
/// # Errors
///
/// [`Error::Io`] when the file cannot be read, [`Error::Config`] when it is
/// not valid TOML or does not match either layout.
pub fn load_from_path(path: &Path) -> Result<Config> {
    parse(&fs::read_to_string(path)?)
}

fn parse(content: &str) -> Result<Config> {
    if SECTIONS.iter().any(|section| content.contains(section)) {
        return Ok(toml::from_str::<Config>(content)?);
    }

    match toml::from_str::<FlatConfig>(content) {
        Ok(flat) => {
            tracing::info!("reading flat settings file");
            Ok(Config::from(flat))
        }
        // Not flat either; report the error against the sectioned layout.
        Err(_) => Ok(toml::from_str::<Config>(content)?),
    }
}

/// Saves the settings to the default directory.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Like [`save`], writing into `base_dir` when given. Does nothing when no
/// directory can be determined.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match config_path(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => {
            tracing::warn!("no config directory, settings not saved");
            Ok(())
        }
    }
}

/// Writes `config` to `path` in the sectioned layout, creating parent
/// directories as needed.
///
/// # Errors
///
/// [`Error::Io`] on file system failures, [`Error::Config`] if serialization
/// fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    /// Scratch directory plus the settings file path inside it.
    fn scratch(contents: Option<&str>) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("temp dir");
        let file = dir.path().join(CONFIG_FILE);
        if let Some(contents) = contents {
            fs::write(&file, contents).expect("seed settings file");
        }
        (dir, file)
    }

    #[test]
    fn every_section_survives_a_write() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".into()),
                theme: ThemeMode::Light,
            },
            generator: GeneratorConfig {
                gemini_api_key: Some("AIza-test".into()),
                model: "gemini-1.5-pro".into(),
            },
            render: RenderConfig {
                format: RenderFormat::Png,
                server_url: "http://localhost:8080".into(),
            },
        };
        let (dir, _) = scratch(None);
        let nested = dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &nested).expect("save");
        assert_eq!(load_from_path(&nested).expect("load"), config);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let (_dir, file) = scratch(Some("not = valid = toml"));
        let result = load_from_path(&file);
        assert!(
            matches!(result, Err(Error::Config(ref message)) if message.contains("expected")),
            "{result:?}"
        );
    }

    #[test]
    fn defaults_match_a_fresh_install() {
        let config = Config::default();
        assert_eq!(config.general.theme, ThemeMode::System);
        assert!(config.general.language.is_none());
        assert!(config.generator.credential().is_none());
        assert_eq!(config.generator.model, DEFAULT_MODEL);
        assert_eq!(config.render.format, RenderFormat::Svg);
        assert_eq!(config.render.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let (_dir, file) = scratch(Some("[render]\nformat = \"png\"\n"));
        let loaded = load_from_path(&file).expect("load");
        assert_eq!(loaded.render.format, RenderFormat::Png);
        assert_eq!(loaded.render.server_url, DEFAULT_SERVER_URL);
        assert_eq!(loaded.general.theme, ThemeMode::System);
        assert!(loaded.generator.credential().is_none());
    }

    #[test]
    fn flat_file_is_read_into_sections() {
        let (_dir, file) =
            scratch(Some("gemini_api_key = \"abc\"\ntheme = \"dark\"\nformat = \"PNG\"\n"));
        let loaded = load_from_path(&file).expect("load");
        assert_eq!(loaded.generator.credential(), Some("abc"));
        assert_eq!(loaded.general.theme, ThemeMode::Dark);
        assert_eq!(loaded.render.format, RenderFormat::Png);
        assert_eq!(loaded.generator.model, DEFAULT_MODEL);
    }

    #[test]
    fn unknown_theme_resets_only_the_theme() {
        let (dir, _) = scratch(Some(
            "[general]\ntheme = \"sepia\"\n\n[generator]\ngemini_api_key = \"AIza-keep\"\n\n[render]\nformat = \"png\"\n",
        ));

        let (config, warning) = load_with_override(Some(dir.path().into()));
        assert_eq!(config.general.theme, ThemeMode::System);
        assert_eq!(config.generator.credential(), Some("AIza-keep"));
        assert_eq!(config.render.format, RenderFormat::Png);
        assert_eq!(warning.as_deref(), Some(LOAD_WARNING));
    }

    #[test]
    fn unknown_format_keeps_the_key() {
        let (dir, _) = scratch(Some(
            "[generator]\ngemini_api_key = \"AIza-keep\"\n\n[render]\nformat = \"gif\"\n",
        ));

        let (config, warning) = load_with_override(Some(dir.path().into()));
        assert_eq!(config.render.format, RenderFormat::Svg);
        assert_eq!(config.generator.credential(), Some("AIza-keep"));
        assert!(warning.is_some());
    }

    #[test]
    fn non_string_theme_in_flat_file_is_reset() {
        let (_dir, file) = scratch(Some("gemini_api_key = \"abc\"\ntheme = 3\n"));
        let loaded = load_from_path(&file).expect("load");
        assert_eq!(loaded.general.theme, ThemeMode::System);
        assert_eq!(loaded.generator.credential(), Some("abc"));
        assert!(has_unknown_values("gemini_api_key = \"abc\"\ntheme = 3\n"));
    }

    #[test]
    fn known_values_raise_no_warning() {
        assert!(!has_unknown_values("[general]\ntheme = \"Dark\"\n[render]\nformat = \"PNG\"\n"));
        assert!(!has_unknown_values("theme = \"light\"\n"));
        assert!(!has_unknown_values(""));
    }

    #[test]
    fn blank_key_is_not_a_credential() {
        let generator = GeneratorConfig {
            gemini_api_key: Some("   ".into()),
            ..GeneratorConfig::default()
        };
        assert_eq!(generator.credential(), None);
    }

    #[test]
    fn directory_override_is_honoured_both_ways() {
        let (dir, file) = scratch(None);
        let config = Config {
            general: GeneralConfig {
                language: Some("en-US".into()),
                theme: ThemeMode::Dark,
            },
            ..Config::default()
        };

        save_with_override(&config, Some(dir.path().into())).expect("save");
        assert!(file.exists());

        let (loaded, warning) = load_with_override(Some(dir.path().into()));
        assert_eq!((loaded, warning), (config, None));
    }

    #[test]
    fn first_run_is_silent() {
        let (dir, _) = scratch(None);
        let (config, warning) = load_with_override(Some(dir.path().into()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn corrupt_file_yields_defaults_and_warning() {
        let (dir, _) = scratch(Some("[[[ broken"));
        let (config, warning) = load_with_override(Some(dir.path().into()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn corrupt_file_is_backed_up_before_defaults_are_saved() {
        let broken = "gemini_api_key = \"AIza-keep\"\n[[[ broken";
        let (dir, file) = scratch(Some(broken));

        let (config, _) = load_with_override(Some(dir.path().into()));
        save_with_override(&config, Some(dir.path().into())).expect("save");

        let backup = fs::read_to_string(dir.path().join(BACKUP_FILE)).expect("backup");
        assert_eq!(backup, broken);
        assert!(!fs::read_to_string(file).expect("settings").contains("[[["));
    }
}
