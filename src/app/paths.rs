// SPDX-License-Identifier: MPL-2.0
//! Location of the settings directory.
//!
//! Candidates, first match wins:
//! 1. an explicit override passed by the caller (tests)
//! 2. `--config-dir` on the command line, recorded by [`init_cli_overrides`]
//! 3. the `ICED_UML_CONFIG_DIR` environment variable, when non-empty
//! 4. `IcedUml` under the platform config directory
//!
//! ```ignore
//! paths::init_cli_overrides(flags.config_dir);
//! let dir = paths::get_app_config_dir();
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

/// Folder created under the platform config directory.
const APP_NAME: &str = "IcedUml";

/// Environment variable naming the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_UML_CONFIG_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--config-dir` argument. Only the first call counts.
pub fn init_cli_overrides(config_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        tracing::warn!("config dir override already initialized");
    }
}

/// Settings directory, e.g. `~/.config/IcedUml` on Linux,
/// `~/Library/Application Support/IcedUml` on macOS or
/// `%APPDATA%\IcedUml` on Windows.
///
/// `None` only when the platform has no config directory at all.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Same as [`get_app_config_dir`], with `override_path` taking precedence.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        CLI_CONFIG_DIR.get().cloned().flatten(),
        std::env::var(ENV_CONFIG_DIR).ok(),
        dirs::config_dir(),
    )
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: Option<PathBuf>,
    env: Option<String>,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    override_path
        .or(cli)
        .or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
        .or_else(|| platform.map(|base| base.join(APP_NAME)))
}
