// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::diagram::DiagramSource;
use crate::download::DownloadTarget;
use crate::error::GenerationError;
use crate::ui::header;
use crate::ui::notifications;
use crate::ui::preview;
use crate::ui::prompt;
use crate::ui::settings;
use crate::ui::source_editor;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Header(header::Message),
    Settings(settings::Message),
    Prompt(prompt::Message),
    Source(source_editor::Message),
    Preview(preview::Message),
    Notification(notifications::NotificationMessage),
    ToggleErrorDetails,
    /// Outcome of the running generation attempt.
    GenerationFinished(Result<DiagramSource, GenerationError>),
    /// Debounce elapsed for the given session revision.
    PreviewRequested(u64),
    PreviewLoaded {
        revision: u64,
        result: Result<Vec<u8>, String>,
    },
    /// Result from the save dialog of a download.
    DownloadPathChosen {
        target: DownloadTarget,
        path: Option<PathBuf>,
    },
    /// File name written, or the reason it was not.
    DownloadFinished(Result<String, String>),
    /// The missing-key dialog was dismissed.
    MissingKeyDialogClosed,
    Tick(Instant),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP 47 form (e.g. `en-US`, `fr`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    pub config_dir: Option<String>,
}
