// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application update loop.
//!
//! Each handler takes an [`UpdateContext`] with mutable access to the state it
//! needs and returns the follow-up `Task`.

use super::config::{Config, PREVIEW_DEBOUNCE_MS};
use super::persistence;
use super::session::Session;
use super::Message;
use crate::download::{self, DownloadTarget};
use crate::error::GenerationError;
use crate::generator::{self, TextGenerator};
use crate::i18n::fluent::I18n;
use crate::ui::header;
use crate::ui::notifications::{self, Notification};
use crate::ui::preview::{self, PreviewState, Rendered};
use crate::ui::prompt;
use crate::ui::settings;
use crate::ui::source_editor;
use crate::ui::theming::ResolvedTheme;
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Mutable view over the application state used by the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub config: &'a mut Config,
    pub config_dir: Option<PathBuf>,
    pub session: &'a mut Session,
    pub settings: &'a mut settings::State,
    pub prompt: &'a mut prompt::State,
    pub source_editor: &'a mut source_editor::State,
    pub preview: &'a mut PreviewState,
    pub settings_open: &'a mut bool,
    pub show_error_details: &'a mut bool,
    pub notifications: &'a mut notifications::Manager,
    pub resolved_theme: &'a mut ResolvedTheme,
    pub http: &'a reqwest::Client,
    pub generator: &'a Arc<dyn TextGenerator>,
}

impl UpdateContext<'_> {
    fn persist(&mut self) {
        persistence::persist_config(self.config, self.config_dir.clone(), self.notifications);
    }
}

pub fn handle_header_message(ctx: &mut UpdateContext<'_>, message: header::Message) -> Task<Message> {
    match message {
        header::Message::ToggleSettings => {
            // Stays open until a key exists.
            if ctx.config.generator.credential().is_some() {
                *ctx.settings_open = !*ctx.settings_open;
            }
        }
    }
    Task::none()
}

pub fn handle_settings_message(
    ctx: &mut UpdateContext<'_>,
    message: settings::Message,
) -> Task<Message> {
    match ctx.settings.update(message) {
        settings::Event::None => Task::none(),
        settings::Event::KeySaved(key) => {
            persistence::store_credential(ctx.config, key);
            ctx.persist();
            *ctx.settings_open = false;
            tracing::info!("API key saved");
            Task::none()
        }
        settings::Event::ThemeSelected(mode) => {
            *ctx.resolved_theme = persistence::apply_theme_change(ctx.config, mode);
            ctx.persist();
            Task::none()
        }
        settings::Event::FormatSelected(format) => {
            persistence::apply_format_change(ctx.config, format);
            ctx.persist();
            ctx.session.set_format(format);
            schedule_preview(ctx)
        }
        settings::Event::LanguageSelected(locale) => {
            persistence::apply_language_change(ctx.i18n, ctx.config, locale);
            ctx.persist();
            Task::none()
        }
    }
}

pub fn handle_prompt_message(ctx: &mut UpdateContext<'_>, message: prompt::Message) -> Task<Message> {
    match ctx.prompt.update(message) {
        prompt::Event::None => Task::none(),
        prompt::Event::InputChanged(text) => {
            ctx.session.set_input(text);
            Task::none()
        }
        prompt::Event::Submit => handle_submit(ctx),
    }
}

/// Starts a generation attempt, or explains why it cannot start.
pub fn handle_submit(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let model = ctx.config.generator.model.clone();
    match ctx
        .session
        .begin_generation(ctx.config.generator.credential(), &model)
    {
        Ok(request) => {
            *ctx.preview = PreviewState::Empty;
            *ctx.show_error_details = false;
            Task::perform(
                generator::generate(Arc::clone(ctx.generator), request),
                Message::GenerationFinished,
            )
        }
        Err(GenerationError::MissingCredential) => {
            *ctx.settings_open = true;
            show_missing_key_dialog(ctx.i18n)
        }
        Err(error) => {
            tracing::debug!("submit rejected: {error}");
            Task::none()
        }
    }
}

pub fn handle_generation_finished(
    ctx: &mut UpdateContext<'_>,
    result: Result<crate::diagram::DiagramSource, GenerationError>,
) -> Task<Message> {
    if let Err(error) = &result {
        tracing::warn!("generation failed: {error}");
    }
    ctx.session.finish_generation(result);
    if let Some(source) = ctx.session.source() {
        ctx.source_editor.load(source.as_str());
    }
    schedule_preview(ctx)
}

pub fn handle_source_message(
    ctx: &mut UpdateContext<'_>,
    message: source_editor::Message,
) -> Task<Message> {
    match ctx.source_editor.update(message) {
        source_editor::Event::None => Task::none(),
        source_editor::Event::SourceEdited(text) => {
            ctx.session.edit_source(text);
            schedule_preview(ctx)
        }
    }
}

/// Waits for the input to settle before fetching the preview of the current
/// revision.
fn schedule_preview(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.session.diagram_url(&ctx.config.render.server_url).is_none() {
        *ctx.preview = PreviewState::Empty;
        return Task::none();
    }

    *ctx.preview = PreviewState::Loading;
    let revision = ctx.session.revision();
    Task::perform(
        async move {
            tokio::time::sleep(Duration::from_millis(PREVIEW_DEBOUNCE_MS)).await;
            revision
        },
        Message::PreviewRequested,
    )
}

pub fn handle_preview_requested(ctx: &mut UpdateContext<'_>, revision: u64) -> Task<Message> {
    if revision != ctx.session.revision() {
        return Task::none();
    }
    let Some(url) = ctx.session.diagram_url(&ctx.config.render.server_url) else {
        return Task::none();
    };

    tracing::debug!(url = url.as_str(), "fetching preview");
    let client = ctx.http.clone();
    Task::perform(
        async move {
            download::fetch_bytes(&client, url.as_str())
                .await
                .map_err(|error| error.to_string())
        },
        move |result| Message::PreviewLoaded { revision, result },
    )
}

pub fn handle_preview_loaded(
    ctx: &mut UpdateContext<'_>,
    revision: u64,
    result: Result<Vec<u8>, String>,
) -> Task<Message> {
    if revision != ctx.session.revision() {
        tracing::debug!(revision, "dropping stale preview");
        return Task::none();
    }

    *ctx.preview = match result {
        Ok(bytes) => PreviewState::Ready(Rendered::from_bytes(ctx.session.format(), bytes)),
        Err(reason) => {
            tracing::warn!("preview failed: {reason}");
            PreviewState::Failed(reason)
        }
    };
    Task::none()
}

pub fn handle_preview_message(ctx: &mut UpdateContext<'_>, message: preview::Message) -> Task<Message> {
    let target = match message {
        preview::Message::DownloadImage => ctx
            .session
            .diagram_url(&ctx.config.render.server_url)
            .map(|url| DownloadTarget::image(&url)),
        preview::Message::DownloadSource => ctx.session.source().map(DownloadTarget::source),
    };

    match target {
        Some(target) => open_save_dialog(target),
        None => Task::none(),
    }
}

fn open_save_dialog(target: DownloadTarget) -> Task<Message> {
    Task::perform(
        async move {
            let path = rfd::AsyncFileDialog::new()
                .set_file_name(&target.file_name)
                .save_file()
                .await
                .map(|h| h.path().to_path_buf());
            (target, path)
        },
        |(target, path)| Message::DownloadPathChosen { target, path },
    )
}

pub fn handle_download_path_chosen(
    ctx: &mut UpdateContext<'_>,
    target: DownloadTarget,
    path: Option<PathBuf>,
) -> Task<Message> {
    let Some(path) = path else {
        return Task::none();
    };

    let client = ctx.http.clone();
    Task::perform(
        async move {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| target.file_name.clone());
            download::save(&client, &target, &path)
                .await
                .map(|()| file_name)
                .map_err(|error| error.to_string())
        },
        Message::DownloadFinished,
    )
}

pub fn handle_download_finished(
    ctx: &mut UpdateContext<'_>,
    result: Result<String, String>,
) -> Task<Message> {
    let notification = match result {
        Ok(file) => Notification::success("notification-download-saved").with_arg("file", file),
        Err(error) => Notification::error("notification-download-failed").with_arg("error", error),
    };
    ctx.notifications.push(notification);
    Task::none()
}

/// Blocking prompt shown when Generate is pressed without a key.
fn show_missing_key_dialog(i18n: &I18n) -> Task<Message> {
    let title = i18n.tr("missing-key-dialog-title");
    let body = i18n.tr("missing-key-dialog-body");
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Warning)
                .set_title(title)
                .set_description(body)
                .set_buttons(rfd::MessageButtons::Ok)
                .show()
                .await
        },
        |_| Message::MissingKeyDialogClosed,
    )
}
