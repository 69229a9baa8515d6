// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the panels.
//!
//! The `App` struct owns everything: preferences, the generation session and
//! the widget states. Messages from the panels are turned into side effects
//! (config persistence, model requests, preview fetches, downloads) by the
//! handlers in `update`.

pub mod config;
mod message;
pub mod paths;
mod persistence;
pub mod session;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::download;
use crate::generator::{GeminiClient, TextGenerator};
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{self, Notification};
use crate::ui::preview::PreviewState;
use crate::ui::prompt;
use crate::ui::settings;
use crate::ui::source_editor;
use crate::ui::theming::ResolvedTheme;
use config::Config;
use iced::{time, window, Element, Subscription, Task, Theme};
use session::Session;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use update::UpdateContext;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    /// Explicit config directory, when one was given on the command line.
    config_dir: Option<PathBuf>,
    session: Session,
    settings: settings::State,
    prompt: prompt::State,
    source_editor: source_editor::State,
    preview: PreviewState,
    settings_open: bool,
    show_error_details: bool,
    notifications: notifications::Manager,
    /// Light or dark, with `System` already resolved.
    resolved_theme: ResolvedTheme,
    http: reqwest::Client,
    generator: Arc<dyn TextGenerator>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("status", &self.session.status())
            .field("has_source", &self.session.source().is_some())
            .field("settings_open", &self.settings_open)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 560;

/// Interval of the notification auto-dismiss tick.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 wants an `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads preferences and wires the Gemini client.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let http = download::build_http_client().unwrap_or_else(|error| {
            tracing::error!("falling back to default HTTP client: {error}");
            reqwest::Client::new()
        });
        let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(http.clone()));
        (Self::with_generator(flags, http, generator), Task::none())
    }

    fn with_generator(
        flags: Flags,
        http: reqwest::Client,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, config_warning) = config::load_with_override(config_dir.clone());
        let i18n = I18n::new(flags.lang, &config);

        let mut notifications = notifications::Manager::new();
        if let Some(key) = config_warning {
            notifications.push(Notification::warning(key));
        }

        let has_credential = config.generator.credential().is_some();
        tracing::info!(
            locale = %i18n.current_locale(),
            format = %config.render.format,
            has_credential,
            "starting"
        );

        Self {
            settings: settings::State::new(config.generator.credential()),
            session: Session::new(config.render.format),
            resolved_theme: config.general.theme.resolve(),
            settings_open: !has_credential,
            i18n,
            config,
            config_dir,
            prompt: prompt::State::default(),
            source_editor: source_editor::State::default(),
            preview: PreviewState::default(),
            show_error_details: false,
            notifications,
            http,
            generator,
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.resolved_theme.to_iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.notifications.has_notifications() {
            time::every(TICK_INTERVAL).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = UpdateContext {
            i18n: &mut self.i18n,
            config: &mut self.config,
            config_dir: self.config_dir.clone(),
            session: &mut self.session,
            settings: &mut self.settings,
            prompt: &mut self.prompt,
            source_editor: &mut self.source_editor,
            preview: &mut self.preview,
            settings_open: &mut self.settings_open,
            show_error_details: &mut self.show_error_details,
            notifications: &mut self.notifications,
            resolved_theme: &mut self.resolved_theme,
            http: &self.http,
            generator: &self.generator,
        };

        match message {
            Message::Header(msg) => update::handle_header_message(&mut ctx, msg),
            Message::Settings(msg) => update::handle_settings_message(&mut ctx, msg),
            Message::Prompt(msg) => update::handle_prompt_message(&mut ctx, msg),
            Message::Source(msg) => update::handle_source_message(&mut ctx, msg),
            Message::Preview(msg) => update::handle_preview_message(&mut ctx, msg),
            Message::Notification(msg) => {
                ctx.notifications.handle_message(&msg);
                Task::none()
            }
            Message::ToggleErrorDetails => {
                *ctx.show_error_details = !*ctx.show_error_details;
                Task::none()
            }
            Message::GenerationFinished(result) => {
                update::handle_generation_finished(&mut ctx, result)
            }
            Message::PreviewRequested(revision) => {
                update::handle_preview_requested(&mut ctx, revision)
            }
            Message::PreviewLoaded { revision, result } => {
                update::handle_preview_loaded(&mut ctx, revision, result)
            }
            Message::DownloadPathChosen { target, path } => {
                update::handle_download_path_chosen(&mut ctx, target, path)
            }
            Message::DownloadFinished(result) => update::handle_download_finished(&mut ctx, result),
            Message::MissingKeyDialogClosed => Task::none(),
            Message::Tick(_) => {
                ctx.notifications.tick();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            session: &self.session,
            settings: &self.settings,
            prompt: &self.prompt,
            source_editor: &self.source_editor,
            preview: &self.preview,
            notifications: &self.notifications,
            theme_mode: self.config.general.theme,
            server_url: &self.config.render.server_url,
            settings_open: self.settings_open,
            has_credential: self.config.generator.credential().is_some(),
            show_error_details: self.show_error_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::RequestStatus;
    use crate::diagram::{DiagramSource, RenderFormat};
    use crate::error::GenerationError;
    use crate::generator::testing::ScriptedGenerator;
    use crate::ui::header;
    use crate::ui::preview;
    use crate::ui::theming::ThemeMode;
    use std::time::Instant;
    use tempfile::TempDir;

    const SAMPLE: &str = "@startuml\nUser --> Post\n@enduml";

    /// Writes a settings file with an explicit theme so no system query runs.
    fn config_dir(key: Option<&str>) -> TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut cfg = Config::default();
        cfg.general.theme = ThemeMode::Dark;
        cfg.generator.gemini_api_key = key.map(str::to_string);
        config::save_with_override(&cfg, Some(dir.path().to_path_buf())).expect("seed config");
        dir
    }

    fn app_in(dir: &TempDir) -> App {
        App::with_generator(
            Flags {
                lang: Some("en-US".into()),
                config_dir: Some(dir.path().to_string_lossy().into_owned()),
            },
            reqwest::Client::new(),
            Arc::new(ScriptedGenerator::answering(&[SAMPLE])),
        )
    }

    fn reload(dir: &TempDir) -> Config {
        config::load_with_override(Some(dir.path().to_path_buf())).0
    }

    #[test]
    fn settings_open_until_a_key_exists() {
        let dir = config_dir(None);
        let mut app = app_in(&dir);
        assert!(app.settings_open);

        let _ = app.update(Message::Header(header::Message::ToggleSettings));
        assert!(app.settings_open, "panel cannot be hidden without a key");

        let keyed = config_dir(Some("AIza-test"));
        let mut app = app_in(&keyed);
        assert!(!app.settings_open);
        let _ = app.update(Message::Header(header::Message::ToggleSettings));
        assert!(app.settings_open);
    }

    #[test]
    fn saving_key_persists_and_closes_panel() {
        let dir = config_dir(None);
        let mut app = app_in(&dir);

        let _ = app.update(Message::Settings(settings::Message::KeyDraftChanged(
            " AIza-new ".into(),
        )));
        let _ = app.update(Message::Settings(settings::Message::SaveKey));

        assert!(!app.settings_open);
        assert_eq!(reload(&dir).generator.credential(), Some("AIza-new"));
    }

    #[test]
    fn preference_changes_are_written_immediately() {
        let dir = config_dir(Some("AIza-test"));
        let mut app = app_in(&dir);

        let _ = app.update(Message::Settings(settings::Message::FormatSelected(
            RenderFormat::Png,
        )));
        let _ = app.update(Message::Settings(settings::Message::ThemeSelected(
            ThemeMode::Light,
        )));

        assert_eq!(app.session.format(), RenderFormat::Png);
        assert_eq!(app.theme(), Theme::Light);
        let saved = reload(&dir);
        assert_eq!(saved.render.format, RenderFormat::Png);
        assert_eq!(saved.general.theme, ThemeMode::Light);
    }

    #[test]
    fn submit_without_key_changes_nothing() {
        let dir = config_dir(None);
        let mut app = app_in(&dir);
        app.session.set_input("a blog with users and posts");

        let _ = app.update(Message::Prompt(prompt::Message::Submit));

        assert_eq!(app.session.status(), RequestStatus::Idle);
        assert!(app.session.source().is_none());
        assert!(app.settings_open);
    }

    #[test]
    fn generation_result_shows_source_and_preview() {
        let dir = config_dir(Some("AIza-test"));
        let mut app = app_in(&dir);
        app.session.set_input("a blog with users and posts");

        let _ = app.update(Message::Prompt(prompt::Message::Submit));
        assert!(app.session.is_loading());

        let _ = app.update(Message::GenerationFinished(Ok(DiagramSource::edited(SAMPLE))));
        assert_eq!(app.session.status(), RequestStatus::Done);
        assert!(matches!(app.preview, PreviewState::Loading));
        assert!(app
            .session
            .diagram_url(&app.config.render.server_url)
            .is_some());
    }

    #[test]
    fn failed_generation_shows_error_without_preview() {
        let dir = config_dir(Some("AIza-test"));
        let mut app = app_in(&dir);
        app.session.set_input("anything");

        let _ = app.update(Message::Prompt(prompt::Message::Submit));
        let _ = app.update(Message::GenerationFinished(Err(
            GenerationError::MalformedResponse,
        )));

        assert_eq!(app.session.status(), RequestStatus::Error);
        assert!(matches!(app.preview, PreviewState::Empty));
        let _ = app.view();
    }

    #[test]
    fn stale_preview_is_dropped() {
        let dir = config_dir(Some("AIza-test"));
        let mut app = app_in(&dir);
        app.session.set_input("anything");
        let _ = app.update(Message::Prompt(prompt::Message::Submit));
        let _ = app.update(Message::GenerationFinished(Ok(DiagramSource::edited(SAMPLE))));
        let stale = app.session.revision();

        let _ = app.update(Message::Settings(settings::Message::FormatSelected(
            RenderFormat::Png,
        )));
        let _ = app.update(Message::PreviewLoaded {
            revision: stale,
            result: Ok(b"<svg/>".to_vec()),
        });
        assert!(matches!(app.preview, PreviewState::Loading));

        let current = app.session.revision();
        let _ = app.update(Message::PreviewLoaded {
            revision: current,
            result: Err("HTTP status: 400 Bad Request".into()),
        });
        assert!(matches!(app.preview, PreviewState::Failed(_)));
    }

    #[test]
    fn download_outcome_raises_toast() {
        let dir = config_dir(Some("AIza-test"));
        let mut app = app_in(&dir);

        let _ = app.update(Message::DownloadFinished(Ok("diagram.svg".into())));
        let _ = app.update(Message::DownloadFinished(Err("disk full".into())));
        assert_eq!(app.notifications.visible_count(), 2);

        let _ = app.update(Message::Tick(Instant::now()));
        let _ = app.update(Message::Preview(preview::Message::DownloadImage));
    }

    #[test]
    fn corrupt_config_warns_and_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("settings.toml"), "[general\ntheme = 3").expect("write");
        let app = App::with_generator(
            Flags {
                lang: Some("en-US".into()),
                config_dir: Some(dir.path().to_string_lossy().into_owned()),
            },
            reqwest::Client::new(),
            Arc::new(ScriptedGenerator::answering(&[SAMPLE])),
        );
        assert!(app.notifications.has_notifications());
        assert!(app.settings_open);
    }

    #[test]
    fn unknown_theme_does_not_cost_the_saved_key() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join("settings.toml"),
            "[general]\ntheme = \"sepia\"\n\n[generator]\ngemini_api_key = \"AIza-keep\"\n\n[render]\nformat = \"svg\"\n",
        )
        .expect("write");
        let mut app = app_in(&dir);
        assert!(app.notifications.has_notifications());
        assert!(!app.settings_open);

        let _ = app.update(Message::Settings(settings::Message::FormatSelected(
            RenderFormat::Png,
        )));

        let saved = reload(&dir);
        assert_eq!(saved.generator.credential(), Some("AIza-keep"));
        assert_eq!(saved.render.format, RenderFormat::Png);
    }

    #[test]
    fn title_is_localized_app_name() {
        let dir = config_dir(None);
        assert_eq!(app_in(&dir).title(), "IcedUml");
    }
}
