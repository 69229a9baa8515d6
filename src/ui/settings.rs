// SPDX-License-Identifier: MPL-2.0
//! Settings panel: API key, theme, render format and language.
//!
//! The panel only edits a draft of the key; nothing is stored until the user
//! presses Save (or Enter in the key field). Theme, format and language are
//! applied as soon as they are picked, and the parent persists them.

use crate::diagram::RenderFormat;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{button, container, text_input, Column, Row, Text};
use iced::{alignment::Vertical, Element, Length};
use unic_langid::LanguageIdentifier;

/// Contextual data needed to render the panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub theme_mode: ThemeMode,
    pub format: RenderFormat,
    pub has_credential: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyDraftChanged(String),
    SaveKey,
    ThemeSelected(ThemeMode),
    FormatSelected(RenderFormat),
    LanguageSelected(LanguageIdentifier),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// The trimmed key the user asked to store.
    KeySaved(String),
    ThemeSelected(ThemeMode),
    FormatSelected(RenderFormat),
    LanguageSelected(LanguageIdentifier),
}

#[derive(Debug, Clone, Default)]
pub struct State {
    key_draft: String,
}

impl State {
    /// Pre-fills the key field with the stored value.
    #[must_use]
    pub fn new(stored_key: Option<&str>) -> Self {
        Self {
            key_draft: stored_key.unwrap_or_default().to_string(),
        }
    }

    #[must_use]
    pub fn key_draft(&self) -> &str {
        &self.key_draft
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::KeyDraftChanged(value) => {
                self.key_draft = value;
                Event::None
            }
            Message::SaveKey => {
                let key = self.key_draft.trim();
                if key.is_empty() {
                    Event::None
                } else {
                    Event::KeySaved(key.to_string())
                }
            }
            Message::ThemeSelected(mode) => Event::ThemeSelected(mode),
            Message::FormatSelected(format) => Event::FormatSelected(format),
            Message::LanguageSelected(locale) => Event::LanguageSelected(locale),
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;

        let title = Text::new(i18n.tr("settings-title")).size(typography::SECTION);

        let key_hint = if ctx.has_credential {
            i18n.tr("settings-api-key-saved")
        } else {
            i18n.tr("settings-api-key-hint")
        };

        let key_input = text_input(&i18n.tr("settings-api-key-placeholder"), &self.key_draft)
            .on_input(Message::KeyDraftChanged)
            .on_submit(Message::SaveKey)
            .secure(true)
            .padding(spacing::XS)
            .width(Length::Fill);

        let save_button = button(Text::new(i18n.tr("settings-api-key-save")))
            .on_press_maybe((!self.key_draft.trim().is_empty()).then_some(Message::SaveKey))
            .style(styles::button::primary);

        let key_section = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("settings-api-key-label")).size(typography::BODY))
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .align_y(Vertical::Center)
                    .push(key_input)
                    .push(save_button),
            )
            .push(Text::new(key_hint).size(typography::CAPTION));

        let theme_row = ThemeMode::ALL.iter().fold(
            Row::new().spacing(spacing::XS),
            |row, mode| {
                row.push(
                    button(Text::new(i18n.tr(mode.i18n_key())))
                        .on_press(Message::ThemeSelected(*mode))
                        .style(styles::button::toggle(*mode == ctx.theme_mode)),
                )
            },
        );

        let format_row = RenderFormat::ALL.iter().fold(
            Row::new().spacing(spacing::XS),
            |row, format| {
                row.push(
                    button(Text::new(format.to_string()))
                        .on_press(Message::FormatSelected(*format))
                        .style(styles::button::toggle(*format == ctx.format)),
                )
            },
        );

        let language_row = i18n.available_locales.iter().fold(
            Row::new().spacing(spacing::XS),
            |row, locale| {
                row.push(
                    button(Text::new(language_label(i18n, locale)))
                        .on_press(Message::LanguageSelected(locale.clone()))
                        .style(styles::button::toggle(locale == i18n.current_locale())),
                )
            },
        );

        let content = Column::new()
            .spacing(spacing::MD)
            .max_width(sizing::FORM_MAX_WIDTH)
            .push(title)
            .push(key_section)
            .push(labeled(i18n.tr("settings-theme-label"), theme_row))
            .push(labeled(i18n.tr("settings-format-label"), format_row))
            .push(labeled(i18n.tr("settings-language-label"), language_row));

        container(content)
            .width(Length::Fill)
            .padding(spacing::MD)
            .style(styles::container::panel)
            .into()
    }
}

fn labeled<'a>(label: String, row: Row<'a, Message>) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(label).size(typography::BODY))
        .push(row)
        .into()
}

/// "Français (fr)" when a translated name exists, the bare code otherwise.
fn language_label(i18n: &I18n, locale: &LanguageIdentifier) -> String {
    let code = locale.to_string();
    let translated = i18n.tr(&format!("language-name-{code}"));
    if translated.starts_with("MISSING:") {
        code
    } else {
        format!("{translated} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_emits_trimmed_key() {
        let mut state = State::default();
        assert_eq!(
            state.update(Message::KeyDraftChanged("  AIza-123 ".into())),
            Event::None
        );
        assert_eq!(state.update(Message::SaveKey), Event::KeySaved("AIza-123".into()));
    }

    #[test]
    fn blank_key_is_not_saved() {
        let mut state = State::default();
        state.update(Message::KeyDraftChanged("   ".into()));
        assert_eq!(state.update(Message::SaveKey), Event::None);
    }

    #[test]
    fn stored_key_prefills_draft() {
        let state = State::new(Some("stored"));
        assert_eq!(state.key_draft(), "stored");
    }

    #[test]
    fn preferences_are_forwarded() {
        let mut state = State::default();
        assert_eq!(
            state.update(Message::ThemeSelected(ThemeMode::Dark)),
            Event::ThemeSelected(ThemeMode::Dark)
        );
        assert_eq!(
            state.update(Message::FormatSelected(RenderFormat::Png)),
            Event::FormatSelected(RenderFormat::Png)
        );
    }

    #[test]
    fn language_label_uses_translated_name() {
        let i18n = I18n::new(Some("en-US".into()), &crate::app::config::Config::default());
        let fr: LanguageIdentifier = "fr".parse().unwrap();
        assert_eq!(language_label(&i18n, &fr), "French (fr)");
    }

    #[test]
    fn view_renders() {
        let i18n = I18n::default();
        let state = State::default();
        let _element = state.view(ViewContext {
            i18n: &i18n,
            theme_mode: ThemeMode::System,
            format: RenderFormat::Svg,
            has_credential: false,
        });
    }
}
