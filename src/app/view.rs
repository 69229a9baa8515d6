// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The window is a single scrollable column of panels; toasts float above it.

use super::session::{RequestStatus, Session};
use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::components::error_panel::ErrorPanel;
use crate::ui::design_tokens::spacing;
use crate::ui::header;
use crate::ui::notifications::{self, toast};
use crate::ui::preview::{self, PreviewState};
use crate::ui::prompt;
use crate::ui::settings;
use crate::ui::source_editor;
use crate::ui::theming::ThemeMode;
use iced::widget::{scrollable, stack, Column, Container};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a Session,
    pub settings: &'a settings::State,
    pub prompt: &'a prompt::State,
    pub source_editor: &'a source_editor::State,
    pub preview: &'a PreviewState,
    pub notifications: &'a notifications::Manager,
    pub theme_mode: ThemeMode,
    pub server_url: &'a str,
    pub settings_open: bool,
    pub has_credential: bool,
    pub show_error_details: bool,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let session = ctx.session;

    let mut column = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(
            header::view(header::ViewContext {
                i18n,
                settings_open: ctx.settings_open,
                can_toggle_settings: ctx.has_credential,
            })
            .map(Message::Header),
        );

    if ctx.settings_open {
        column = column.push(
            ctx.settings
                .view(settings::ViewContext {
                    i18n,
                    theme_mode: ctx.theme_mode,
                    format: session.format(),
                    has_credential: ctx.has_credential,
                })
                .map(Message::Settings),
        );
    }

    column = column.push(
        ctx.prompt
            .view(prompt::ViewContext {
                i18n,
                can_submit: session.can_submit(),
                loading: session.is_loading(),
            })
            .map(Message::Prompt),
    );

    if session.status() == RequestStatus::Error {
        if let Some(error) = session.error() {
            let panel = ErrorPanel::new(i18n.tr(error.i18n_key()), error.user_message())
                .details(error.details())
                .expanded(ctx.show_error_details)
                .on_toggle(Message::ToggleErrorDetails)
                .toggle_labels(i18n.tr("error-details-show"), i18n.tr("error-details-hide"));
            column = column.push(panel.view());
        }
    }

    if session.source().is_some() {
        column = column.push(
            ctx.source_editor
                .view(source_editor::ViewContext { i18n })
                .map(Message::Source),
        );
    }

    if let Some(url) = session.diagram_url(ctx.server_url) {
        column = column.push(
            preview::view(preview::ViewContext {
                i18n,
                url,
                preview: ctx.preview,
            })
            .map(Message::Preview),
        );
    }

    let content = Container::new(scrollable(column.width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill);

    if ctx.notifications.has_notifications() {
        stack![
            content,
            toast::overlay(ctx.notifications, i18n).map(Message::Notification)
        ]
        .into()
    } else {
        content.into()
    }
}
