// SPDX-License-Identifier: MPL-2.0
//! Top bar with the application title and the settings toggle.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Row, Space, Text};
use iced::{alignment::Vertical, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub settings_open: bool,
    /// The panel cannot be hidden before a key has been saved.
    pub can_toggle_settings: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    ToggleSettings,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("window-title")).size(typography::HEADING);
    let subtitle = Text::new(ctx.i18n.tr("header-subtitle")).size(typography::CAPTION);

    let toggle_label = if ctx.settings_open {
        ctx.i18n.tr("header-hide-settings")
    } else {
        ctx.i18n.tr("header-show-settings")
    };
    let toggle = button(Text::new(toggle_label))
        .on_press_maybe(ctx.can_toggle_settings.then_some(Message::ToggleSettings))
        .style(styles::button::toggle(ctx.settings_open));

    Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(title)
        .push(subtitle)
        .push(Space::new().width(Length::Fill))
        .push(toggle)
        .into()
}
