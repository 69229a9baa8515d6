// SPDX-License-Identifier: MPL-2.0
//! Rendering of the toast stack.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, radius, shadow, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};

/// All visible toasts, stacked in the bottom-right corner. Meant to be layered
/// over the main content.
pub fn overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = manager
        .visible()
        .map(|notification| card(notification, i18n))
        .collect();
    let stack = Column::with_children(cards)
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Right);

    Container::new(stack)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::MD)
        .into()
}

fn card<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
    let accent = notification.severity().color();

    let glyph = Text::new(notification.severity().glyph())
        .size(typography::SECTION)
        .style(move |_theme: &Theme| text::Style {
            color: Some(accent),
        });
    let message = Text::new(localized_message(notification, i18n)).size(typography::BODY);
    let body = Container::new(message).width(Length::Fill);
    let close = button(Text::new("×").size(typography::INPUT))
        .on_press(Message::Dismiss(notification.id()))
        .padding([0.0, spacing::XS])
        .style(styles::button::ghost);

    let row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(glyph)
        .push(body)
        .push(close);

    Container::new(row)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| card_style(theme, accent))
        .into()
}

/// The notification text in the current locale with its arguments filled in.
fn localized_message(notification: &Notification, i18n: &I18n) -> String {
    let args: Vec<(&str, &str)> = notification
        .message_args()
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    i18n.tr_with_args(notification.message_key(), &args)
}

fn card_style(theme: &Theme, accent: Color) -> container::Style {
    let surface = theme.extended_palette().background.base;
    container::Style {
        background: Some(Background::Color(surface.color)),
        text_color: Some(surface.text),
        border: Border {
            color: accent,
            width: border::THICK,
            radius: radius::CARD.into(),
        },
        shadow: shadow::FLOATING,
        ..container::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::ui::design_tokens::palette;

    #[test]
    fn card_border_takes_severity_color() {
        let style = card_style(&Theme::Light, palette::CAUTION);
        assert_eq!(style.border.color, palette::CAUTION);
        assert_eq!(style.border.width, border::THICK);
    }

    #[test]
    fn message_arguments_are_substituted() {
        let i18n = I18n::new(Some("en-US".into()), &Config::default());
        let saved = Notification::success("notification-download-saved").with_arg("file", "uml.png");
        assert_eq!(localized_message(&saved, &i18n), "Saved uml.png");

        let plain = Notification::error("notification-config-save-error");
        assert!(!localized_message(&plain, &i18n).starts_with("MISSING"));
    }

    #[test]
    fn overlay_renders_with_and_without_toasts() {
        let i18n = I18n::default();
        let mut manager = Manager::new();
        drop(overlay(&manager, &i18n));

        manager.push(Notification::warning("notification-config-load-error"));
        drop(overlay(&manager, &i18n));
    }
}
