// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic panel surface used for the settings, input and preview panels.
///
/// The color is derived from the active Iced `Theme` background, with a slight
/// opacity, so panels stay readable in both light and dark modes.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.weak.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::PANEL,
        ))),
        border: Border {
            radius: radius::PANEL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Light backdrop behind the rendered diagram so transparent PNG/SVG stay legible.
pub fn preview(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::PAPER)),
        border: Border {
            color: palette::SLATE_300,
            width: border::THIN,
            radius: radius::CARD.into(),
        },
        ..Default::default()
    }
}

/// Outlined card for the failure of the last generation attempt.
pub fn error_panel(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme.extended_palette().background.weak.color)),
        border: Border {
            color: palette::DANGER,
            width: border::THIN,
            radius: radius::CARD.into(),
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}
