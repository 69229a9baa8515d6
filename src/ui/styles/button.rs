// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::button;
use iced::{Background, Border, Color, Shadow, Theme};

fn filled(background: Color, text_color: Color, outline: Color, shadow: Shadow) -> button::Style {
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: outline,
            width: border::THIN,
            radius: radius::CONTROL.into(),
        },
        shadow,
        snap: true,
    }
}

fn disabled(theme: &Theme) -> button::Style {
    let background = if theme.extended_palette().is_dark {
        palette::SLATE_700
    } else {
        palette::SLATE_100
    };
    let muted = Color {
        a: opacity::DISABLED,
        ..palette::SLATE_500
    };
    filled(background, muted, muted, shadow::NONE)
}

/// Main call to action (Generate, Save) and the selected entry of a toggle group.
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active => {
            filled(palette::ACCENT, palette::PAPER, palette::ACCENT_DARK, shadow::NONE)
        }
        button::Status::Hovered => {
            filled(palette::ACCENT_LIGHT, palette::PAPER, palette::ACCENT, shadow::RAISED)
        }
        button::Status::Pressed => filled(
            palette::ACCENT_DARK,
            palette::PAPER,
            palette::ACCENT_DARK,
            shadow::NONE,
        ),
        button::Status::Disabled => disabled(theme),
    }
}

/// Secondary actions and unselected entries of a toggle group.
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let (background, text_color, hover) = if theme.extended_palette().is_dark {
        (palette::SLATE_700, palette::PAPER, palette::SLATE_500)
    } else {
        (palette::SLATE_100, palette::SLATE_900, palette::SLATE_300)
    };

    match status {
        button::Status::Active | button::Status::Pressed => {
            filled(background, text_color, palette::SLATE_500, shadow::NONE)
        }
        button::Status::Hovered => filled(hover, text_color, palette::ACCENT, shadow::RAISED),
        button::Status::Disabled => disabled(theme),
    }
}

/// Picks [`primary`] or [`secondary`] for toggle groups.
pub fn toggle(selected: bool) -> fn(&Theme, button::Status) -> button::Style {
    if selected {
        primary
    } else {
        secondary
    }
}

/// Borderless button, used for the toast dismiss cross and error details.
pub fn ghost(theme: &Theme, status: button::Status) -> button::Style {
    let tint = match status {
        button::Status::Hovered => Some(opacity::HOVER_TINT),
        button::Status::Pressed => Some(opacity::DISABLED),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background: tint.map(|a| Background::Color(Color { a, ..palette::SLATE_500 })),
        text_color: theme.extended_palette().background.base.text,
        border: Border {
            radius: radius::CONTROL.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_uses_accent() {
        let style = primary(&Theme::Dark, button::Status::Active);
        assert_eq!(style.background, Some(Background::Color(palette::ACCENT)));
        assert_eq!(style.text_color, palette::PAPER);
    }

    #[test]
    fn disabled_text_is_muted() {
        let style = primary(&Theme::Light, button::Status::Disabled);
        assert_eq!(style.text_color.a, opacity::DISABLED);
    }

    #[test]
    fn secondary_follows_theme() {
        let light = secondary(&Theme::Light, button::Status::Active);
        let dark = secondary(&Theme::Dark, button::Status::Active);
        assert_ne!(light.background, dark.background);
    }

    #[test]
    fn toggle_highlights_selection() {
        let selected = toggle(true)(&Theme::Dark, button::Status::Active);
        let other = toggle(false)(&Theme::Dark, button::Status::Active);
        assert_eq!(selected.background, Some(Background::Color(palette::ACCENT)));
        assert_ne!(selected.background, other.background);
    }

    #[test]
    fn ghost_is_transparent_until_hovered() {
        assert!(ghost(&Theme::Dark, button::Status::Active).background.is_none());
        assert!(ghost(&Theme::Dark, button::Status::Hovered).background.is_some());
    }
}
