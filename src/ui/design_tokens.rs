// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Visual constants shared by every panel. Widgets never hard-code colors or
sizes; they pick a token from one of the groups below.

- **Palette**: base and semantic colors
- **Opacity**: alpha levels for tints and surfaces
- **Spacing**: 4px-based spacing scale
- **Sizing**: fixed component dimensions
- **Typography**: font sizes
- **Border**, **Radius**, **Shadow**: outlines and elevation

```
use iced_uml::ui::design_tokens::{opacity, palette, spacing};
use iced::Color;

let hover = Color {
    a: opacity::HOVER_TINT,
    ..palette::SLATE_500
};
assert!(spacing::MD > spacing::SM);
```
"#]

use iced::Color;

pub mod palette {
    use super::Color;

    pub const INK: Color = Color::from_rgb(0.06, 0.07, 0.09);
    pub const PAPER: Color = Color::WHITE;

    // Neutral slate ramp, darkest first.
    pub const SLATE_900: Color = Color::from_rgb(0.11, 0.12, 0.15);
    pub const SLATE_700: Color = Color::from_rgb(0.27, 0.29, 0.34);
    pub const SLATE_500: Color = Color::from_rgb(0.45, 0.47, 0.52);
    pub const SLATE_300: Color = Color::from_rgb(0.74, 0.76, 0.80);
    pub const SLATE_100: Color = Color::from_rgb(0.90, 0.91, 0.93);

    // Indigo accent used for primary actions and selection.
    pub const ACCENT_LIGHT: Color = Color::from_rgb(0.51, 0.55, 0.97);
    pub const ACCENT: Color = Color::from_rgb(0.39, 0.40, 0.95);
    pub const ACCENT_DARK: Color = Color::from_rgb(0.31, 0.27, 0.90);

    pub const DANGER: Color = Color::from_rgb(0.86, 0.15, 0.15);
    pub const CAUTION: Color = Color::from_rgb(0.92, 0.58, 0.03);
    pub const POSITIVE: Color = Color::from_rgb(0.09, 0.64, 0.29);
}

pub mod opacity {
    /// Background of hovered ghost buttons.
    pub const HOVER_TINT: f32 = 0.15;
    /// Text and fills of disabled controls.
    pub const DISABLED: f32 = 0.45;
    pub const PANEL: f32 = 0.92;
    pub const FULL: f32 = 1.0;
}

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

pub mod sizing {
    pub const TOAST_WIDTH: f32 = 340.0;

    /// Height of the description and source editors.
    pub const EDITOR_HEIGHT: f32 = 160.0;

    pub const FORM_MAX_WIDTH: f32 = 520.0;

    /// Tallest the rendered diagram gets before it is scaled down.
    pub const PREVIEW_MAX_HEIGHT: f32 = 640.0;
}

pub mod typography {
    /// Application name in the header.
    pub const HEADING: f32 = 22.0;
    /// Panel titles.
    pub const SECTION: f32 = 17.0;
    pub const INPUT: f32 = 15.0;
    pub const BODY: f32 = 14.0;
    /// Hints, URLs and status lines.
    pub const CAPTION: f32 = 12.0;
}

pub mod border {
    pub const THIN: f32 = 1.0;
    /// Toast accents.
    pub const THICK: f32 = 2.0;
}

pub mod radius {
    pub const CONTROL: f32 = 4.0;
    pub const CARD: f32 = 8.0;
    pub const PANEL: f32 = 12.0;
}

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: Color::TRANSPARENT,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    /// Buttons lifted on hover.
    pub const RAISED: Shadow = Shadow {
        color: Color {
            a: 0.25,
            ..palette::INK
        },
        offset: Vector { x: 0.0, y: 1.0 },
        blur_radius: 3.0,
    };

    /// Toasts floating above the panels.
    pub const FLOATING: Shadow = Shadow {
        color: Color {
            a: 0.35,
            ..palette::INK
        },
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 12.0,
    };
}

const _: () = {
    assert!(spacing::XXS < spacing::XS);
    assert!(spacing::XS < spacing::SM);
    assert!(spacing::SM < spacing::MD);
    assert!(spacing::MD < spacing::LG);

    assert!(opacity::HOVER_TINT < opacity::DISABLED);
    assert!(opacity::PANEL < opacity::FULL);

    assert!(typography::HEADING > typography::SECTION);
    assert!(typography::SECTION > typography::INPUT);
    assert!(typography::BODY > typography::CAPTION);

    assert!(radius::CONTROL < radius::CARD && radius::CARD < radius::PANEL);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_follows_four_pixel_grid() {
        for value in [spacing::XXS, spacing::XS, spacing::SM, spacing::MD, spacing::LG] {
            assert_eq!(value % 4.0, 0.0, "{value} is off the grid");
        }
    }

    #[test]
    fn shadows_are_translucent() {
        assert!(shadow::RAISED.color.a < shadow::FLOATING.color.a);
        assert_eq!(shadow::NONE.color.a, 0.0);
    }
}
