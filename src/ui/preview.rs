// SPDX-License-Identifier: MPL-2.0
//! Rendered diagram and the two download actions.

use crate::diagram::{DiagramUrl, RenderFormat};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, image, svg, text, Column, Row, Text};
use iced::{alignment, ContentFit, Element, Length, Theme};

/// Picture fetched from the rendering server.
#[derive(Debug, Clone)]
pub enum Rendered {
    Svg(svg::Handle),
    Raster(image::Handle),
}

impl Rendered {
    /// Wraps downloaded bytes in the handle matching `format`.
    #[must_use]
    pub fn from_bytes(format: RenderFormat, bytes: Vec<u8>) -> Self {
        match format {
            RenderFormat::Svg => Rendered::Svg(svg::Handle::from_memory(bytes)),
            RenderFormat::Png => Rendered::Raster(image::Handle::from_bytes(bytes)),
        }
    }
}

/// What the preview panel currently shows.
#[derive(Debug, Clone, Default)]
pub enum PreviewState {
    #[default]
    Empty,
    Loading,
    Ready(Rendered),
    Failed(String),
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Derived on every frame, so owned.
    pub url: DiagramUrl,
    pub preview: &'a PreviewState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    DownloadImage,
    DownloadSource,
}

/// Text shown while no picture is available.
fn placeholder_key(preview: &PreviewState) -> Option<&'static str> {
    match preview {
        PreviewState::Empty => Some("preview-empty"),
        PreviewState::Loading => Some("preview-loading"),
        PreviewState::Ready(_) | PreviewState::Failed(_) => None,
    }
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let picture: Element<'a, Message> = match ctx.preview {
        PreviewState::Empty | PreviewState::Loading => {
            let key = placeholder_key(ctx.preview).unwrap_or("preview-loading");
            Text::new(i18n.tr(key)).size(typography::BODY).into()
        }
        PreviewState::Ready(Rendered::Svg(handle)) => svg(handle.clone())
            .content_fit(ContentFit::ScaleDown)
            .width(Length::Fill)
            .into(),
        PreviewState::Ready(Rendered::Raster(handle)) => image(handle.clone())
            .content_fit(ContentFit::ScaleDown)
            .width(Length::Fill)
            .into(),
        PreviewState::Failed(reason) => Column::new()
            .spacing(spacing::XXS)
            .push(
                Text::new(i18n.tr("preview-failed"))
                    .size(typography::BODY)
                    .style(|_theme: &Theme| text::Style {
                        color: Some(palette::DANGER),
                    }),
            )
            .push(Text::new(reason.as_str()).size(typography::CAPTION))
            .into(),
    };

    let frame = container(picture)
        .width(Length::Fill)
        .max_height(sizing::PREVIEW_MAX_HEIGHT)
        .padding(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .style(styles::container::preview);

    let format_name = ctx.url.format().to_string();
    let downloads = Row::new()
        .spacing(spacing::XS)
        .push(
            button(Text::new(i18n.tr_with_args(
                "preview-download-image",
                &[("format", format_name.as_str())],
            )))
            .on_press(Message::DownloadImage)
            .style(styles::button::primary),
        )
        .push(
            button(Text::new(i18n.tr("preview-download-source")))
                .on_press(Message::DownloadSource)
                .style(styles::button::secondary),
        );

    let url_caption = Text::new(ctx.url.to_string()).size(typography::CAPTION);

    let content = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(i18n.tr("preview-title")).size(typography::SECTION))
        .push(frame)
        .push(url_caption)
        .push(downloads);

    container(content)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::panel)
        .into()
}
