// SPDX-License-Identifier: MPL-2.0
//! Inline panel for a failed generation.
//!
//! A red title, the failure text exactly as received and, when there is
//! something technical to add (the HTTP status), a collapsible details line.
//!
//! ```ignore
//! ErrorPanel::new("The request failed", "API key not valid.")
//!     .details(Some("HTTP 400".into()))
//!     .expanded(show_details)
//!     .toggle_labels(i18n.tr("error-details-show"), i18n.tr("error-details-hide"))
//!     .on_toggle(Message::ToggleErrorDetails)
//!     .view()
//! ```

use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles::{self, button as button_styles};
use iced::widget::{button, rule, text, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Theme};

#[derive(Debug, Clone)]
pub struct ErrorPanel<Message> {
    title: String,
    body: String,
    details: Option<String>,
    expanded: bool,
    on_toggle: Option<Message>,
    labels: (String, String),
}

fn danger_text(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(palette::DANGER),
    }
}

impl<Message: Clone + 'static> ErrorPanel<Message> {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            details: None,
            expanded: false,
            on_toggle: None,
            labels: ("Show details".to_string(), "Hide details".to_string()),
        }
    }

    #[must_use]
    pub fn details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Without a toggle message the details are never offered.
    #[must_use]
    pub fn on_toggle(mut self, message: Message) -> Self {
        self.on_toggle = Some(message);
        self
    }

    /// Button captions while collapsed and expanded.
    #[must_use]
    pub fn toggle_labels(mut self, show: impl Into<String>, hide: impl Into<String>) -> Self {
        self.labels = (show.into(), hide.into());
        self
    }

    pub fn view(self) -> Element<'static, Message> {
        let mut content = Column::new()
            .spacing(spacing::XS)
            .width(Length::Fill)
            .push(Text::new(self.title).size(typography::INPUT).style(danger_text))
            .push(Text::new(self.body).size(typography::BODY));

        if let (Some(details), Some(on_toggle)) = (self.details, self.on_toggle) {
            let (show, hide) = self.labels;
            let caption = if self.expanded { hide } else { show };
            content = content.push(
                button(Text::new(caption).size(typography::CAPTION))
                    .on_press(on_toggle)
                    .padding([spacing::XXS, spacing::XS])
                    .style(button_styles::ghost),
            );

            if self.expanded {
                content = content.push(rule::horizontal(1)).push(
                    Text::new(details)
                        .size(typography::CAPTION)
                        .style(|theme: &Theme| text::Style {
                            color: Some(theme.extended_palette().secondary.base.text),
                        }),
                );
            }
        }

        let row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Top)
            .push(Text::new("!").size(typography::HEADING).style(danger_text))
            .push(content);

        Container::new(row)
            .width(Length::Fill)
            .padding(spacing::MD)
            .style(styles::container::error_panel)
            .into()
    }
}
