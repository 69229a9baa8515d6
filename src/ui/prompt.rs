// SPDX-License-Identifier: MPL-2.0
//! Description input and Generate button.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text_editor, Column, Row, Space, Text};
use iced::{alignment::Vertical, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub can_submit: bool,
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    Edit(text_editor::Action),
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// The description text after an edit.
    InputChanged(String),
    Submit,
}

#[derive(Debug, Default)]
pub struct State {
    content: text_editor::Content,
}

impl State {
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Edit(action) => {
                let is_edit = action.is_edit();
                self.content.perform(action);
                if is_edit {
                    Event::InputChanged(self.content.text())
                } else {
                    Event::None
                }
            }
            Message::Submit => Event::Submit,
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;

        let editor = text_editor(&self.content)
            .placeholder(i18n.tr("prompt-placeholder"))
            .on_action(Message::Edit)
            .height(Length::Fixed(sizing::EDITOR_HEIGHT))
            .padding(spacing::XS);

        let label = if ctx.loading {
            i18n.tr("generate-button-loading")
        } else {
            i18n.tr("generate-button")
        };
        let generate = button(Text::new(label))
            .on_press_maybe(ctx.can_submit.then_some(Message::Submit))
            .style(styles::button::primary);

        let mut footer = Row::new().spacing(spacing::SM).align_y(Vertical::Center);
        if ctx.loading {
            footer = footer.push(Text::new(i18n.tr("status-loading")).size(typography::CAPTION));
        }
        footer = footer.push(Space::new().width(Length::Fill)).push(generate);

        let content = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("prompt-label")).size(typography::SECTION))
            .push(editor)
            .push(footer);

        container(content)
            .width(Length::Fill)
            .padding(spacing::MD)
            .style(styles::container::panel)
            .into()
    }
}
