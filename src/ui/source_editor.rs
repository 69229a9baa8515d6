// SPDX-License-Identifier: MPL-2.0
//! Editable PlantUML source.
//!
//! Edits are reported to the parent, which updates the session and thereby
//! the preview URL. The generator is never involved.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{container, text_editor, Column, Text};
use iced::{Element, Font, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

#[derive(Debug, Clone)]
pub enum Message {
    Edit(text_editor::Action),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    SourceEdited(String),
}

#[derive(Debug, Default)]
pub struct State {
    content: text_editor::Content,
}

impl State {
    /// Replaces the editor content with freshly generated source.
    pub fn load(&mut self, source: &str) {
        self.content = text_editor::Content::with_text(source);
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Edit(action) => {
                let is_edit = action.is_edit();
                self.content.perform(action);
                if is_edit {
                    Event::SourceEdited(self.content.text())
                } else {
                    Event::None
                }
            }
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let editor = text_editor(&self.content)
            .on_action(Message::Edit)
            .font(Font::MONOSPACE)
            .size(typography::BODY)
            .height(Length::Fixed(sizing::EDITOR_HEIGHT))
            .padding(spacing::XS);

        let content = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(ctx.i18n.tr("source-title")).size(typography::SECTION))
            .push(editor)
            .push(Text::new(ctx.i18n.tr("source-hint")).size(typography::CAPTION));

        container(content)
            .width(Length::Fill)
            .padding(spacing::MD)
            .style(styles::container::panel)
            .into()
    }
}
