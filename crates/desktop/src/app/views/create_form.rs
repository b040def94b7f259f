use iced::widget::{button, column, container, pick_list, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

use dayplan_core::model::Priority;

use crate::app::helpers::hour_label;
use crate::app::message::Message;

use super::styles::{ghost_button_style, panel_style, primary_button_style, text_input_style};

use super::super::desktop::GridShell;

const PRIORITY_CHOICES: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

impl GridShell {
    pub(crate) fn create_form(&self) -> Option<Element<'_, Message>> {
        let draft = self.draft.as_ref()?;
        let palette = self.palette;

        let heading = text(format!("New task at {}", hour_label(draft.hour)))
            .size(15)
            .color(palette.text_primary);

        let title = text_input("Title", &draft.title)
            .id(self.draft_title_id.clone())
            .on_input(Message::DraftTitleChanged)
            .on_submit(Message::DraftSubmit)
            .padding(10)
            .style(move |_, status| text_input_style(palette, status));

        let subject = text_input("Subject", &draft.subject)
            .on_input(Message::DraftSubjectChanged)
            .on_submit(Message::DraftSubmit)
            .padding(10)
            .style(move |_, status| text_input_style(palette, status));

        let minutes = text_input("Estimate (minutes)", &draft.minutes)
            .on_input(Message::DraftMinutesChanged)
            .on_submit(Message::DraftSubmit)
            .padding(10)
            .width(Length::Fixed(180.0))
            .style(move |_, status| text_input_style(palette, status));

        let priority = pick_list(
            PRIORITY_CHOICES,
            Some(draft.priority),
            Message::DraftPriorityPicked,
        )
        .padding(10);

        let save_label = if draft.submitting { "Saving…" } else { "Save" };
        let save = button(text(save_label).size(14).color(palette.primary_text))
            .on_press_maybe((!draft.submitting).then_some(Message::DraftSubmit))
            .style(move |_, status| primary_button_style(palette, status));

        let cancel = button(text("Cancel").size(14).color(palette.secondary_text))
            .on_press(Message::DraftCancelled)
            .style(move |_, status| ghost_button_style(palette, status));

        let controls = row![
            minutes,
            priority,
            Space::new().width(Length::Fill),
            cancel,
            save
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        Some(
            container(column![heading, title, subject, controls].spacing(10))
                .width(Length::Fill)
                .padding([14, 16])
                .style(move |_| panel_style(palette))
                .into(),
        )
    }
}
