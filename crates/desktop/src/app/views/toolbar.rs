use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Theme};

use crate::app::helpers::day_label;
use crate::app::message::Message;

use super::styles::{ghost_button_style, primary_button_style};

use super::super::desktop::GridShell;

impl GridShell {
    pub(crate) fn toolbar(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let theme_label = match self.theme {
            Theme::Dark => "Switch to light",
            _ => "Switch to dark",
        };

        let add_button = button(
            row![text("Add Task").color(palette.primary_text).size(14)]
                .spacing(8)
                .align_y(Alignment::Center),
        )
        .on_press(Message::AddTaskPressed)
        .style(move |_, status| primary_button_style(palette, status));

        let prev_button = button(text("‹").size(16).color(palette.secondary_text))
            .on_press(Message::ShiftDay(-1))
            .style(move |_, status| ghost_button_style(palette, status));

        let next_button = button(text("›").size(16).color(palette.secondary_text))
            .on_press(Message::ShiftDay(1))
            .style(move |_, status| ghost_button_style(palette, status));

        let today_button = button(text("Today").size(14).color(palette.secondary_text))
            .on_press(Message::GoToday)
            .style(move |_, status| ghost_button_style(palette, status));

        let day = text(day_label(self.day)).size(16).color(palette.text_primary);

        let mut bar = row![add_button, prev_button, day, next_button, today_button]
            .spacing(12)
            .align_y(Alignment::Center);

        bar = bar.push(Space::new().width(Length::Fill));

        if self.coordinator.has_pending() {
            bar = bar.push(text("Syncing…").size(14).color(palette.info));
        }

        let theme_button = button(text(theme_label).size(14).color(palette.secondary_text))
            .on_press(Message::ToggleTheme)
            .style(move |_, status| ghost_button_style(palette, status));

        bar = bar.push(theme_button);

        bar.into()
    }
}
