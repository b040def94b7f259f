use chrono::Utc;
use iced::alignment::{Horizontal, Vertical};
use iced::border::{Border, Radius};
use iced::widget::{column, container, mouse_area, row, scrollable, stack, text, Space};
use iced::{Background, Color, Element, Length, Shadow};

use dayplan_core::drag::DragKind;
use dayplan_core::geometry::current_time_offset;
use dayplan_core::model::{Priority, Task};
use dayplan_core::slots::TimeSlot;
use dayplan_core::DayGrid;

use crate::app::helpers::hour_label;
use crate::app::message::Message;
use crate::app::theme::Palette;

use super::styles::with_alpha;

use super::super::desktop::{GridShell, HOUR_HEIGHT};

const HOUR_GUTTER: f32 = 72.0;

impl GridShell {
    pub(crate) fn schedule_grid(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let tasks: &[Task] = self
            .store
            .snapshot
            .as_ref()
            .map(|snapshot| snapshot.tasks.as_slice())
            .unwrap_or(&[]);
        let grid = DayGrid::build(
            tasks,
            &self.constraints,
            self.day,
            &self.overrides,
            &self.allocation,
        );
        let dragging = self.controller.dragging_task();

        let mut rows = column![].spacing(0);
        for slot in grid.slots() {
            rows = rows.push(self.slot_row(&grid, slot, dragging));
        }

        let mut layers = stack![rows];

        if let Some(marker) = self.now_marker() {
            layers = layers.push(marker);
        }
        if let Some(ghost) = self.drag_ghost(tasks) {
            layers = layers.push(ghost);
        }

        let surface = mouse_area(layers)
            .on_move(Message::GridCursorMoved)
            .on_release(Message::GridReleased);

        scrollable(surface)
            .on_scroll(|_| Message::GridScrolled)
            .height(Length::Fill)
            .into()
    }

    fn slot_row(
        &self,
        grid: &DayGrid,
        slot: &TimeSlot,
        dragging: Option<&str>,
    ) -> Element<'static, Message> {
        let palette = self.palette;

        let gutter = container(
            text(hour_label(slot.hour))
                .size(12)
                .color(palette.text_secondary),
        )
        .width(Length::Fixed(HOUR_GUTTER))
        .height(Length::Fixed(HOUR_HEIGHT))
        .padding([6, 10])
        .align_x(Horizontal::Right);

        let mut cards = row![].spacing(8);
        for task in grid.tasks_for_hour(slot.hour, dragging) {
            let selected = self.selected_task.as_deref() == Some(task.id.as_str());
            cards = cards.push(task_card(task.clone(), slot.hour, palette, selected));
        }

        let fill = slot_fill(slot, palette);
        let body = mouse_area(
            container(cards)
                .width(Length::Fill)
                .height(Length::Fixed(HOUR_HEIGHT))
                .padding([6, 8])
                .style(move |_| slot_style(palette, fill)),
        )
        .on_press(Message::GridPressed);

        row![gutter, body].spacing(0).into()
    }

    fn now_marker(&self) -> Option<Element<'_, Message>> {
        if self.day != Utc::now().date_naive() {
            return None;
        }
        let (start, end) = self.constraints.hours();
        let offset = current_time_offset(Utc::now().time(), start, end, HOUR_HEIGHT)?;
        let palette = self.palette;

        Some(
            column![
                Space::new().height(Length::Fixed(offset.max(0.0))),
                row![
                    Space::new().width(Length::Fixed(HOUR_GUTTER)),
                    container(Space::new())
                        .width(Length::Fill)
                        .height(Length::Fixed(2.0))
                        .style(move |_| now_marker_style(palette)),
                ],
            ]
            .into(),
        )
    }

    fn drag_ghost(&self, tasks: &[Task]) -> Option<Element<'_, Message>> {
        let offset = self.controller.ghost_offset()?;
        let session = self.controller.session()?;
        let palette = self.palette;

        let label = match session.kind {
            DragKind::Move => session
                .task_id
                .as_deref()
                .and_then(|id| tasks.iter().find(|task| task.id == id))
                .map(|task| task.title.clone())
                .unwrap_or_else(|| "Moving task".into()),
            DragKind::Create => format!("New task at {}", hour_label(session.target_hour)),
        };

        Some(
            column![
                Space::new().height(Length::Fixed(offset.max(0.0))),
                row![
                    Space::new().width(Length::Fixed(HOUR_GUTTER)),
                    container(
                        text(label)
                            .size(13)
                            .color(palette.text_primary)
                            .align_y(Vertical::Center)
                    )
                    .width(Length::Fill)
                    .height(Length::Fixed(HOUR_HEIGHT))
                    .padding([6, 12])
                    .style(move |_| ghost_style(palette)),
                ],
            ]
            .into(),
        )
    }
}

fn task_card(
    task: Task,
    hour: u8,
    palette: Palette,
    selected: bool,
) -> Element<'static, Message> {
    let accent = priority_color(palette, task.priority);
    let id = task.id.clone();

    let mut lines = column![text(task.title.clone())
        .size(13)
        .color(palette.text_primary)]
    .spacing(2);
    if !task.subject.is_empty() {
        lines = lines.push(
            text(task.subject.clone())
                .size(11)
                .color(palette.text_secondary),
        );
    }

    mouse_area(
        container(lines)
            .padding([4, 10])
            .style(move |_| card_style(palette, accent, selected)),
    )
    .on_press(Message::TaskPressed(id, hour))
    .into()
}

fn priority_color(palette: Palette, priority: Priority) -> Color {
    match priority {
        Priority::High => palette.danger,
        Priority::Medium => palette.warning,
        Priority::Low => palette.info,
    }
}

fn slot_fill(slot: &TimeSlot, palette: Palette) -> Option<Color> {
    if slot.is_lunch_break {
        Some(palette.lunch_fill)
    } else if slot.is_study_time {
        Some(palette.study_fill)
    } else {
        None
    }
}

fn slot_style(palette: Palette, fill: Option<Color>) -> container::Style {
    container::Style {
        background: fill.map(Background::Color),
        border: Border {
            color: palette.slot_line,
            width: 1.0,
            radius: Radius::from(0.0),
        },
        shadow: Shadow::default(),
        ..container::Style::default()
    }
}

fn card_style(palette: Palette, accent: Color, selected: bool) -> container::Style {
    let border_color = if selected { palette.primary } else { accent };
    container::Style {
        background: Some(Background::Color(with_alpha(accent, 0.14))),
        border: Border {
            color: border_color,
            width: if selected { 2.0 } else { 1.0 },
            radius: Radius::from(6.0),
        },
        shadow: Shadow::default(),
        ..container::Style::default()
    }
}

fn ghost_style(palette: Palette) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette.ghost_fill)),
        border: Border {
            color: palette.primary,
            width: 1.0,
            radius: Radius::from(6.0),
        },
        shadow: Shadow::default(),
        ..container::Style::default()
    }
}

fn now_marker_style(palette: Palette) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette.now_marker)),
        border: Border::default(),
        shadow: Shadow::default(),
        ..container::Style::default()
    }
}
