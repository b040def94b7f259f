use iced::alignment::Horizontal;
use iced::border::{Border, Radius};
use iced::widget::rule;
use iced::widget::{column, container};
use iced::{Alignment, Background, Element, Length, Shadow};

use crate::app::message::Message;
use crate::app::theme::Palette;

use super::super::desktop::GridShell;

pub(crate) fn compose(app: &GridShell) -> Element<'_, Message> {
    let toolbar = container(app.toolbar())
        .width(Length::Fill)
        .padding([5, 5])
        .style(move |_| toolbar_container_style(app.palette));

    let toolbar_divider = rule::horizontal(1).style(move |_| toolbar_divider_style(app.palette));

    let mut main_column = column![].spacing(16).align_x(Alignment::Start);
    if let Some(form) = app.create_form() {
        main_column = main_column.push(form);
    }
    main_column = main_column.push(app.schedule_grid());

    let content = container(main_column)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding([16, 20])
        .style(move |_| surface_container_style(app.palette));

    let status = container(app.status_line())
        .width(Length::Fill)
        .padding([8, 20])
        .style(move |_| status_container_style(app.palette));

    container(
        column![toolbar, toolbar_divider, content, status]
            .spacing(0)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(Horizontal::Left)
    .style(move |_| app_background_style(app.palette))
    .into()
}

fn surface_container_style(palette: Palette) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette.surface)),
        border: Border {
            color: palette.border,
            width: 0.0,
            radius: Radius::from(0.0),
        },
        shadow: Shadow::default(),
        ..container::Style::default()
    }
}

fn toolbar_container_style(palette: Palette) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette.surface_muted)),
        border: Border {
            color: palette.border,
            width: 0.0,
            radius: Radius::from(0.0),
        },
        shadow: Shadow::default(),
        ..container::Style::default()
    }
}

fn toolbar_divider_style(palette: Palette) -> rule::Style {
    rule::Style {
        color: palette.border,
        radius: Radius::from(0.0),
        fill_mode: rule::FillMode::Full,
        snap: true,
    }
}

fn status_container_style(palette: Palette) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette.surface_muted)),
        border: Border {
            color: palette.border,
            width: 0.0,
            radius: Radius::from(0.0),
        },
        shadow: Shadow::default(),
        ..container::Style::default()
    }
}

fn app_background_style(palette: Palette) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette.background)),
        border: Border::default(),
        shadow: Shadow::default(),
        ..container::Style::default()
    }
}
