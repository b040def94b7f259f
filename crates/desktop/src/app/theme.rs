//! Palette definitions for the schedule grid's visual language.

use iced::Color;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette {
    pub(crate) background: Color,
    pub(crate) surface: Color,
    pub(crate) surface_muted: Color,
    pub(crate) primary: Color,
    pub(crate) primary_hover: Color,
    pub(crate) primary_text: Color,
    pub(crate) secondary_text: Color,
    pub(crate) ghost_hover: Color,
    pub(crate) success: Color,
    pub(crate) warning: Color,
    pub(crate) danger: Color,
    pub(crate) info: Color,
    pub(crate) text_primary: Color,
    pub(crate) text_secondary: Color,
    pub(crate) text_muted: Color,
    pub(crate) border: Color,
    pub(crate) slot_line: Color,
    pub(crate) lunch_fill: Color,
    pub(crate) study_fill: Color,
    pub(crate) now_marker: Color,
    pub(crate) ghost_fill: Color,
}

impl Palette {
    pub(crate) fn for_theme(theme: &iced::Theme) -> Self {
        match theme {
            iced::Theme::Dark => Self {
                // Deep slate panels with an indigo accent; break and study
                // hours get their own tints so the day structure reads at a
                // glance.
                background: Color::from_rgb(0.04, 0.04, 0.06),
                surface: Color::from_rgb(0.07, 0.07, 0.10),
                surface_muted: Color::from_rgb(0.09, 0.09, 0.13),
                primary: Color::from_rgb(0.42, 0.44, 0.92),
                primary_hover: Color::from_rgb(0.52, 0.54, 0.98),
                primary_text: Color::from_rgb(0.97, 0.97, 0.99),
                secondary_text: Color::from_rgb(0.68, 0.70, 0.90),
                ghost_hover: Color::from_rgba(0.42, 0.44, 0.92, 0.18),
                success: Color::from_rgb(0.30, 0.80, 0.48),
                warning: Color::from_rgb(0.90, 0.74, 0.28),
                danger: Color::from_rgb(0.90, 0.34, 0.36),
                info: Color::from_rgb(0.40, 0.74, 0.94),
                text_primary: Color::from_rgb(0.90, 0.91, 0.95),
                text_secondary: Color::from_rgb(0.60, 0.62, 0.72),
                text_muted: Color::from_rgb(0.40, 0.42, 0.50),
                border: Color::from_rgba(0.46, 0.48, 0.92, 0.30),
                slot_line: Color::from_rgba(0.46, 0.48, 0.92, 0.14),
                lunch_fill: Color::from_rgba(0.90, 0.74, 0.28, 0.10),
                study_fill: Color::from_rgba(0.40, 0.74, 0.94, 0.10),
                now_marker: Color::from_rgb(0.90, 0.34, 0.36),
                ghost_fill: Color::from_rgba(0.42, 0.44, 0.92, 0.28),
            },
            _ => Self {
                background: Color::from_rgb(0.96, 0.96, 0.98),
                surface: Color::from_rgb(1.0, 1.0, 1.0),
                surface_muted: Color::from_rgb(0.93, 0.93, 0.96),
                primary: Color::from_rgb(0.32, 0.34, 0.84),
                primary_hover: Color::from_rgb(0.40, 0.42, 0.92),
                primary_text: Color::from_rgb(0.99, 0.99, 1.0),
                secondary_text: Color::from_rgb(0.34, 0.36, 0.62),
                ghost_hover: Color::from_rgba(0.32, 0.34, 0.84, 0.10),
                success: Color::from_rgb(0.16, 0.60, 0.34),
                warning: Color::from_rgb(0.74, 0.56, 0.10),
                danger: Color::from_rgb(0.78, 0.20, 0.22),
                info: Color::from_rgb(0.16, 0.48, 0.72),
                text_primary: Color::from_rgb(0.12, 0.13, 0.18),
                text_secondary: Color::from_rgb(0.36, 0.38, 0.46),
                text_muted: Color::from_rgb(0.56, 0.58, 0.64),
                border: Color::from_rgba(0.32, 0.34, 0.84, 0.25),
                slot_line: Color::from_rgba(0.20, 0.22, 0.48, 0.12),
                lunch_fill: Color::from_rgba(0.74, 0.56, 0.10, 0.10),
                study_fill: Color::from_rgba(0.16, 0.48, 0.72, 0.08),
                now_marker: Color::from_rgb(0.78, 0.20, 0.22),
                ghost_fill: Color::from_rgba(0.32, 0.34, 0.84, 0.20),
            },
        }
    }
}
