//! Helper utilities for detecting environment defaults and formatting grid labels.

use chrono::NaiveDate;
use dark_light::Mode as ThemePreference;
use iced::Theme;

pub(crate) use dayplan_core::model::due_at;

pub(crate) fn detect_theme() -> Theme {
    match dark_light::detect() {
        ThemePreference::Dark => Theme::Dark,
        ThemePreference::Light => Theme::Light,
        ThemePreference::Default => Theme::Dark,
    }
}

pub(crate) fn hour_label(hour: u8) -> String {
    match hour {
        0 => "12 AM".into(),
        1..=11 => format!("{hour} AM"),
        12 => "12 PM".into(),
        13..=23 => format!("{} PM", hour - 12),
        _ => format!("{hour}:00"),
    }
}

pub(crate) fn day_label(day: NaiveDate) -> String {
    day.format("%a, %b %-d").to_string()
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hour_labels_wrap_noon_and_midnight() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(9), "9 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(17), "5 PM");
    }

    #[test]
    fn day_label_is_short_and_friendly() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(day_label(day), "Mon, Mar 2");
    }
}
