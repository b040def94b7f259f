//! Pure pixel/hour conversions for the schedule grid.
//!
//! Hit-testing floors so a point anywhere inside a row selects that row's
//! hour; placement multiplies exactly so a dropped item renders in the slot
//! it was dropped on. Mixing the two roundings is what causes the classic
//! one-slot mismatch, so both live here and nowhere else.

use chrono::{NaiveTime, Timelike};

/// Hour under a vertical pixel offset, clamped to `[start_hour, end_hour]`.
pub fn pixel_to_hour(offset_y: f32, start_hour: u8, end_hour: u8, hour_height: f32) -> u8 {
    if hour_height <= 0.0 || end_hour <= start_hour {
        return start_hour;
    }
    let rows = (offset_y / hour_height).floor();
    let hour = start_hour as f32 + rows;
    hour.clamp(start_hour as f32, end_hour as f32) as u8
}

/// Exact vertical offset of an hour row's top edge.
pub fn hour_to_pixel(hour: u8, start_hour: u8, hour_height: f32) -> f32 {
    hour.saturating_sub(start_hour) as f32 * hour_height
}

/// Sub-hour-precise offset for the "now" marker, or `None` when the current
/// time falls outside the working window.
pub fn current_time_offset(
    now: NaiveTime,
    start_hour: u8,
    end_hour: u8,
    hour_height: f32,
) -> Option<f32> {
    let hour = now.hour() as f32 + now.minute() as f32 / 60.0 + now.second() as f32 / 3600.0;
    if hour < start_hour as f32 || hour > end_hour as f32 {
        return None;
    }
    Some((hour - start_hour as f32) * hour_height)
}
