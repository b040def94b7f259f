//! On-demand time-slot derivation for one day of the schedule grid.
//!
//! Slots are recomputed from the task list, the constraint set, the current
//! allocation, and any optimistic hour overrides; nothing here is persisted.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Timelike};

use crate::constraints::ConstraintSet;
use crate::model::Task;

/// One hour-wide bucket of the working-hours grid.
#[derive(Debug, Clone)]
pub struct TimeSlot {
    pub hour: u8,
    pub tasks: Vec<Task>,
    pub is_break: bool,
    pub is_lunch_break: bool,
    pub is_study_time: bool,
}

/// The hour a task renders at: an optimistic override wins, then an explicit
/// due time, then the allocator's placement. Always inside the window.
pub fn effective_hour(
    task: &Task,
    window: (u8, u8),
    overrides: &HashMap<String, u8>,
    allocation: &BTreeMap<String, u8>,
) -> u8 {
    let (start, end) = window;
    let last = end.saturating_sub(1).max(start);
    if let Some(hour) = overrides.get(&task.id) {
        return (*hour).clamp(start, last);
    }
    if task.has_explicit_hour() {
        return (task.due_date.hour() as u8).clamp(start, last);
    }
    allocation
        .get(&task.id)
        .copied()
        .unwrap_or(start)
        .clamp(start, last)
}

#[derive(Debug, Clone)]
pub struct DayGrid {
    pub day: NaiveDate,
    pub start_hour: u8,
    pub end_hour: u8,
    slots: Vec<TimeSlot>,
}

impl DayGrid {
    pub fn build(
        tasks: &[Task],
        constraints: &ConstraintSet,
        day: NaiveDate,
        overrides: &HashMap<String, u8>,
        allocation: &BTreeMap<String, u8>,
    ) -> Self {
        let window = constraints.hours();
        let (start, end) = window;

        let mut slots: Vec<TimeSlot> = (start..end)
            .map(|hour| {
                let is_lunch = constraints.is_lunch_hour(hour);
                TimeSlot {
                    hour,
                    tasks: Vec::new(),
                    is_break: is_lunch,
                    is_lunch_break: is_lunch,
                    is_study_time: constraints.is_study_hour(hour, day),
                }
            })
            .collect();

        for task in tasks {
            if task.due_date.date_naive() != day {
                continue;
            }
            let hour = effective_hour(task, window, overrides, allocation);
            if let Some(slot) = slots.iter_mut().find(|slot| slot.hour == hour) {
                slot.tasks.push(task.clone());
            }
        }

        Self {
            day,
            start_hour: start,
            end_hour: end,
            slots,
        }
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Tasks rendered in `hour`, minus the one owned by an active drag so
    /// the original never shows twice while it is being moved.
    pub fn tasks_for_hour(&self, hour: u8, dragging: Option<&str>) -> Vec<&Task> {
        self.slots
            .iter()
            .find(|slot| slot.hour == hour)
            .map(|slot| {
                slot.tasks
                    .iter()
                    .filter(|task| dragging != Some(task.id.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TaskStatus};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn task(id: &str, hour: u32) -> Task {
        Task {
            id: id.into(),
            title: id.into(),
            subject: "Physics".into(),
            due_date: Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap(),
            estimated_minutes: Some(60),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn hours_are_unique_and_cover_the_window() {
        let grid = DayGrid::build(
            &[],
            &ConstraintSet::default(),
            day(),
            &HashMap::new(),
            &BTreeMap::new(),
        );
        let hours: Vec<u8> = grid.slots().iter().map(|slot| slot.hour).collect();
        assert_eq!(hours, (9..17).collect::<Vec<u8>>());
        assert!(grid.slots().iter().find(|s| s.hour == 12).unwrap().is_lunch_break);
    }

    #[test]
    fn override_beats_explicit_hour_beats_allocation() {
        let explicit = task("explicit", 10);
        let dateless = task("dateless", 0); // midnight, no chosen time
        let moved = task("moved", 10);

        let mut overrides = HashMap::new();
        overrides.insert("moved".to_string(), 14u8);
        let mut allocation = BTreeMap::new();
        allocation.insert("dateless".to_string(), 15u8);

        let grid = DayGrid::build(
            &[explicit, dateless, moved],
            &ConstraintSet::default(),
            day(),
            &overrides,
            &allocation,
        );

        assert_eq!(grid.tasks_for_hour(10, None).len(), 1);
        assert_eq!(grid.tasks_for_hour(15, None)[0].id, "dateless");
        assert_eq!(grid.tasks_for_hour(14, None)[0].id, "moved");
    }

    #[test]
    fn dragging_task_is_hidden_from_its_slot() {
        let grid = DayGrid::build(
            &[task("a", 10), task("b", 10)],
            &ConstraintSet::default(),
            day(),
            &HashMap::new(),
            &BTreeMap::new(),
        );
        let visible = grid.tasks_for_hour(10, Some("a"));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "b");
    }

    #[test]
    fn other_days_never_leak_into_the_grid() {
        let mut tomorrow = task("t", 10);
        tomorrow.due_date = Utc.with_ymd_and_hms(2026, 3, 3, 10, 0, 0).unwrap();
        let grid = DayGrid::build(
            &[tomorrow],
            &ConstraintSet::default(),
            day(),
            &HashMap::new(),
            &BTreeMap::new(),
        );
        assert!(grid.tasks_for_hour(10, None).is_empty());
    }
}
