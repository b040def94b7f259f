//! Deterministic placement of tasks into hour slots for one working day.
//!
//! Identical inputs always yield an identical mapping: redraws stay
//! idempotent and the drag controller can recompute the slot a failed move
//! must revert to. The allocator never drops a task; when nothing fits it
//! clamps the start so the task still ends inside the working window.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::constraints::ConstraintSet;
use crate::model::Task;

/// Place every given task into a start hour for `day`.
///
/// Callers pass the tasks that lack an explicit time; tasks with a chosen
/// hour render at that hour and never consult the allocator.
pub fn allocate(tasks: &[Task], constraints: &ConstraintSet, day: NaiveDate) -> BTreeMap<String, u8> {
    let placer = Placer::new(constraints);
    let (start, end) = placer.window;

    // Priority descending, ties broken by shorter estimates first; the sort
    // is stable so equal tasks keep their input order.
    let mut order: Vec<&Task> = tasks.iter().collect();
    order.sort_by_key(|task| (std::cmp::Reverse(task.priority.rank()), task.duration_hours()));

    // Study blocks clamped into the working window, with a fill cursor each.
    let mut blocks: Vec<(u8, u8, u8)> = constraints
        .blocks_for(day)
        .iter()
        .map(|block| {
            let from = block.start_hour.max(start);
            let to = block.end_hour.min(end);
            (from, to, from)
        })
        .filter(|(from, to, _)| from < to)
        .collect();
    let mut overflow_cursor = blocks.iter().map(|(_, to, _)| *to).max();

    // Band cursors for days without study blocks. Without a valid lunch
    // there is no break edge to anchor to, so the bands open at the
    // midpoint of the working window.
    let lunch = constraints.lunch();
    let after_lunch = lunch
        .map(|(_, lunch_end)| lunch_end)
        .unwrap_or(start + (end - start) / 2);
    let mut band_high = start;
    let mut band_medium = after_lunch;
    let mut band_low = after_lunch.saturating_add(1);

    let mut placement = BTreeMap::new();
    for task in order {
        let duration = task.duration_hours();

        let hour = if blocks.is_empty() {
            let cursor = match task.priority.rank() {
                2 => &mut band_high,
                1 => &mut band_medium,
                _ => &mut band_low,
            };
            let hour = placer.fit(*cursor, duration);
            *cursor = hour.saturating_add(duration);
            hour
        } else {
            let mut placed = None;
            for (_, block_end, cursor) in blocks.iter_mut() {
                let candidate = placer.shift_past_lunch(*cursor, duration);
                if candidate.saturating_add(duration) <= *block_end {
                    *cursor = candidate.saturating_add(duration);
                    placed = Some(candidate);
                    break;
                }
            }
            match placed {
                Some(hour) => hour,
                None => {
                    // No remaining block span fits; continue after the last
                    // study block of the day.
                    let from = overflow_cursor.unwrap_or(start);
                    let hour = placer.fit(from, duration);
                    overflow_cursor = Some(hour.saturating_add(duration));
                    hour
                }
            }
        };

        placement.insert(task.id.clone(), hour);
    }

    placement
}

struct Placer {
    window: (u8, u8),
    lunch: Option<(u8, u8)>,
}

impl Placer {
    fn new(constraints: &ConstraintSet) -> Self {
        Self {
            window: constraints.hours(),
            lunch: constraints.lunch(),
        }
    }

    fn overlaps_lunch(&self, hour: u8, duration: u8) -> bool {
        match self.lunch {
            Some((lunch_start, lunch_end)) => {
                hour < lunch_end && hour.saturating_add(duration) > lunch_start
            }
            None => false,
        }
    }

    fn shift_past_lunch(&self, hour: u8, duration: u8) -> u8 {
        if self.overlaps_lunch(hour, duration) {
            // One lunch window per day, so a single shift settles it.
            self.lunch.map(|(_, lunch_end)| lunch_end).unwrap_or(hour)
        } else {
            hour
        }
    }

    /// Earliest start at or after `from` that avoids lunch and ends inside
    /// the window; clamps into range as the total-function last resort.
    fn fit(&self, from: u8, duration: u8) -> u8 {
        let (start, end) = self.window;
        let candidate = self.shift_past_lunch(from.max(start), duration);
        if candidate.saturating_add(duration) <= end {
            return candidate;
        }

        let clamped = end.saturating_sub(duration).max(start);
        if self.overlaps_lunch(clamped, duration) {
            if let Some((lunch_start, _)) = self.lunch {
                let before_lunch = lunch_start.saturating_sub(duration);
                if before_lunch >= start {
                    return before_lunch;
                }
            }
        }
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{LunchBreak, StudyBlock, WorkingHours};
    use crate::model::{Priority, TaskStatus};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn task(id: &str, priority: Priority, minutes: u32) -> Task {
        Task {
            id: id.into(),
            title: format!("task {id}"),
            subject: "Math".into(),
            due_date: Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap(),
            estimated_minutes: Some(minutes),
            status: TaskStatus::Pending,
            priority,
        }
    }

    fn nine_to_five() -> ConstraintSet {
        ConstraintSet {
            working_hours: WorkingHours {
                start_hour: 9,
                end_hour: 17,
            },
            lunch_break: LunchBreak { start: 12, end: 13 },
            study_blocks: Vec::new(),
        }
    }

    #[test]
    fn priority_bands_without_study_blocks() {
        let tasks = vec![
            task("a", Priority::High, 30),
            task("b", Priority::Medium, 30),
            task("c", Priority::Low, 30),
        ];
        let placement = allocate(&tasks, &nine_to_five(), monday());

        assert_eq!(placement["a"], 9);
        assert_eq!(placement["b"], 13);
        assert_eq!(placement["c"], 14);
        for (_, hour) in &placement {
            assert!(*hour >= 9 && *hour < 17);
            assert!(!(*hour >= 12 && *hour < 13), "placed inside lunch");
        }
    }

    #[test]
    fn identical_inputs_yield_identical_mappings() {
        let tasks = vec![
            task("a", Priority::Medium, 120),
            task("b", Priority::Medium, 60),
            task("c", Priority::High, 90),
        ];
        let constraints = nine_to_five();
        let first = allocate(&tasks, &constraints, monday());
        let second = allocate(&tasks, &constraints, monday());
        assert_eq!(first, second);
    }

    #[test]
    fn shorter_estimates_win_priority_ties() {
        let tasks = vec![
            task("slow", Priority::High, 120),
            task("quick", Priority::High, 30),
        ];
        let placement = allocate(&tasks, &nine_to_five(), monday());
        // The quick task takes the start of the high band; the two-hour
        // task follows it and still ends before lunch.
        assert_eq!(placement["quick"], 9);
        assert_eq!(placement["slow"], 10);
    }

    #[test]
    fn band_placement_shifts_past_lunch() {
        let tasks = vec![
            task("quick", Priority::High, 30),
            task("long", Priority::High, 180),
        ];
        let placement = allocate(&tasks, &nine_to_five(), monday());
        assert_eq!(placement["quick"], 9);
        // Three hours from 10:00 would straddle the 12-13 lunch, so the
        // band cursor jumps the whole task past it.
        assert_eq!(placement["long"], 13);
    }

    #[test]
    fn prefers_the_earliest_fitting_study_block() {
        let mut constraints = nine_to_five();
        constraints.study_blocks = vec![
            StudyBlock {
                days_of_week: [1u8].into_iter().collect(),
                start_hour: 15,
                end_hour: 17,
            },
            StudyBlock {
                days_of_week: [1u8].into_iter().collect(),
                start_hour: 9,
                end_hour: 11,
            },
        ];
        let tasks = vec![
            task("a", Priority::High, 120),
            task("b", Priority::Medium, 120),
            task("c", Priority::Low, 60),
        ];
        let placement = allocate(&tasks, &constraints, monday());

        assert_eq!(placement["a"], 9); // fills the 9-11 block
        assert_eq!(placement["b"], 15); // next block that fits two hours
        // Overflow runs after the last block; past the window end it clamps
        // back so the task still finishes by 17:00.
        assert_eq!(placement["c"], 16);
    }

    #[test]
    fn block_placement_shifts_past_lunch() {
        let mut constraints = nine_to_five();
        constraints.study_blocks = vec![StudyBlock {
            days_of_week: [1u8].into_iter().collect(),
            start_hour: 11,
            end_hour: 16,
        }];
        let tasks = vec![task("a", Priority::High, 120)];
        let placement = allocate(&tasks, &constraints, monday());
        // 11:00 would straddle the 12-13 lunch, so the block cursor jumps it.
        assert_eq!(placement["a"], 13);
    }

    #[test]
    fn oversized_tasks_are_clamped_not_dropped() {
        let tasks = vec![task("huge", Priority::Low, 60 * 10)];
        let placement = allocate(&tasks, &nine_to_five(), monday());
        let hour = placement["huge"];
        assert!(hour >= 9, "start clamped into the window, got {hour}");
        assert_eq!(placement.len(), 1);
    }

    #[test]
    fn no_constraints_opens_the_full_day() {
        let constraints = ConstraintSet {
            working_hours: WorkingHours {
                start_hour: 20,
                end_hour: 8, // invalid
            },
            lunch_break: LunchBreak { start: 14, end: 12 }, // invalid
            study_blocks: Vec::new(),
        };
        let tasks = vec![
            task("a", Priority::High, 60),
            task("b", Priority::Medium, 60),
        ];
        let placement = allocate(&tasks, &constraints, monday());
        assert_eq!(placement["a"], 0);
        assert_eq!(placement["b"], 12); // midpoint band, no lunch edge to anchor to
    }
}
