//! Seeds demo tasks so the schedule grid conveys value during first-run.

use anyhow::Result;

use chrono::NaiveDate;
use dayplan_core::model::{NewTask, TaskStatus};
use dayplan_core::TasksService;

use crate::app::helpers::due_at;
use crate::app::state::SAMPLE_SEEDS;

pub(crate) fn maybe_seed_sample_data(service: &TasksService, day: NaiveDate) -> Result<bool> {
    let snapshot = service.day_snapshot(day)?;
    if !snapshot.tasks.is_empty() {
        return Ok(false);
    }

    for seed in SAMPLE_SEEDS {
        // A seed without an hour is due at midnight: date-only, so the
        // allocator picks its slot.
        let due = due_at(day, seed.hour.unwrap_or(0));
        let task = NewTask {
            title: seed.title.to_string(),
            subject: seed.subject.to_string(),
            due_date: due,
            estimated_minutes: seed.minutes,
            status: TaskStatus::Pending,
            priority: seed.priority,
        };
        service.create(task.into_insertable())?;
    }
    Ok(true)
}
