use anyhow::Result;
use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::constraints::ConstraintSet;
use crate::database::Database;
use crate::model::{InsertableTask, Task, TaskPatch};
use crate::remote::{RemoteEvent, RemoteEventKind};

/// Tasks due on one day, as read from the store. Derived views (slots,
/// allocation) are computed by the caller; this is just the raw snapshot.
#[derive(Debug, Clone)]
pub struct DaySnapshot {
    pub day: NaiveDate,
    pub tasks: Vec<Task>,
}

/// The mutation surface over the task store. Every create/update/delete is
/// an asynchronous request/response pair from the caller's point of view;
/// callers must bracket each one with the mutation coordinator's
/// `record_pending` (before dispatch) and `resolve_pending` (on response).
#[derive(Debug, Clone)]
pub struct TasksService {
    config: AppConfig,
}

impl TasksService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Database::initialize(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn constraints(&self) -> Result<ConstraintSet> {
        self.config.load_constraints()
    }

    pub fn day_snapshot(&self, day: NaiveDate) -> Result<DaySnapshot> {
        let db = self.open_database()?;
        Ok(DaySnapshot {
            day,
            tasks: db.fetch_day(day)?,
        })
    }

    pub fn create(&self, task: InsertableTask) -> Result<Task> {
        let db = self.open_database()?;
        db.insert_task(&task)
    }

    pub fn update(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>> {
        let db = self.open_database()?;
        db.update_task(id, patch)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let db = self.open_database()?;
        db.delete_task(id)
    }

    pub fn fetch_task(&self, id: &str) -> Result<Option<Task>> {
        let db = self.open_database()?;
        db.fetch_task(id)
    }

    /// Write a normalized push event through to the store. Only called for
    /// events the coordinator decided to apply.
    pub fn apply_remote(&self, event: &RemoteEvent) -> Result<()> {
        let db = self.open_database()?;
        match event.kind {
            RemoteEventKind::Created => {
                let patch = event.patch.clone().unwrap_or_default();
                db.upsert_task(&patch.into_task(event.id.clone()))?;
            }
            RemoteEventKind::Updated => {
                if let Some(patch) = &event.patch {
                    // An update for an entity we have never seen is upserted
                    // so an out-of-order create/update pair still converges.
                    if db.update_task(&event.id, patch)?.is_none() {
                        db.upsert_task(&patch.clone().into_task(event.id.clone()))?;
                    }
                }
            }
            RemoteEventKind::Deleted => {
                db.delete_task(&event.id)?;
            }
        }
        Ok(())
    }

    fn open_database(&self) -> Result<Database> {
        Database::initialize(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewTask, Priority, TaskStatus};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn service_with_temp_dir() -> (TasksService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf()).unwrap();
        let service = TasksService::new(config).unwrap();
        (service, temp_dir)
    }

    fn new_task(title: &str, hour: u32) -> NewTask {
        NewTask {
            title: title.into(),
            subject: "Biology".into(),
            due_date: Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap(),
            estimated_minutes: Some(30),
            status: TaskStatus::Pending,
            priority: Priority::High,
        }
    }

    #[test]
    fn create_update_delete_round_trip() {
        let (service, _guard) = service_with_temp_dir();
        let created = service
            .create(new_task("Read chapter 4", 10).into_insertable())
            .unwrap();

        let patch = TaskPatch {
            status: Some(TaskStatus::Completed),
            ..TaskPatch::default()
        };
        let updated = service.update(&created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);

        assert!(service.delete(&created.id).unwrap());
        assert_eq!(service.fetch_task(&created.id).unwrap(), None);
    }

    #[test]
    fn day_snapshot_only_sees_that_day() {
        let (service, _guard) = service_with_temp_dir();
        service
            .create(new_task("Read chapter 4", 10).into_insertable())
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(service.day_snapshot(day).unwrap().tasks.len(), 1);
        let next = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        assert!(service.day_snapshot(next).unwrap().tasks.is_empty());
    }

    #[test]
    fn remote_events_flow_through_the_store() {
        let (service, _guard) = service_with_temp_dir();

        let created = RemoteEvent::normalize(&json!({
            "type": "task.created",
            "task": {
                "id": "r1",
                "title": "Flashcards",
                "subject": "Spanish",
                "dueDate": "2026-03-02T15:00:00Z"
            }
        }))
        .unwrap();
        service.apply_remote(&created).unwrap();
        assert_eq!(
            service.fetch_task("r1").unwrap().unwrap().title,
            "Flashcards"
        );

        let updated = RemoteEvent::normalize(&json!({
            "type": "task.updated",
            "task": { "id": "r1", "title": "Flashcards set B" }
        }))
        .unwrap();
        service.apply_remote(&updated).unwrap();
        assert_eq!(
            service.fetch_task("r1").unwrap().unwrap().title,
            "Flashcards set B"
        );

        let deleted = RemoteEvent::normalize(&json!({
            "type": "task.deleted",
            "id": "r1"
        }))
        .unwrap();
        service.apply_remote(&deleted).unwrap();
        assert_eq!(service.fetch_task("r1").unwrap(), None);
    }
}
