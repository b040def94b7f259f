use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::{named_params, Connection, Row};

use crate::config::AppConfig;
use crate::model::{InsertableTask, Priority, Task, TaskPatch, TaskStatus};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id TEXT PRIMARY KEY,
                    title TEXT NOT NULL,
                    subject TEXT NOT NULL,
                    due_at TEXT NOT NULL,
                    estimated_minutes INTEGER,
                    status TEXT NOT NULL,
                    priority TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_tasks_due_at ON tasks(due_at);",
            )
            .context("Failed to apply task store migrations")
    }

    pub fn insert_task(&self, insertable: &InsertableTask) -> Result<Task> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO tasks (id, title, subject, due_at, estimated_minutes, status, priority, created_at, updated_at)
             VALUES (:id, :title, :subject, :due_at, :estimated_minutes, :status, :priority, :created_at, :updated_at)",
            named_params![
                ":id": insertable.id,
                ":title": insertable.data.title,
                ":subject": insertable.data.subject,
                ":due_at": insertable.data.due_date.to_rfc3339(),
                ":estimated_minutes": insertable.data.estimated_minutes.map(|v| v as i64),
                ":status": insertable.data.status.as_str(),
                ":priority": insertable.data.priority.as_str(),
                ":created_at": now,
                ":updated_at": now,
            ],
        )?;
        self.fetch_task(&insertable.id)?
            .context("Inserted task vanished before read-back")
    }

    /// Insert-or-replace used when applying remote creation/update events.
    pub fn upsert_task(&self, task: &Task) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO tasks (id, title, subject, due_at, estimated_minutes, status, priority, created_at, updated_at)
             VALUES (:id, :title, :subject, :due_at, :estimated_minutes, :status, :priority, :now, :now)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                subject = excluded.subject,
                due_at = excluded.due_at,
                estimated_minutes = excluded.estimated_minutes,
                status = excluded.status,
                priority = excluded.priority,
                updated_at = excluded.updated_at",
            named_params![
                ":id": task.id,
                ":title": task.title,
                ":subject": task.subject,
                ":due_at": task.due_date.to_rfc3339(),
                ":estimated_minutes": task.estimated_minutes.map(|v| v as i64),
                ":status": task.status.as_str(),
                ":priority": task.priority.as_str(),
                ":now": now,
            ],
        )?;
        Ok(())
    }

    pub fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>> {
        let Some(mut task) = self.fetch_task(id)? else {
            return Ok(None);
        };
        patch.apply_to(&mut task);

        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE tasks SET
                title = :title,
                subject = :subject,
                due_at = :due_at,
                estimated_minutes = :estimated_minutes,
                status = :status,
                priority = :priority,
                updated_at = :updated_at
             WHERE id = :id",
            named_params![
                ":title": task.title,
                ":subject": task.subject,
                ":due_at": task.due_date.to_rfc3339(),
                ":estimated_minutes": task.estimated_minutes.map(|v| v as i64),
                ":status": task.status.as_str(),
                ":priority": task.priority.as_str(),
                ":updated_at": now,
                ":id": id,
            ],
        )?;
        Ok(Some(task))
    }

    pub fn delete_task(&self, id: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = :id", named_params![":id": id])?;
        Ok(affected > 0)
    }

    pub fn fetch_task(&self, id: &str) -> Result<Option<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, subject, due_at, estimated_minutes, status, priority
             FROM tasks WHERE id = ? LIMIT 1",
        )?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(map_task(row)?))
        } else {
            Ok(None)
        }
    }

    /// All tasks due within `day` (UTC), ordered by due instant then id so
    /// reads are stable across calls.
    pub fn fetch_day(&self, day: NaiveDate) -> Result<Vec<Task>> {
        let start = Utc
            .from_utc_datetime(&day.and_hms_opt(0, 0, 0).context("invalid day start")?)
            .to_rfc3339();
        let end = Utc
            .from_utc_datetime(
                &day.succ_opt()
                    .context("day out of calendar range")?
                    .and_hms_opt(0, 0, 0)
                    .context("invalid day end")?,
            )
            .to_rfc3339();

        let mut stmt = self.conn.prepare(
            "SELECT id, title, subject, due_at, estimated_minutes, status, priority
             FROM tasks WHERE due_at >= :start AND due_at < :end
             ORDER BY due_at, id",
        )?;
        let mut rows = stmt.query(named_params![":start": start, ":end": end])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(map_task(row)?);
        }
        Ok(tasks)
    }
}

fn map_task(row: &Row<'_>) -> Result<Task> {
    let due_raw: String = row.get("due_at")?;
    let due_date = DateTime::parse_from_rfc3339(&due_raw)
        .with_context(|| format!("Invalid due_at timestamp '{due_raw}'"))?
        .with_timezone(&Utc);
    let status_raw: String = row.get("status")?;
    let priority_raw: String = row.get("priority")?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        subject: row.get("subject")?,
        due_date,
        estimated_minutes: row
            .get::<_, Option<i64>>("estimated_minutes")?
            .map(|v| v as u32),
        status: status_raw.parse::<TaskStatus>()?,
        priority: priority_raw.parse::<Priority>()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTask;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn db_with_temp_dir() -> (Database, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf()).unwrap();
        let db = Database::initialize(&config).unwrap();
        (db, temp_dir)
    }

    fn new_task(title: &str, hour: u32) -> NewTask {
        NewTask {
            title: title.into(),
            subject: "History".into(),
            due_date: Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap(),
            estimated_minutes: Some(45),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn inserts_and_fetches_by_day() {
        let (db, _guard) = db_with_temp_dir();
        let inserted = db
            .insert_task(&new_task("Outline chapter", 10).into_insertable())
            .unwrap();
        let mut other_day = new_task("Tomorrow", 10);
        other_day.due_date = Utc.with_ymd_and_hms(2026, 3, 3, 10, 0, 0).unwrap();
        db.insert_task(&other_day.into_insertable()).unwrap();

        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let tasks = db.fetch_day(day).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0], inserted);
    }

    #[test]
    fn patch_update_preserves_untouched_fields() {
        let (db, _guard) = db_with_temp_dir();
        let task = db
            .insert_task(&new_task("Outline chapter", 10).into_insertable())
            .unwrap();

        let patch = TaskPatch {
            due_date: Some(Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap()),
            ..TaskPatch::default()
        };
        let updated = db.update_task(&task.id, &patch).unwrap().unwrap();
        assert_eq!(updated.title, "Outline chapter");
        assert_eq!(updated.due_date.to_rfc3339(), "2026-03-02T14:00:00+00:00");

        assert_eq!(db.update_task("missing", &patch).unwrap(), None);
    }

    #[test]
    fn delete_reports_whether_anything_matched() {
        let (db, _guard) = db_with_temp_dir();
        let task = db
            .insert_task(&new_task("Outline chapter", 10).into_insertable())
            .unwrap();
        assert!(db.delete_task(&task.id).unwrap());
        assert!(!db.delete_task(&task.id).unwrap());
    }
}
