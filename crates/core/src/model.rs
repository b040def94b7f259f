use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" | "in-progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            other => Err(anyhow!(
                "Unknown status '{}': expected pending|in_progress|completed",
                other
            )),
        }
    }
}

impl ValueEnum for TaskStatus {
    fn value_variants<'a>() -> &'a [Self] {
        const VARIANTS: [TaskStatus; 3] = [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Sort rank used by the slot allocator; higher places earlier.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(anyhow!(
                "Unknown priority '{}': expected low|medium|high",
                other
            )),
        }
    }
}

impl ValueEnum for Priority {
    fn value_variants<'a>() -> &'a [Self] {
        const VARIANTS: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Due timestamp for `day` at `hour` o'clock. The store keeps naive-UTC
/// timestamps; hour 0 means date-only, leaving placement to the allocator.
pub fn due_at(day: NaiveDate, hour: u8) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(u32::from(hour.min(23)), 0, 0).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&day.and_time(time))
}

/// A task as exchanged with the remote store. Field names on the wire are
/// camelCase (`dueDate`, `estimatedMinutes`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    pub status: TaskStatus,
    pub priority: Priority,
}

impl Task {
    /// Estimated duration in whole hour slots; a missing or tiny estimate
    /// still occupies one slot.
    pub fn duration_hours(&self) -> u8 {
        match self.estimated_minutes {
            Some(minutes) if minutes > 0 => minutes.div_ceil(60).min(24) as u8,
            _ => 1,
        }
    }

    /// Tasks due at exactly midnight carry a date but no chosen time; those
    /// are the ones the slot allocator places.
    pub fn has_explicit_hour(&self) -> bool {
        let time = self.due_date.time();
        !(time.hour() == 0 && time.minute() == 0 && time.second() == 0)
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub subject: String,
    pub due_date: DateTime<Utc>,
    pub estimated_minutes: Option<u32>,
    pub status: TaskStatus,
    pub priority: Priority,
}

impl NewTask {
    pub fn into_insertable(self) -> InsertableTask {
        InsertableTask {
            id: Ulid::new().to_string(),
            data: self,
        }
    }
}

impl From<&Task> for NewTask {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            subject: task.subject.clone(),
            due_date: task.due_date,
            estimated_minutes: task.estimated_minutes,
            status: task.status,
            priority: task.priority,
        }
    }
}

/// A task with its identifier minted ahead of the insert, so callers can
/// register the id as pending before the request is dispatched.
pub struct InsertableTask {
    pub id: String,
    pub data: NewTask,
}

impl InsertableTask {
    pub fn into_task(self) -> Task {
        Task {
            id: self.id,
            title: self.data.title,
            subject: self.data.subject,
            due_date: self.data.due_date,
            estimated_minutes: self.data.estimated_minutes,
            status: self.data.status,
            priority: self.data.priority,
        }
    }
}

/// Partial update for a task; also the payload shape carried by push events.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub estimated_minutes: Option<u32>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subject.is_none()
            && self.due_date.is_none()
            && self.estimated_minutes.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(subject) = &self.subject {
            task.subject = subject.clone();
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
        if let Some(minutes) = self.estimated_minutes {
            task.estimated_minutes = Some(minutes);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }

    /// Materialize a full task from a creation event payload. Missing text
    /// fields become empty strings; a missing due date falls back to `now`.
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            title: self.title.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            due_date: self.due_date.unwrap_or_else(Utc::now),
            estimated_minutes: self.estimated_minutes,
            status: self.status.unwrap_or(TaskStatus::Pending),
            priority: self.priority.unwrap_or(Priority::Medium),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task_at(hour: u32, minute: u32, estimate: Option<u32>) -> Task {
        Task {
            id: "01ARZ3NDEKTSV4RRFFQ69G5FAV".into(),
            title: "Essay draft".into(),
            subject: "English".into(),
            due_date: Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap(),
            estimated_minutes: estimate,
            status: TaskStatus::Pending,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn duration_rounds_up_to_whole_hours() {
        assert_eq!(task_at(10, 0, Some(30)).duration_hours(), 1);
        assert_eq!(task_at(10, 0, Some(60)).duration_hours(), 1);
        assert_eq!(task_at(10, 0, Some(61)).duration_hours(), 2);
        assert_eq!(task_at(10, 0, None).duration_hours(), 1);
        assert_eq!(task_at(10, 0, Some(0)).duration_hours(), 1);
    }

    #[test]
    fn midnight_due_means_no_explicit_hour() {
        assert!(!task_at(0, 0, None).has_explicit_hour());
        assert!(task_at(0, 30, None).has_explicit_hour());
        assert!(task_at(14, 0, None).has_explicit_hour());
    }

    #[test]
    fn due_at_composes_naive_utc() {
        let day = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(due_at(day, 14).to_rfc3339(), "2026-03-02T14:00:00+00:00");
        assert!(!task_at(0, 0, None).has_explicit_hour());
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_value(task_at(9, 0, Some(45))).unwrap();
        assert_eq!(json["dueDate"], "2026-03-02T09:00:00Z");
        assert_eq!(json["estimatedMinutes"], 45);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["priority"], "medium");
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut task = task_at(9, 0, Some(45));
        let patch = TaskPatch {
            title: Some("Essay final".into()),
            priority: Some(Priority::High),
            ..TaskPatch::default()
        };
        patch.apply_to(&mut task);
        assert_eq!(task.title, "Essay final");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.subject, "English");
        assert_eq!(task.estimated_minutes, Some(45));
    }
}
