//! Async adapters that map grid intents into core task service calls.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use dayplan_core::drag::TimerId;
use dayplan_core::model::{InsertableTask, TaskPatch};
use dayplan_core::{RemoteEvent, TasksService};

use crate::app::message::{Effect, Message};

pub(crate) fn load_day_command(service: TasksService, day: NaiveDate) -> Effect {
    Effect::perform(
        async move {
            tokio::task::spawn_blocking(move || service.day_snapshot(day))
                .await
                .map_err(|err| err.to_string())
                .and_then(|result| result.map_err(|err| err.to_string()))
        },
        move |result| Message::DayLoaded(day, result),
    )
}

/// Realizes one scheduled gesture timer. The controller decides on delivery
/// whether the id is still live, so a late fire is harmless.
pub(crate) fn timer_command(id: TimerId, after: Duration) -> Effect {
    Effect::perform(
        async move {
            tokio::time::sleep(after).await;
            id
        },
        Message::DragTimerFired,
    )
}

pub(crate) fn create_command(
    service: TasksService,
    task: InsertableTask,
) -> impl std::future::Future<Output = Result<(), String>> {
    async move {
        tokio::task::spawn_blocking(move || service.create(task).map(|_| ()))
            .await
            .map_err(|err| err.to_string())
            .and_then(|result| result.map_err(|err| err.to_string()))
    }
}

pub(crate) fn move_command(
    service: TasksService,
    id: String,
    due: DateTime<Utc>,
) -> impl std::future::Future<Output = Result<(), String>> {
    async move {
        tokio::task::spawn_blocking(move || {
            let patch = TaskPatch {
                due_date: Some(due),
                ..TaskPatch::default()
            };
            match service.update(&id, &patch)? {
                Some(_) => Ok(()),
                None => Err(anyhow::anyhow!("task {id} no longer exists")),
            }
        })
        .await
        .map_err(|err| err.to_string())
        .and_then(|result| result.map_err(|err| err.to_string()))
    }
}

pub(crate) fn delete_command(
    service: TasksService,
    id: String,
) -> impl std::future::Future<Output = Result<(), String>> {
    async move {
        tokio::task::spawn_blocking(move || {
            if service.delete(&id)? {
                Ok(())
            } else {
                Err(anyhow::anyhow!("task {id} no longer exists"))
            }
        })
        .await
        .map_err(|err| err.to_string())
        .and_then(|result| result.map_err(|err| err.to_string()))
    }
}

pub(crate) fn remote_command(
    service: TasksService,
    event: RemoteEvent,
) -> impl std::future::Future<Output = Result<(), String>> {
    async move {
        tokio::task::spawn_blocking(move || service.apply_remote(&event))
            .await
            .map_err(|err| err.to_string())
            .and_then(|result| result.map_err(|err| err.to_string()))
    }
}
