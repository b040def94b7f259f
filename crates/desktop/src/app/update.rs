//! Core update loop translating grid gestures and service results into state changes.

use std::time::Instant;

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use dayplan_core::allocator::allocate;
use dayplan_core::drag::{DragEffect, TimerId, TimerKind};
use dayplan_core::model::{NewTask, Task, TaskStatus};
use dayplan_core::{DaySnapshot, MutationKind, RemoteDecision, RemoteEvent, RemoteEventKind};
use iced::keyboard::{key::Named, Event as KeyboardEvent, Key};
use iced::widget::operation::{focus, move_cursor_to_end};
use iced::{Point, Theme};

use crate::app::commands::{
    create_command, delete_command, load_day_command, move_command, remote_command, timer_command,
};
use crate::app::helpers::{capitalize, due_at};
use crate::app::message::{Effect, Message};
use crate::app::state::{CreateDraft, GridMutation, LoadState, StatusToast, ToastKind};
use crate::app::theme::Palette;
use crate::telemetry::Event as TelemetryEvent;

use super::desktop::GridShell;

impl GridShell {
    pub(super) fn react(&mut self, message: Message) -> Effect {
        self.prune_toast();
        match message {
            Message::DayLoaded(day, result) => self.handle_day_loaded(day, result),
            Message::RefreshTick => self.on_refresh_tick(),
            Message::ToggleTheme => self.toggle_theme(),
            Message::GoToday => self.switch_day(Utc::now().date_naive()),
            Message::ShiftDay(delta) => self.switch_day(self.day + ChronoDuration::days(delta)),
            Message::GridPressed => {
                let offset = self.last_cursor_y;
                let effects = self.controller.press_start(offset, None);
                self.run_drag_effects(effects)
            }
            Message::TaskPressed(id, hour) => {
                self.selected_task = Some(id.clone());
                let offset = self.last_cursor_y;
                self.telemetry
                    .record(TelemetryEvent::DragStarted("move".into()));
                let effects = self.controller.press_start(offset, Some((id, hour)));
                self.run_drag_effects(effects)
            }
            Message::GridCursorMoved(point) => self.on_cursor_moved(point),
            Message::GridReleased => {
                let effects = self.controller.released();
                self.run_drag_effects(effects)
            }
            Message::GridScrolled => {
                let effects = self.controller.scroll_began();
                self.run_drag_effects(effects)
            }
            Message::DragTimerFired(id) => self.on_timer_fired(id),
            Message::AddTaskPressed => self.open_draft(self.constraints.hours().0),
            Message::DraftTitleChanged(value) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.title = value;
                }
                Effect::none()
            }
            Message::DraftSubjectChanged(value) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.subject = value;
                }
                Effect::none()
            }
            Message::DraftMinutesChanged(value) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.minutes = value;
                }
                Effect::none()
            }
            Message::DraftPriorityPicked(priority) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.priority = priority;
                }
                Effect::none()
            }
            Message::DraftSubmit => self.submit_draft(),
            Message::DraftCancelled => self.cancel_draft(),
            Message::DeleteSelected => self.delete_selected(),
            Message::MutationFinished(mutation, result) => self.finish_mutation(mutation, result),
            Message::RemotePayload(value) => self.handle_remote_payload(value),
            Message::RemoteApplied(kind, result) => self.finish_remote(kind, result),
            Message::Keyboard(event) => self.handle_keyboard(event),
        }
    }

    fn on_cursor_moved(&mut self, point: Point) -> Effect {
        self.last_cursor_y = point.y;
        let effects = self.controller.moved(point.y);
        self.run_drag_effects(effects)
    }

    fn on_timer_fired(&mut self, id: TimerId) -> Effect {
        let effects = self.controller.timer_fired(id);
        self.run_drag_effects(effects)
    }

    /// Realize controller effects: timers become delayed messages, creation
    /// opens the draft panel, and moves become update mutations.
    fn run_drag_effects(&mut self, effects: Vec<DragEffect>) -> Effect {
        let mut out = Vec::new();
        for effect in effects {
            match effect {
                DragEffect::Schedule { id, kind, after } => {
                    if kind == TimerKind::AutoCommit {
                        self.telemetry
                            .record(TelemetryEvent::DragStarted("create".into()));
                    }
                    out.push(timer_command(id, after));
                }
                DragEffect::OpenCreate { hour } => {
                    self.telemetry
                        .record(TelemetryEvent::DragCommitted("create".into()));
                    out.push(self.open_draft(hour));
                }
                DragEffect::MoveTask {
                    id,
                    from_hour,
                    to_hour,
                } => {
                    self.telemetry
                        .record(TelemetryEvent::DragCommitted("move".into()));
                    out.push(self.dispatch_move(id, from_hour, to_hour));
                }
            }
        }
        Effect::batch(out)
    }

    fn open_draft(&mut self, hour: u8) -> Effect {
        self.draft = Some(CreateDraft::at(hour));
        Effect::batch(vec![
            focus(self.draft_title_id.clone()),
            move_cursor_to_end(self.draft_title_id.clone()),
        ])
    }

    fn dispatch_move(&mut self, id: String, from_hour: u8, to_hour: u8) -> Effect {
        if to_hour == from_hour || id.is_empty() {
            self.controller.commit_resolved();
            return Effect::none();
        }
        let Some(service) = self.service.clone() else {
            self.controller.commit_resolved();
            return Effect::none();
        };

        // Optimistic: the card renders at the target hour immediately, and
        // the pending entry shields it from racing push events.
        self.overrides.insert(id.clone(), to_hour);
        self.coordinator
            .record_pending(&id, MutationKind::Update, Instant::now());
        let due = due_at(self.day, to_hour);
        let mutation = GridMutation::Move {
            id: id.clone(),
            from_hour,
            to_hour,
        };
        Effect::perform(move_command(service, id, due), move |result| {
            Message::MutationFinished(mutation.clone(), result)
        })
    }

    fn submit_draft(&mut self) -> Effect {
        let Some(draft) = self.draft.clone() else {
            return Effect::none();
        };
        if draft.submitting {
            return Effect::none();
        }

        let title = draft.title.trim().to_string();
        if title.is_empty() {
            self.status = Some(StatusToast {
                message: "Task title cannot be empty".into(),
                kind: ToastKind::Error,
                created_at: Instant::now(),
            });
            return Effect::none();
        }

        let minutes = match draft.minutes.trim() {
            "" => None,
            raw => match raw.parse::<u32>() {
                Ok(m) if m > 0 => Some(m),
                _ => {
                    self.status = Some(StatusToast {
                        message: "Estimate must be a whole number of minutes".into(),
                        kind: ToastKind::Error,
                        created_at: Instant::now(),
                    });
                    return Effect::none();
                }
            },
        };

        let Some(service) = self.service.clone() else {
            return Effect::none();
        };
        if let Some(draft) = self.draft.as_mut() {
            draft.submitting = true;
        }

        let insertable = NewTask {
            title,
            subject: draft.subject.trim().to_string(),
            due_date: due_at(self.day, draft.hour),
            estimated_minutes: minutes,
            status: TaskStatus::Pending,
            priority: draft.priority,
        }
        .into_insertable();

        // The id is minted before dispatch so the pending entry exists by
        // the time any echo of this create can arrive.
        let id = insertable.id.clone();
        self.coordinator
            .record_pending(&id, MutationKind::Create, Instant::now());
        let mutation = GridMutation::Create { id };
        Effect::perform(create_command(service, insertable), move |result| {
            Message::MutationFinished(mutation.clone(), result)
        })
    }

    fn cancel_draft(&mut self) -> Effect {
        self.draft = None;
        self.controller.commit_resolved();
        Effect::none()
    }

    fn delete_selected(&mut self) -> Effect {
        let Some(id) = self.selected_task.clone() else {
            return Effect::none();
        };
        let Some(service) = self.service.clone() else {
            return Effect::none();
        };

        self.coordinator
            .record_pending(&id, MutationKind::Delete, Instant::now());
        self.selected_task = None;
        let mutation = GridMutation::Delete { id: id.clone() };
        Effect::perform(delete_command(service, id), move |result| {
            Message::MutationFinished(mutation.clone(), result)
        })
    }

    fn finish_mutation(&mut self, mutation: GridMutation, result: Result<(), String>) -> Effect {
        match &mutation {
            GridMutation::Move { .. } | GridMutation::Delete { .. } => {
                self.controller.commit_resolved();
            }
            GridMutation::Create { .. } => {
                if result.is_ok() {
                    self.draft = None;
                    self.controller.commit_resolved();
                } else if let Some(draft) = self.draft.as_mut() {
                    draft.submitting = false;
                }
            }
        }

        self.coordinator.resolve_pending(mutation.task_id());

        match result {
            Ok(()) => {
                self.status = Some(StatusToast {
                    message: format!("{} succeeded", capitalize(mutation.label())),
                    kind: ToastKind::Info,
                    created_at: Instant::now(),
                });
                self.telemetry
                    .record(TelemetryEvent::MutationApplied(mutation.label().into()));
                self.refresh_day()
            }
            Err(err) => {
                if let GridMutation::Move { id, .. } = &mutation {
                    // Revert: the card falls back to its pre-drag hour.
                    self.overrides.remove(id);
                }
                self.status = Some(StatusToast {
                    message: err.clone(),
                    kind: ToastKind::Error,
                    created_at: Instant::now(),
                });
                self.telemetry.record(TelemetryEvent::MutationFailed {
                    action: mutation.label().into(),
                    error: err,
                });
                Effect::none()
            }
        }
    }

    fn handle_remote_payload(&mut self, value: serde_json::Value) -> Effect {
        let event = match RemoteEvent::normalize(&value) {
            Ok(event) => event,
            Err(err) => {
                self.telemetry
                    .record(TelemetryEvent::RemoteRejected(err.to_string()));
                self.status = Some(StatusToast {
                    message: err.to_string(),
                    kind: ToastKind::Error,
                    created_at: Instant::now(),
                });
                return Effect::none();
            }
        };

        let now = Instant::now();
        self.coordinator.expire_stale(now);
        match self.coordinator.on_remote_event(&event.id, now) {
            RemoteDecision::Suppressed => {
                self.telemetry
                    .record(TelemetryEvent::RemoteSuppressed(event.id.clone()));
                Effect::none()
            }
            RemoteDecision::Apply => {
                let Some(service) = self.service.clone() else {
                    return Effect::none();
                };
                let kind = match event.kind {
                    RemoteEventKind::Created => "created",
                    RemoteEventKind::Updated => "updated",
                    RemoteEventKind::Deleted => "deleted",
                }
                .to_string();
                Effect::perform(remote_command(service, event), move |result| {
                    Message::RemoteApplied(kind.clone(), result)
                })
            }
        }
    }

    fn finish_remote(&mut self, kind: String, result: Result<(), String>) -> Effect {
        match result {
            Ok(()) => {
                self.telemetry.record(TelemetryEvent::RemoteApplied(kind));
                self.refresh_day()
            }
            Err(err) => {
                self.status = Some(StatusToast {
                    message: err.clone(),
                    kind: ToastKind::Error,
                    created_at: Instant::now(),
                });
                self.telemetry.record(TelemetryEvent::RemoteRejected(err));
                Effect::none()
            }
        }
    }

    pub(super) fn handle_day_loaded(
        &mut self,
        day: NaiveDate,
        result: Result<DaySnapshot, String>,
    ) -> Effect {
        // A load racing a day switch is stale; the switch issued its own.
        if day != self.day {
            return Effect::none();
        }

        match result {
            Ok(snapshot) => {
                let count = snapshot.tasks.len();
                self.store.last_refreshed = Some(Instant::now());
                self.store.state = LoadState::Idle;
                self.store.version = self.store.version.wrapping_add(1);

                // Only tasks without a chosen time are the allocator's to
                // place; explicit due hours render where they say.
                let floating: Vec<Task> = snapshot
                    .tasks
                    .iter()
                    .filter(|task| !task.has_explicit_hour())
                    .cloned()
                    .collect();
                self.allocation = allocate(&floating, &self.constraints, self.day);

                let now = Instant::now();
                self.coordinator.expire_stale(now);
                let coordinator = &self.coordinator;
                self.overrides
                    .retain(|id, _| coordinator.is_pending(id, now));

                self.store.snapshot = Some(snapshot);
                self.telemetry.record(TelemetryEvent::RefreshCompleted {
                    day: self.day.to_string(),
                    count,
                });
                self.sync_selection();
            }
            Err(err) => {
                self.store.state = LoadState::Error(err.clone());
                self.telemetry.record(TelemetryEvent::RefreshFailed {
                    day: self.day.to_string(),
                    error: err.clone(),
                });
                self.status = Some(StatusToast {
                    message: err,
                    kind: ToastKind::Error,
                    created_at: Instant::now(),
                });
            }
        }
        Effect::none()
    }

    pub(super) fn on_refresh_tick(&mut self) -> Effect {
        self.coordinator.expire_stale(Instant::now());
        if self.coordinator.has_pending() {
            // A refresh mid-mutation would repaint stale hours over the
            // optimistic ones.
            return Effect::none();
        }
        self.refresh_day()
    }

    pub(super) fn refresh_day(&mut self) -> Effect {
        if let Some(service) = self.service.clone() {
            self.telemetry
                .record(TelemetryEvent::RefreshRequested(self.day.to_string()));
            self.store.state = LoadState::Loading;
            load_day_command(service, self.day)
        } else {
            Effect::none()
        }
    }

    pub(super) fn switch_day(&mut self, day: NaiveDate) -> Effect {
        if day == self.day {
            return Effect::none();
        }
        self.controller.cancel();
        self.draft = None;
        self.selected_task = None;
        self.day = day;
        self.telemetry
            .record(TelemetryEvent::DayChanged(day.to_string()));
        self.refresh_day()
    }

    pub(super) fn toggle_theme(&mut self) -> Effect {
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            _ => Theme::Dark,
        };
        self.palette = Palette::for_theme(&self.theme);
        Effect::none()
    }

    fn sync_selection(&mut self) {
        let Some(id) = self.selected_task.as_ref() else {
            return;
        };
        let still_present = self
            .store
            .snapshot
            .as_ref()
            .map(|snapshot| snapshot.tasks.iter().any(|task| &task.id == id))
            .unwrap_or(false);
        if !still_present {
            self.selected_task = None;
        }
    }

    pub(super) fn handle_keyboard(&mut self, event: KeyboardEvent) -> Effect {
        match event {
            KeyboardEvent::KeyPressed { key, .. } => {
                if self.draft.is_some() {
                    match key.as_ref() {
                        Key::Named(Named::Escape) => return self.cancel_draft(),
                        Key::Named(Named::Enter) => return self.submit_draft(),
                        _ => {}
                    }
                    return Effect::none();
                }

                match key.as_ref() {
                    Key::Named(Named::Escape) => {
                        self.controller.cancel();
                        Effect::none()
                    }
                    Key::Named(Named::ArrowLeft) => self.switch_day(self.day - ChronoDuration::days(1)),
                    Key::Named(Named::ArrowRight) => {
                        self.switch_day(self.day + ChronoDuration::days(1))
                    }
                    Key::Named(Named::Delete) | Key::Named(Named::Backspace) => {
                        self.delete_selected()
                    }
                    Key::Character(value) => match value.to_ascii_lowercase().as_str() {
                        "a" => self.open_draft(self.constraints.hours().0),
                        "d" => self.delete_selected(),
                        "t" => self.switch_day(Utc::now().date_naive()),
                        "r" => self.refresh_day(),
                        _ => Effect::none(),
                    },
                    _ => Effect::none(),
                }
            }
            _ => Effect::none(),
        }
    }
}
