//! Exercised flows keep the schedule grid's gesture and sync behavior reliable.

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use iced::keyboard::{key::Named, Event as KeyboardEvent, Key, Location, Modifiers};
    use iced::Point;
    use serde_json::json;
    use tempfile::TempDir;

    use dayplan_core::drag::DragPhase;
    use dayplan_core::model::{NewTask, Priority, TaskStatus};
    use dayplan_core::{AppConfig, TasksService};

    use super::super::desktop::GridShell;
    use super::super::helpers::due_at;
    use super::super::message::Message;
    use super::super::options::{DesktopFlags, DesktopOptions};
    use super::super::state::{GridMutation, ToastKind};

    fn init_app() -> (GridShell, TasksService, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf()).unwrap();
        let service = TasksService::new(config.clone()).unwrap();
        let today = Utc::now().date_naive();

        for (title, subject, hour, minutes, priority) in [
            ("Algebra problem set", "Math", Some(10u8), 60, Priority::High),
            ("Essay outline", "English", None, 30, Priority::Medium),
        ] {
            let task = NewTask {
                title: title.into(),
                subject: subject.into(),
                due_date: due_at(today, hour.unwrap_or(0)),
                estimated_minutes: Some(minutes),
                status: TaskStatus::Pending,
                priority,
            };
            service.create(task.into_insertable()).unwrap();
        }

        let flags = DesktopFlags::from(DesktopOptions {
            data_dir: Some(config.data_dir().to_path_buf()),
            ..Default::default()
        });

        let (mut app, _) = GridShell::bootstrap(flags);
        let snapshot = service.day_snapshot(today).unwrap();
        let _ = app.react(Message::DayLoaded(today, Ok(snapshot)));
        (app, service, temp_dir)
    }

    fn moved_task_id(app: &GridShell) -> String {
        app.store
            .snapshot
            .as_ref()
            .and_then(|snapshot| {
                snapshot
                    .tasks
                    .iter()
                    .find(|task| task.title == "Algebra problem set")
            })
            .expect("seeded task available")
            .id
            .clone()
    }

    /// Drives a press on the 10 AM task and a drag two hour rows down.
    fn drag_task_two_hours(app: &mut GridShell) -> String {
        let id = moved_task_id(app);
        let _ = app.react(Message::GridCursorMoved(Point::new(120.0, 84.0)));
        let _ = app.react(Message::TaskPressed(id.clone(), 10));
        let _ = app.react(Message::GridCursorMoved(Point::new(120.0, 212.0)));
        let _ = app.react(Message::GridReleased);
        id
    }

    #[test]
    fn long_press_and_release_opens_create_draft() {
        let (mut app, _service, _guard) = init_app();

        // Default window is 9-17 at 64px per hour: y = 80 falls in 10 AM.
        let _ = app.react(Message::GridCursorMoved(Point::new(120.0, 80.0)));
        let _ = app.react(Message::GridPressed);
        assert_eq!(app.controller.phase(), DragPhase::Pressed);

        // First gesture timer armed by the press.
        let _ = app.react(Message::DragTimerFired(1));
        assert_eq!(app.controller.phase(), DragPhase::PendingCreate);

        let _ = app.react(Message::GridReleased);
        let draft = app.draft.as_ref().expect("draft open after release");
        assert_eq!(draft.hour, 10);
        assert_eq!(app.controller.phase(), DragPhase::Committing);
    }

    #[test]
    fn short_tap_does_not_create() {
        let (mut app, _service, _guard) = init_app();

        let _ = app.react(Message::GridCursorMoved(Point::new(120.0, 80.0)));
        let _ = app.react(Message::GridPressed);
        let _ = app.react(Message::GridReleased);

        assert!(app.draft.is_none());
        assert_eq!(app.controller.phase(), DragPhase::Idle);
    }

    #[test]
    fn scroll_discards_an_armed_press() {
        let (mut app, _service, _guard) = init_app();

        let _ = app.react(Message::GridCursorMoved(Point::new(120.0, 80.0)));
        let _ = app.react(Message::GridPressed);
        let _ = app.react(Message::GridScrolled);

        assert_eq!(app.controller.phase(), DragPhase::Idle);
        // The long-press timer is now stale; its fire must do nothing.
        let _ = app.react(Message::DragTimerFired(1));
        assert!(app.draft.is_none());
    }

    #[test]
    fn dragging_task_records_override_and_pending_mutation() {
        let (mut app, _service, _guard) = init_app();
        let id = drag_task_two_hours(&mut app);

        // y = 212 is three rows down from the window start: 12 PM.
        assert_eq!(app.overrides.get(&id), Some(&12));
        assert!(app.coordinator.is_pending(&id, std::time::Instant::now()));
        assert_eq!(app.controller.phase(), DragPhase::Committing);
    }

    #[test]
    fn move_failure_reverts_the_override() {
        let (mut app, _service, _guard) = init_app();
        let id = drag_task_two_hours(&mut app);

        let mutation = GridMutation::Move {
            id: id.clone(),
            from_hour: 10,
            to_hour: 12,
        };
        let _ = app.react(Message::MutationFinished(mutation, Err("offline".into())));

        assert!(app.overrides.get(&id).is_none());
        assert!(!app.coordinator.is_pending(&id, std::time::Instant::now()));
        assert_eq!(app.controller.phase(), DragPhase::Idle);
        assert!(matches!(
            app.status.as_ref().map(|toast| toast.kind),
            Some(ToastKind::Error)
        ));
    }

    #[test]
    fn remote_event_for_pending_task_is_suppressed() {
        let (mut app, _service, _guard) = init_app();
        let id = drag_task_two_hours(&mut app);

        let payload = json!({
            "type": "task.updated",
            "task": { "id": id, "dueDate": "2026-03-02T08:00:00Z" }
        });
        let _ = app.react(Message::RemotePayload(payload));

        // Suppression is silent and leaves the pending entry untouched.
        assert!(app.coordinator.is_pending(&id, std::time::Instant::now()));
        assert!(app.status.is_none());
        assert_eq!(app.overrides.get(&id), Some(&12));
    }

    #[test]
    fn malformed_remote_payload_surfaces_an_error() {
        let (mut app, _service, _guard) = init_app();

        let _ = app.react(Message::RemotePayload(json!({ "noise": true })));

        assert!(matches!(
            app.status.as_ref().map(|toast| toast.kind),
            Some(ToastKind::Error)
        ));
    }

    #[test]
    fn escape_cancels_an_active_drag() {
        let (mut app, _service, _guard) = init_app();
        let id = moved_task_id(&app);

        let _ = app.react(Message::GridCursorMoved(Point::new(120.0, 84.0)));
        let _ = app.react(Message::TaskPressed(id.clone(), 10));
        let _ = app.react(Message::GridCursorMoved(Point::new(120.0, 212.0)));
        assert_eq!(app.controller.phase(), DragPhase::DraggingExisting);

        let event = KeyboardEvent::KeyPressed {
            key: Key::Named(Named::Escape),
            modified_key: Key::Named(Named::Escape),
            physical_key: iced::keyboard::key::Physical::Code(iced::keyboard::key::Code::Escape),
            location: Location::Standard,
            modifiers: Modifiers::default(),
            text: None,
            repeat: false,
        };
        let _ = app.react(Message::Keyboard(event));

        assert_eq!(app.controller.phase(), DragPhase::Idle);
        assert!(app.overrides.is_empty());
    }

    #[test]
    fn arrow_keys_navigate_days() {
        let (mut app, _service, _guard) = init_app();
        let today = app.day;

        let event = KeyboardEvent::KeyPressed {
            key: Key::Named(Named::ArrowRight),
            modified_key: Key::Named(Named::ArrowRight),
            physical_key: iced::keyboard::key::Physical::Code(iced::keyboard::key::Code::ArrowRight),
            location: Location::Standard,
            modifiers: Modifiers::default(),
            text: None,
            repeat: false,
        };
        let _ = app.react(Message::Keyboard(event));

        assert_eq!(app.day, today + chrono::Duration::days(1));
    }

    #[test]
    fn delete_shortcut_queues_mutation_for_selected_task() {
        let (mut app, _service, _guard) = init_app();
        let id = moved_task_id(&app);

        let _ = app.react(Message::TaskPressed(id.clone(), 10));
        let _ = app.react(Message::GridReleased);

        let event = KeyboardEvent::KeyPressed {
            key: Key::Character("d".into()),
            modified_key: Key::Character("d".into()),
            physical_key: iced::keyboard::key::Physical::Code(iced::keyboard::key::Code::KeyD),
            location: Location::Standard,
            modifiers: Modifiers::default(),
            text: Some("d".into()),
            repeat: false,
        };
        let _ = app.react(Message::Keyboard(event));

        assert!(app.coordinator.is_pending(&id, std::time::Instant::now()));
        assert!(app.selected_task.is_none());
    }
}
