//! Message definitions passed around the desktop update loop.

use std::result::Result;

use chrono::NaiveDate;
use dayplan_core::drag::TimerId;
use dayplan_core::model::Priority;
use dayplan_core::DaySnapshot;
use iced::keyboard::Event as KeyboardEvent;
use iced::{Point, Task};

use crate::app::state::GridMutation;

#[derive(Debug, Clone)]
pub(crate) enum Message {
    DayLoaded(NaiveDate, Result<DaySnapshot, String>),
    RefreshTick,
    ToggleTheme,
    GoToday,
    ShiftDay(i64),
    GridPressed,
    TaskPressed(String, u8),
    GridCursorMoved(Point),
    GridReleased,
    GridScrolled,
    DragTimerFired(TimerId),
    AddTaskPressed,
    DraftTitleChanged(String),
    DraftSubjectChanged(String),
    DraftMinutesChanged(String),
    DraftPriorityPicked(Priority),
    DraftSubmit,
    DraftCancelled,
    DeleteSelected,
    MutationFinished(GridMutation, Result<(), String>),
    RemotePayload(serde_json::Value),
    RemoteApplied(String, Result<(), String>),
    Keyboard(KeyboardEvent),
}

pub(crate) type Effect = Task<Message>;
