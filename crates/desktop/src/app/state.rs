//! Shared state models that keep the schedule grid in sync with the task store.

use std::time::Instant;

use dayplan_core::model::Priority;
use dayplan_core::DaySnapshot;

#[derive(Debug, Clone)]
pub(crate) struct DayStore {
    pub(crate) snapshot: Option<DaySnapshot>,
    pub(crate) state: LoadState,
    pub(crate) version: u64,
    pub(crate) last_refreshed: Option<Instant>,
}

impl DayStore {
    pub(crate) fn new() -> Self {
        Self {
            snapshot: None,
            state: LoadState::Idle,
            version: 0,
            last_refreshed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum LoadState {
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Clone)]
pub(crate) struct StatusToast {
    pub(crate) message: String,
    pub(crate) kind: ToastKind,
    pub(crate) created_at: Instant,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ToastKind {
    Info,
    Error,
}

/// Draft for the task-creation panel, pre-filled with the hour the gesture
/// resolved to.
#[derive(Debug, Clone)]
pub(crate) struct CreateDraft {
    pub(crate) hour: u8,
    pub(crate) title: String,
    pub(crate) subject: String,
    pub(crate) minutes: String,
    pub(crate) priority: Priority,
    pub(crate) submitting: bool,
}

impl CreateDraft {
    pub(crate) fn at(hour: u8) -> Self {
        Self {
            hour,
            title: String::new(),
            subject: String::new(),
            minutes: String::new(),
            priority: Priority::Medium,
            submitting: false,
        }
    }
}

/// A grid-originated write in flight against the task store.
#[derive(Debug, Clone)]
pub(crate) enum GridMutation {
    Create { id: String },
    Move { id: String, from_hour: u8, to_hour: u8 },
    Delete { id: String },
}

impl GridMutation {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            GridMutation::Create { .. } => "create task",
            GridMutation::Move { .. } => "move task",
            GridMutation::Delete { .. } => "delete task",
        }
    }

    pub(crate) fn task_id(&self) -> &str {
        match self {
            GridMutation::Create { id }
            | GridMutation::Move { id, .. }
            | GridMutation::Delete { id } => id,
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct SampleSeed {
    pub(crate) title: &'static str,
    pub(crate) subject: &'static str,
    pub(crate) hour: Option<u8>,
    pub(crate) minutes: Option<u32>,
    pub(crate) priority: Priority,
}

pub(crate) const SAMPLE_SEEDS: &[SampleSeed] = &[
    SampleSeed {
        title: "Algebra problem set",
        subject: "Math",
        hour: Some(10),
        minutes: Some(60),
        priority: Priority::High,
    },
    SampleSeed {
        title: "Essay outline",
        subject: "English",
        hour: None,
        minutes: Some(45),
        priority: Priority::Medium,
    },
    SampleSeed {
        title: "Chemistry lab write-up",
        subject: "Chemistry",
        hour: Some(15),
        minutes: Some(90),
        priority: Priority::High,
    },
    SampleSeed {
        title: "Flashcard review",
        subject: "Spanish",
        hour: None,
        minutes: Some(20),
        priority: Priority::Low,
    },
    SampleSeed {
        title: "Reading chapters 4-5",
        subject: "History",
        hour: None,
        minutes: Some(40),
        priority: Priority::Medium,
    },
];
