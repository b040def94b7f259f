//! Gesture state machine for the schedule grid.
//!
//! The controller consumes a closed set of discrete transitions (press
//! start, move, release, timer fired, scroll, cancel) and emits effects; it
//! owns no real timers and issues no mutations itself, so the same machine
//! drives any gesture source. The embedding shell schedules the timers it is
//! told to and routes each fire back through [`DragController::timer_fired`].
//!
//! New-item path: `Idle -> PendingCreate -> Dragging -> Committing -> Idle`.
//! Move path: `Idle -> DraggingExisting -> Committing -> Idle`.

use std::time::{Duration, Instant};

use crate::geometry::{hour_to_pixel, pixel_to_hour};

/// One canonical set of interaction timings; observed implementations drift
/// between variants, so these are configuration rather than constants.
#[derive(Debug, Clone, Copy)]
pub struct InteractionTimings {
    pub long_press: Duration,
    pub auto_commit: Duration,
    pub scroll_cooldown: Duration,
}

impl Default for InteractionTimings {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(600),
            auto_commit: Duration::from_millis(1200),
            scroll_cooldown: Duration::from_millis(150),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GridMetrics {
    pub start_hour: u8,
    pub end_hour: u8,
    pub hour_height: f32,
}

impl GridMetrics {
    fn hour_at(&self, offset: f32) -> u8 {
        pixel_to_hour(offset, self.start_hour, self.end_hour, self.hour_height)
    }

    fn snap(&self, hour: u8) -> f32 {
        hour_to_pixel(hour, self.start_hour, self.hour_height)
    }

    /// Last hour an item can start at and still occupy a visible row.
    fn last_slot(&self) -> u8 {
        self.end_hour.saturating_sub(1).max(self.start_hour)
    }
}

pub type TimerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    LongPress,
    AutoCommit,
    ScrollCooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Create,
    Move,
}

/// Externally visible state of the gesture machine. `Pressed` covers the
/// recognition window between press start and the long-press fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
    PendingCreate,
    Dragging,
    DraggingExisting,
    Committing,
}

/// Instructions for the embedding shell. Scheduled timers are identified so
/// late fires from an abandoned phase are provably stale.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEffect {
    Schedule {
        id: TimerId,
        kind: TimerKind,
        after: Duration,
    },
    /// Open the task-creation surface pre-filled with the resolved hour.
    OpenCreate { hour: u8 },
    /// Issue an update mutation moving a task to a new hour.
    MoveTask {
        id: String,
        from_hour: u8,
        to_hour: u8,
    },
}

#[derive(Debug, Clone)]
enum Phase {
    /// Press seen, long-press not yet fired. `timer` is `None` on the move
    /// path, which needs movement rather than a hold.
    Armed { timer: Option<TimerId> },
    PendingCreate { timer: TimerId },
    Dragging,
    DraggingExisting,
    Committing,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    pub kind: DragKind,
    pub task_id: Option<String>,
    pub origin_offset: f32,
    pub current_offset: f32,
    pub anchor_hour: u8,
    pub target_hour: u8,
    /// Pre-drag hour of the moved task; the shell reverts to it on failure.
    pub origin_hour: u8,
    pub created_at: Instant,
    phase: Phase,
}

pub struct DragController {
    metrics: GridMetrics,
    timings: InteractionTimings,
    session: Option<DragSession>,
    next_timer: TimerId,
    scroll_suppressed: bool,
    cooldown_timer: Option<TimerId>,
}

impl DragController {
    /// Movement under this tolerance keeps a held press a press.
    pub const MOVE_TOLERANCE: f32 = 8.0;

    pub fn new(metrics: GridMetrics, timings: InteractionTimings) -> Self {
        Self {
            metrics,
            timings,
            session: None,
            next_timer: 0,
            scroll_suppressed: false,
            cooldown_timer: None,
        }
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    pub fn set_metrics(&mut self, metrics: GridMetrics) {
        self.metrics = metrics;
    }

    pub fn phase(&self) -> DragPhase {
        match self.session.as_ref().map(|session| &session.phase) {
            None => DragPhase::Idle,
            Some(Phase::Armed { .. }) => DragPhase::Pressed,
            Some(Phase::PendingCreate { .. }) => DragPhase::PendingCreate,
            Some(Phase::Dragging) => DragPhase::Dragging,
            Some(Phase::DraggingExisting) => DragPhase::DraggingExisting,
            Some(Phase::Committing) => DragPhase::Committing,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Task hidden from its slot while a move drag is in flight.
    pub fn dragging_task(&self) -> Option<&str> {
        let session = self.session.as_ref()?;
        match session.phase {
            Phase::DraggingExisting => session.task_id.as_deref(),
            _ => None,
        }
    }

    /// Offset of the floating ghost while a drag is in flight.
    pub fn ghost_offset(&self) -> Option<f32> {
        let session = self.session.as_ref()?;
        match session.phase {
            Phase::Dragging | Phase::DraggingExisting => Some(session.current_offset),
            _ => None,
        }
    }

    /// Press at `offset`; `hit` names the task under the press and its
    /// rendered hour, when there is one. Ignored while a session is active
    /// or while scroll suppression holds.
    pub fn press_start(&mut self, offset: f32, hit: Option<(String, u8)>) -> Vec<DragEffect> {
        if self.session.is_some() || self.scroll_suppressed {
            return Vec::new();
        }

        let anchor = self.metrics.hour_at(offset).min(self.metrics.last_slot());
        let mut effects = Vec::new();

        let (kind, task_id, origin_hour, timer) = match hit {
            Some((task_id, hour)) => (DragKind::Move, Some(task_id), hour, None),
            None => {
                let timer = self.arm_timer();
                effects.push(DragEffect::Schedule {
                    id: timer,
                    kind: TimerKind::LongPress,
                    after: self.timings.long_press,
                });
                (DragKind::Create, None, anchor, Some(timer))
            }
        };

        self.session = Some(DragSession {
            kind,
            task_id,
            origin_offset: offset,
            current_offset: offset,
            anchor_hour: anchor,
            target_hour: anchor,
            origin_hour,
            created_at: Instant::now(),
            phase: Phase::Armed { timer },
        });
        effects
    }

    /// Movement tick; recomputes the provisional target on every call.
    pub fn moved(&mut self, offset: f32) -> Vec<DragEffect> {
        let hour = self.metrics.hour_at(offset).min(self.metrics.last_slot());
        let mut abandoned = false;
        if let Some(session) = self.session.as_mut() {
            session.current_offset = offset;
            let travelled = (offset - session.origin_offset).abs();

            match session.phase {
                Phase::Armed { .. } => {
                    if travelled > Self::MOVE_TOLERANCE {
                        match session.kind {
                            // A wandering press is a scroll, not a long press.
                            DragKind::Create => abandoned = true,
                            DragKind::Move => {
                                session.phase = Phase::DraggingExisting;
                                session.target_hour = hour;
                            }
                        }
                    }
                }
                Phase::PendingCreate { .. } => {
                    if travelled > Self::MOVE_TOLERANCE {
                        // Entering the drag abandons the auto-commit timer;
                        // its eventual fire no longer matches an armed id.
                        session.phase = Phase::Dragging;
                        session.target_hour = hour;
                    }
                }
                Phase::Dragging | Phase::DraggingExisting => {
                    session.target_hour = hour;
                }
                Phase::Committing => {}
            }
        }
        if abandoned {
            self.session = None;
        }
        Vec::new()
    }

    pub fn released(&mut self) -> Vec<DragEffect> {
        let Some(mut session) = self.session.take() else {
            return Vec::new();
        };
        let effects = match session.phase {
            Phase::Armed { .. } => {
                // Too short for a long press, too still for a move; the
                // session stays dropped.
                return Vec::new();
            }
            Phase::PendingCreate { .. } => {
                session.phase = Phase::Committing;
                vec![DragEffect::OpenCreate {
                    hour: session.anchor_hour,
                }]
            }
            Phase::Dragging => {
                let hour = session.target_hour;
                session.current_offset = self.metrics.snap(hour);
                session.phase = Phase::Committing;
                vec![DragEffect::OpenCreate { hour }]
            }
            Phase::DraggingExisting => {
                let to_hour = session.target_hour;
                session.current_offset = self.metrics.snap(to_hour);
                session.phase = Phase::Committing;
                vec![DragEffect::MoveTask {
                    id: session.task_id.clone().unwrap_or_default(),
                    from_hour: session.origin_hour,
                    to_hour,
                }]
            }
            Phase::Committing => Vec::new(),
        };
        self.session = Some(session);
        effects
    }

    /// A scheduled timer fired. Ids that no longer match an armed timer are
    /// stale (the phase that scheduled them was left) and do nothing.
    pub fn timer_fired(&mut self, id: TimerId) -> Vec<DragEffect> {
        if self.cooldown_timer == Some(id) {
            self.cooldown_timer = None;
            self.scroll_suppressed = false;
            return Vec::new();
        }

        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        match session.phase {
            Phase::Armed { timer: Some(armed) } if armed == id => {
                let auto_commit = self.next_timer + 1;
                self.next_timer = auto_commit;
                session.phase = Phase::PendingCreate { timer: auto_commit };
                vec![DragEffect::Schedule {
                    id: auto_commit,
                    kind: TimerKind::AutoCommit,
                    after: self.timings.auto_commit,
                }]
            }
            Phase::PendingCreate { timer } if timer == id => {
                // Held still through the auto-commit window: a tap-create at
                // the anchor, without ever entering `Dragging`.
                let hour = session.anchor_hour;
                session.phase = Phase::Committing;
                vec![DragEffect::OpenCreate { hour }]
            }
            _ => Vec::new(),
        }
    }

    /// Scroll activity on the containing view. Long-press recognition is
    /// suppressed immediately and held through a cool-down after the last
    /// scroll event; an armed press or pending create is discarded.
    pub fn scroll_began(&mut self) -> Vec<DragEffect> {
        self.scroll_suppressed = true;
        if matches!(
            self.session.as_ref().map(|s| &s.phase),
            Some(Phase::Armed { .. }) | Some(Phase::PendingCreate { .. })
        ) {
            self.session = None;
        }

        let timer = self.arm_timer();
        self.cooldown_timer = Some(timer);
        vec![DragEffect::Schedule {
            id: timer,
            kind: TimerKind::ScrollCooldown,
            after: self.timings.scroll_cooldown,
        }]
    }

    /// Discard the session with no data effect; a commit already in flight
    /// is past the point of cancellation.
    pub fn cancel(&mut self) {
        if !matches!(
            self.session.as_ref().map(|s| &s.phase),
            Some(Phase::Committing)
        ) {
            self.session = None;
        }
    }

    /// The mutation or creation surface owning the commit has resolved
    /// (either way); the controller returns to idle, fully usable.
    pub fn commit_resolved(&mut self) {
        self.session = None;
    }

    fn arm_timer(&mut self) -> TimerId {
        self.next_timer += 1;
        self.next_timer
    }
}
