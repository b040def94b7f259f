pub mod allocator;
pub mod config;
pub mod constraints;
pub mod coordinator;
pub mod database;
pub mod drag;
pub mod geometry;
pub mod model;
pub mod remote;
pub mod services;
pub mod slots;

pub use config::AppConfig;
pub use constraints::ConstraintSet;
pub use coordinator::{MutationCoordinator, MutationKind, RemoteDecision};
pub use database::Database;
pub use drag::{DragController, DragEffect, GridMetrics, InteractionTimings};
pub use model::*;
pub use remote::{RemoteEvent, RemoteEventKind};
pub use services::{DaySnapshot, TasksService};
pub use slots::DayGrid;
