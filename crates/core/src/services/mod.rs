mod tasks;

pub use tasks::{DaySnapshot, TasksService};
