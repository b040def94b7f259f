//! Desktop crate facade exposing the iced-based dayplan schedule grid to the wider workspace.

mod app;
mod telemetry;

pub use app::{run, DesktopOptions};
