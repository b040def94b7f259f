//! Desktop application wiring that composes the schedule grid, its gesture
//! handling, and the core task services.

pub use self::desktop::run;
pub use self::options::DesktopOptions;

mod commands;
mod desktop;
mod helpers;
mod message;
mod options;
mod seeding;
mod state;
mod theme;
mod update;
mod views;

#[cfg(test)]
mod tests;
