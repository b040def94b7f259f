pub use dayplan_core as core;
pub use dayplan_core::config;
pub use dayplan_core::database as db;
pub use dayplan_core::model;
pub use dayplan_core::AppConfig;

pub use dayplan_desktop as desktop;
pub use dayplan_desktop::DesktopOptions;
