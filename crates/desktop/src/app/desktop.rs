//! Iced `Application` implementation powering the dayplan desktop shell lifecycle.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use dayplan_core::{
    AppConfig, ConstraintSet, DragController, GridMetrics, InteractionTimings,
    MutationCoordinator, TasksService,
};
use iced::event::{self, Event};
use iced::time;
use iced::widget::Id;
use iced::Subscription;
use iced::{window, Size, Theme};

use crate::app::commands::load_day_command;
use crate::app::helpers::detect_theme;
use crate::app::message::{Effect, Message};
use crate::app::options::{DesktopFlags, DesktopOptions};
use crate::app::seeding::maybe_seed_sample_data;
use crate::app::state::{CreateDraft, DayStore, LoadState, StatusToast};
use crate::app::theme::Palette;
use crate::app::views;
use crate::telemetry::{self, Event as TelemetryEvent};

/// Vertical pixels per grid hour; the single scale shared by layout,
/// hit-testing, and ghost positioning.
pub(crate) const HOUR_HEIGHT: f32 = 64.0;

pub fn run(options: DesktopOptions) -> iced::Result {
    let _ = tracing_subscriber::fmt::try_init();

    let boot_flags = DesktopFlags::from(options);
    let window_settings = window::Settings {
        size: Size::new(980.0, 760.0),
        min_size: Some(Size::new(720.0, 560.0)),
        ..window::Settings::default()
    };

    iced::application(
        move || GridShell::bootstrap(boot_flags.clone()),
        GridShell::react,
        views::compose_root,
    )
    .window(window_settings)
    .title(app_title)
    .theme(app_theme)
    .subscription(app_subscription)
    .run()
}

fn app_title(_state: &GridShell) -> String {
    format!("dayplan Desktop v{}", env!("CARGO_PKG_VERSION"))
}

fn app_theme(state: &GridShell) -> Option<Theme> {
    Some(state.theme.clone())
}

fn app_subscription(state: &GridShell) -> Subscription<Message> {
    state.subscription()
}

pub(crate) struct GridShell {
    pub(crate) service: Option<TasksService>,
    pub(crate) day: NaiveDate,
    pub(crate) store: DayStore,
    pub(crate) constraints: ConstraintSet,
    pub(crate) allocation: BTreeMap<String, u8>,
    pub(crate) overrides: HashMap<String, u8>,
    pub(crate) controller: DragController,
    pub(crate) coordinator: MutationCoordinator,
    pub(crate) draft: Option<CreateDraft>,
    pub(crate) draft_title_id: Id,
    pub(crate) selected_task: Option<String>,
    pub(crate) last_cursor_y: f32,
    pub(crate) theme: Theme,
    pub(crate) palette: Palette,
    pub(crate) telemetry: telemetry::Handle,
    pub(crate) refresh_interval: Duration,
    pub(crate) status: Option<StatusToast>,
}

impl GridShell {
    pub(super) fn bootstrap(flags: DesktopFlags) -> (Self, Effect) {
        let theme = detect_theme();
        let palette = Palette::for_theme(&theme);
        let telemetry = telemetry::Handle::new();
        let day = Utc::now().date_naive();

        let mut store = DayStore::new();
        let mut constraints = ConstraintSet::default();
        let mut service_opt = None;
        let mut effect = Effect::none();

        match AppConfig::discover(flags.data_dir.clone()) {
            Ok(config) => match TasksService::new(config.clone()) {
                Ok(service) => {
                    telemetry.record(TelemetryEvent::AppStarted);
                    if should_seed_sample_data(&flags, &config) {
                        match maybe_seed_sample_data(&service, day) {
                            Ok(true) => tracing::debug!("seeded desktop sample data"),
                            Ok(false) => {}
                            Err(err) => {
                                tracing::warn!(error = %err, "failed to seed desktop sample data")
                            }
                        }
                    }
                    match service.constraints() {
                        Ok(set) => constraints = set,
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to load schedule constraints")
                        }
                    }
                    store.state = LoadState::Loading;
                    effect = load_day_command(service.clone(), day);
                    service_opt = Some(service);
                }
                Err(err) => {
                    store.state = LoadState::Error(err.to_string());
                }
            },
            Err(err) => {
                store.state = LoadState::Error(err.to_string());
            }
        }

        let (start_hour, end_hour) = constraints.hours();
        let controller = DragController::new(
            GridMetrics {
                start_hour,
                end_hour,
                hour_height: HOUR_HEIGHT,
            },
            InteractionTimings::default(),
        );

        (
            Self {
                service: service_opt,
                day,
                store,
                constraints,
                allocation: BTreeMap::new(),
                overrides: HashMap::new(),
                controller,
                coordinator: MutationCoordinator::new(MutationCoordinator::DEFAULT_SAFETY_TIMEOUT),
                draft: None,
                draft_title_id: Id::new("draft_title_input"),
                selected_task: None,
                last_cursor_y: 0.0,
                theme,
                palette,
                telemetry,
                refresh_interval: flags.refresh_interval,
                status: None,
            },
            effect,
        )
    }
}

fn should_seed_sample_data(flags: &DesktopFlags, config: &AppConfig) -> bool {
    if !cfg!(debug_assertions) {
        return false;
    }

    if flags.data_dir.is_some() || env::var("DAYPLAN_DATA_DIR").is_ok() {
        return false;
    }

    matches!(
        config.data_dir().file_name().and_then(|name| name.to_str()),
        Some("dev-dayplan")
    )
}

impl GridShell {
    pub(crate) fn subscription(&self) -> Subscription<Message> {
        let refresh = if self.service.is_some() {
            time::every(self.refresh_interval).map(|_| Message::RefreshTick)
        } else {
            Subscription::none()
        };

        let keyboard = event::listen_with(|event, _, _| match event {
            Event::Keyboard(key_event) => Some(Message::Keyboard(key_event)),
            _ => None,
        });

        Subscription::batch(vec![refresh, keyboard])
    }

    pub(super) fn prune_toast(&mut self) {
        if let Some(toast) = &self.status {
            if toast.created_at.elapsed() > Duration::from_secs(6) {
                self.status = None;
            }
        }
    }
}
