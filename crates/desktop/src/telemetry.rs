//! Collects lightweight desktop telemetry so grid interaction tweaks can be validated during prototyping.

use parking_lot::Mutex;

#[derive(Debug, Clone)]
pub enum Event {
    AppStarted,
    DayChanged(String),
    RefreshRequested(String),
    RefreshCompleted { day: String, count: usize },
    RefreshFailed { day: String, error: String },
    DragStarted(String),
    DragCommitted(String),
    MutationApplied(String),
    MutationFailed { action: String, error: String },
    RemoteApplied(String),
    RemoteSuppressed(String),
    RemoteRejected(String),
}

pub struct Handle {
    #[cfg(feature = "telemetry")]
    events: Mutex<Vec<Event>>,
}

impl Handle {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "telemetry")]
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn record(&self, event: Event) {
        #[cfg(feature = "telemetry")]
        {
            match &event {
                Event::AppStarted => tracing::debug!("desktop telemetry app started"),
                Event::DayChanged(day) => {
                    tracing::debug!(day = day.as_str(), "desktop telemetry day changed")
                }
                Event::RefreshRequested(day) => {
                    tracing::debug!(day = day.as_str(), "desktop telemetry refresh requested")
                }
                Event::RefreshCompleted { day, count } => {
                    tracing::debug!(
                        day = day.as_str(),
                        count,
                        "desktop telemetry refresh completed"
                    );
                }
                Event::RefreshFailed { day, error } => {
                    tracing::debug!(day = day.as_str(), error = %error, "desktop telemetry refresh failed")
                }
                Event::DragStarted(kind) => {
                    tracing::debug!(kind = kind.as_str(), "desktop telemetry drag started")
                }
                Event::DragCommitted(kind) => {
                    tracing::debug!(kind = kind.as_str(), "desktop telemetry drag committed")
                }
                Event::MutationApplied(action) => tracing::debug!(
                    action = action.as_str(),
                    "desktop telemetry mutation applied"
                ),
                Event::MutationFailed { action, error } => tracing::debug!(
                    action = action.as_str(),
                    error = %error,
                    "desktop telemetry mutation failed"
                ),
                Event::RemoteApplied(kind) => {
                    tracing::debug!(kind = kind.as_str(), "desktop telemetry remote applied")
                }
                Event::RemoteSuppressed(id) => {
                    tracing::debug!(task_id = id.as_str(), "desktop telemetry remote suppressed")
                }
                Event::RemoteRejected(error) => {
                    tracing::debug!(error = error.as_str(), "desktop telemetry remote rejected")
                }
            }
            self.events.lock().push(event);
        }
        #[cfg(not(feature = "telemetry"))]
        {
            let _ = event;
        }
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        cfg!(feature = "telemetry")
    }

    #[cfg(test)]
    pub(crate) fn events_len(&self) -> usize {
        #[cfg(feature = "telemetry")]
        {
            self.events.lock().len()
        }
        #[cfg(not(feature = "telemetry"))]
        {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_events_counts_when_enabled() {
        let handle = Handle::new();
        handle.record(Event::RefreshCompleted {
            day: "2026-03-02".into(),
            count: 3,
        });
        if handle.is_enabled() {
            assert_eq!(handle.events_len(), 1);
        } else {
            assert_eq!(handle.events_len(), 0);
        }
    }
}
