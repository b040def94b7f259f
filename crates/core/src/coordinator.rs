//! Optimistic-mutation coordination between local edits and the push feed.
//!
//! From the moment an entity is recorded pending (strictly before its
//! request is dispatched) until that mutation resolves, every remote event
//! for the same entity is suppressed: local intent wins until its own
//! round-trip completes. A bounded safety timeout clears entries whose
//! response is lost so no entity is suppressed forever.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn label(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PendingMutation {
    pub kind: MutationKind,
    pub submitted_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteDecision {
    Apply,
    Suppressed,
}

#[derive(Debug)]
pub struct MutationCoordinator {
    pending: HashMap<String, PendingMutation>,
    safety_timeout: Duration,
}

impl Default for MutationCoordinator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SAFETY_TIMEOUT)
    }
}

impl MutationCoordinator {
    pub const DEFAULT_SAFETY_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(safety_timeout: Duration) -> Self {
        Self {
            pending: HashMap::new(),
            safety_timeout,
        }
    }

    /// Mark `entity_id` as having unresolved local state. Must run before
    /// the mutation request is dispatched, closing the window in which a
    /// racing push event could be applied ahead of the local intent.
    pub fn record_pending(&mut self, entity_id: &str, kind: MutationKind, now: Instant) {
        self.pending.insert(
            entity_id.to_string(),
            PendingMutation {
                kind,
                submitted_at: now,
            },
        );
    }

    pub fn is_pending(&self, entity_id: &str, now: Instant) -> bool {
        self.pending
            .get(entity_id)
            .map(|pending| now.duration_since(pending.submitted_at) < self.safety_timeout)
            .unwrap_or(false)
    }

    /// The owning mutation's response is final (success or failure).
    /// Returns whether an entry was actually cleared.
    pub fn resolve_pending(&mut self, entity_id: &str) -> bool {
        self.pending.remove(entity_id).is_some()
    }

    /// Arbitrate a remote event for `entity_id`.
    pub fn on_remote_event(&mut self, entity_id: &str, now: Instant) -> RemoteDecision {
        self.expire_stale(now);
        if self.is_pending(entity_id, now) {
            RemoteDecision::Suppressed
        } else {
            RemoteDecision::Apply
        }
    }

    /// Drop entries whose response never arrived within the safety timeout.
    pub fn expire_stale(&mut self, now: Instant) {
        let timeout = self.safety_timeout;
        self.pending
            .retain(|_, pending| now.duration_since(pending.submitted_at) < timeout);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn suppresses_until_resolved_then_applies() {
        let mut coordinator = MutationCoordinator::default();
        let now = Instant::now();

        coordinator.record_pending("t1", MutationKind::Update, now);
        assert_eq!(
            coordinator.on_remote_event("t1", now),
            RemoteDecision::Suppressed
        );
        assert_eq!(coordinator.on_remote_event("t2", now), RemoteDecision::Apply);

        assert!(coordinator.resolve_pending("t1"));
        assert_eq!(coordinator.on_remote_event("t1", now), RemoteDecision::Apply);
        assert!(!coordinator.resolve_pending("t1"));
    }

    #[test]
    fn safety_timeout_bounds_a_lost_response() {
        let mut coordinator = MutationCoordinator::new(Duration::from_secs(5));
        let submitted = Instant::now();
        coordinator.record_pending("t1", MutationKind::Delete, submitted);

        let before_expiry = submitted + Duration::from_secs(4);
        assert!(coordinator.is_pending("t1", before_expiry));
        assert_eq!(
            coordinator.on_remote_event("t1", before_expiry),
            RemoteDecision::Suppressed
        );

        let after_expiry = submitted + Duration::from_secs(6);
        assert_eq!(
            coordinator.on_remote_event("t1", after_expiry),
            RemoteDecision::Apply
        );
        assert!(!coordinator.has_pending());
    }

    #[test]
    fn re_recording_refreshes_the_deadline() {
        let mut coordinator = MutationCoordinator::new(Duration::from_secs(5));
        let first = Instant::now();
        coordinator.record_pending("t1", MutationKind::Update, first);
        let second = first + Duration::from_secs(4);
        coordinator.record_pending("t1", MutationKind::Update, second);

        assert!(coordinator.is_pending("t1", first + Duration::from_secs(7)));
        assert_eq!(coordinator.pending_count(), 1);
    }
}
