//! Normalization of push/change-feed payloads at the transport boundary.
//!
//! Emitters nest the same logical entity several different ways; everything
//! past this module only ever sees the single [`RemoteEvent`] envelope, and
//! only that envelope is consulted against the pending-mutation set.

use serde_json::Value;
use thiserror::Error;

use crate::model::TaskPatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteEventKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteEvent {
    pub id: String,
    pub kind: RemoteEventKind,
    /// Entity fields carried by the event; absent for deletions.
    pub patch: Option<TaskPatch>,
}

#[derive(Debug, Error)]
pub enum RemoteEventError {
    #[error("event payload carries no recognizable kind")]
    MissingKind,
    #[error("unknown event kind '{0}'")]
    UnknownKind(String),
    #[error("event payload carries no entity id")]
    MissingId,
    #[error("malformed entity payload: {0}")]
    MalformedEntity(#[from] serde_json::Error),
}

/// Keys under which emitters have been observed to announce the event kind.
const KIND_KEYS: &[&str] = &["type", "event", "action", "name"];
/// Keys under which emitters nest the entity payload.
const ENTITY_KEYS: &[&str] = &["task", "data", "payload", "record"];
const ID_KEYS: &[&str] = &["id", "taskId", "entityId"];

impl RemoteEvent {
    pub fn normalize(value: &Value) -> Result<Self, RemoteEventError> {
        let raw_kind = KIND_KEYS
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .ok_or(RemoteEventError::MissingKind)?;
        let kind = parse_kind(raw_kind)?;

        let entity = unwrap_entity(value);
        let id = ID_KEYS
            .iter()
            .find_map(|key| entity.get(*key).and_then(Value::as_str))
            .or_else(|| {
                ID_KEYS
                    .iter()
                    .find_map(|key| value.get(*key).and_then(Value::as_str))
            })
            .ok_or(RemoteEventError::MissingId)?
            .to_string();

        let patch = match kind {
            RemoteEventKind::Deleted => None,
            _ => Some(serde_json::from_value::<TaskPatch>(entity.clone())?),
        };

        Ok(Self { id, kind, patch })
    }
}

fn parse_kind(raw: &str) -> Result<RemoteEventKind, RemoteEventError> {
    // Dotted names ("task.updated") and bare verbs ("update") both occur.
    let verb = raw.rsplit('.').next().unwrap_or(raw).to_ascii_lowercase();
    match verb.as_str() {
        "create" | "created" => Ok(RemoteEventKind::Created),
        "update" | "updated" | "change" | "changed" => Ok(RemoteEventKind::Updated),
        "delete" | "deleted" | "remove" | "removed" => Ok(RemoteEventKind::Deleted),
        _ => Err(RemoteEventError::UnknownKind(raw.to_string())),
    }
}

/// Walk through the known nesting keys until the innermost entity object.
fn unwrap_entity(value: &Value) -> &Value {
    let mut current = value;
    loop {
        let nested = ENTITY_KEYS
            .iter()
            .find_map(|key| current.get(*key))
            .filter(|inner| inner.is_object());
        match nested {
            Some(inner) => current = inner,
            None => return current,
        }
    }
}
