//! Shared request-parsing helpers for inbound HTTP adapters.
//!
//! Malformed path identifiers cannot name a stored record, so they are
//! reported as `not_found` like any other unknown id.

use uuid::Uuid;

use crate::domain::{Error, TaskId, UserId};

pub(crate) fn parse_task_id(raw: &str) -> Result<TaskId, Error> {
    Uuid::parse_str(raw)
        .map(TaskId::from_uuid)
        .map_err(|_| Error::not_found("Task not found"))
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    Uuid::parse_str(raw)
        .map(UserId::from_uuid)
        .map_err(|_| Error::not_found("User not found"))
}
