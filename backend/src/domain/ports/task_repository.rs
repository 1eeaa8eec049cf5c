//! Port abstraction for task persistence.
//!
//! Title uniqueness is global across owners. Adapters enforce it atomically
//! with the write and report a lost race as
//! [`TaskPersistenceError::DuplicateTitle`].

use async_trait::async_trait;

use crate::domain::validation::{Entity, Field, ValidationErrors, Violation};
use crate::domain::{Error, Task, TaskId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
        /// Another task already uses the title.
        DuplicateTitle => "task title already taken",
        /// The owner referenced by the task does not exist.
        UnknownOwner => "task owner does not exist",
        /// The task to update does not exist.
        Missing => "task not found",
    }
}

impl From<TaskPersistenceError> for Error {
    fn from(error: TaskPersistenceError) -> Self {
        match error {
            TaskPersistenceError::Connection { message } => {
                Self::service_unavailable(format!("task repository unavailable: {message}"))
            }
            TaskPersistenceError::Query { message } => {
                Self::internal(format!("task repository error: {message}"))
            }
            TaskPersistenceError::DuplicateTitle => {
                ValidationErrors::single(Entity::Task, Field::Title, Violation::Taken).into()
            }
            TaskPersistenceError::UnknownOwner => {
                Self::conflict("task owner no longer exists")
            }
            TaskPersistenceError::Missing => Self::not_found("Task not found"),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task; fails with `DuplicateTitle` if the title is taken.
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError>;

    /// Overwrite the editable fields of an existing task.
    async fn update(&self, task: &Task) -> Result<(), TaskPersistenceError>;

    /// Remove a task. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &TaskId) -> Result<bool, TaskPersistenceError>;

    /// Fetch a task by identifier.
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskPersistenceError>;

    /// Fetch the task holding `title`, whoever owns it.
    async fn find_by_title(&self, title: &str) -> Result<Option<Task>, TaskPersistenceError>;

    /// All tasks in creation order.
    async fn list(&self) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Tasks owned by `owner` in creation order.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError>;
}
