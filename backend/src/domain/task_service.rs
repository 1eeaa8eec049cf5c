//! Task use-cases: access control, then validation, then persistence.
//!
//! Reads are public. Every mutation resolves the stored task first so the
//! ownership check runs against the persisted owner, never against anything
//! the caller supplied. A denial returns before validation runs, so a
//! forbidden edit reveals nothing about the payload.

use std::sync::Arc;

use tracing::info;

use super::access::{Intent, authorize, require_identity};
use super::notice::DELETE_PROMPT;
use super::ports::TaskRepository;
use super::validation::{ValidationEngine, ValidationMode};
use super::{Error, Task, TaskChanges, TaskDraft, TaskId, UserId};

/// First phase of a two-phase delete.
///
/// Holding a request does not lock the task. Passing it to
/// [`TaskService::confirm_delete`] deletes; dropping it or passing it to
/// [`TaskService::cancel_delete`] leaves the task untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRequest {
    task_id: TaskId,
}

impl DeletionRequest {
    /// Rebuild a request from a client round-trip.
    pub fn for_task(task_id: TaskId) -> Self {
        Self { task_id }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Question the user must confirm.
    pub fn prompt(&self) -> &'static str {
        DELETE_PROMPT
    }
}

/// Orchestrates task reads and mutations.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    validation: ValidationEngine,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, validation: ValidationEngine) -> Self {
        Self { tasks, validation }
    }

    /// Every task, in creation order. Public.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, Error> {
        Ok(self.tasks.list().await?)
    }

    /// One task, if it exists. Public.
    pub async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, Error> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Like [`Self::get_task`] but a missing task is `not_found`.
    pub async fn show_task(&self, id: &TaskId) -> Result<Task, Error> {
        self.get_task(id)
            .await?
            .ok_or_else(|| Error::not_found("Task not found"))
    }

    /// Gate for the new-task form.
    pub fn authorize_new_task(&self, actor: Option<&UserId>) -> Result<(), Error> {
        authorize(actor, Intent::CreateTask)
    }

    /// Gate for the edit form; returns the task to prefill it.
    pub async fn edit_task(&self, actor: Option<&UserId>, id: &TaskId) -> Result<Task, Error> {
        self.owned_task(actor, id).await
    }

    pub async fn create_task(
        &self,
        actor: Option<&UserId>,
        draft: TaskDraft,
    ) -> Result<Task, Error> {
        self.authorize_new_task(actor)?;
        let owner = *require_identity(actor)?;

        let fields = self
            .validation
            .validate_task(&draft, ValidationMode::Create)
            .await?;
        let task = Task::new(TaskId::random(), owner, fields);
        self.tasks.insert(&task).await?;

        info!(task_id = %task.id(), owner_id = %owner, "task created");
        Ok(task)
    }

    pub async fn update_task(
        &self,
        actor: Option<&UserId>,
        id: &TaskId,
        changes: TaskChanges,
    ) -> Result<Task, Error> {
        let task = self.owned_task(actor, id).await?;

        let draft = changes.apply_to(&task);
        let fields = self
            .validation
            .validate_task(&draft, ValidationMode::Update(*task.id()))
            .await?;
        let updated = task.with_fields(fields);
        self.tasks.update(&updated).await?;

        info!(task_id = %updated.id(), "task updated");
        Ok(updated)
    }

    /// Check the actor may delete `id` and hand back the confirmation step.
    pub async fn request_delete(
        &self,
        actor: Option<&UserId>,
        id: &TaskId,
    ) -> Result<DeletionRequest, Error> {
        let task = self.owned_task(actor, id).await?;
        Ok(DeletionRequest::for_task(*task.id()))
    }

    /// Delete the task named by `request`. Ownership is checked again, since
    /// the request may have been built from client input.
    pub async fn confirm_delete(
        &self,
        actor: Option<&UserId>,
        request: DeletionRequest,
    ) -> Result<Task, Error> {
        let task = self.owned_task(actor, request.task_id()).await?;
        if !self.tasks.delete(task.id()).await? {
            return Err(Error::not_found("Task not found"));
        }
        info!(task_id = %task.id(), "task deleted");
        Ok(task)
    }

    /// Decline a pending delete. Nothing is written.
    pub fn cancel_delete(&self, request: DeletionRequest) -> TaskId {
        info!(task_id = %request.task_id(), "task deletion cancelled");
        request.task_id
    }

    async fn owned_task(&self, actor: Option<&UserId>, id: &TaskId) -> Result<Task, Error> {
        require_identity(actor)?;
        let task = self.show_task(id).await?;
        authorize(actor, Intent::ModifyTask {
            owner: task.owner_id(),
        })?;
        Ok(task)
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
