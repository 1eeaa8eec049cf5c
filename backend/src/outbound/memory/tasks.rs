//! In-memory task store.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{Task, TaskId, UserId};

/// Tasks in creation order.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> TaskPersistenceError {
    TaskPersistenceError::query("task store lock poisoned")
}

fn title_held_by_other(tasks: &[Task], candidate: &Task) -> bool {
    tasks
        .iter()
        .any(|task| task.title() == candidate.title() && task.id() != candidate.id())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        let mut tasks = self.tasks.write().map_err(|_| poisoned())?;
        if title_held_by_other(&tasks, task) {
            return Err(TaskPersistenceError::duplicate_title());
        }
        if tasks.iter().any(|existing| existing.id() == task.id()) {
            return Err(TaskPersistenceError::query("task id already exists"));
        }
        tasks.push(task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        let mut tasks = self.tasks.write().map_err(|_| poisoned())?;
        if title_held_by_other(&tasks, task) {
            return Err(TaskPersistenceError::duplicate_title());
        }
        let slot = tasks
            .iter_mut()
            .find(|existing| existing.id() == task.id())
            .ok_or_else(TaskPersistenceError::missing)?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, TaskPersistenceError> {
        let mut tasks = self.tasks.write().map_err(|_| poisoned())?;
        let before = tasks.len();
        tasks.retain(|task| task.id() != id);
        Ok(tasks.len() != before)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let tasks = self.tasks.read().map_err(|_| poisoned())?;
        Ok(tasks.iter().find(|task| task.id() == id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Task>, TaskPersistenceError> {
        let tasks = self.tasks.read().map_err(|_| poisoned())?;
        Ok(tasks.iter().find(|task| task.title() == title).cloned())
    }

    async fn list(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let tasks = self.tasks.read().map_err(|_| poisoned())?;
        Ok(tasks.clone())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let tasks = self.tasks.read().map_err(|_| poisoned())?;
        Ok(tasks
            .iter()
            .filter(|task| task.is_owned_by(owner))
            .cloned()
            .collect())
    }
}
