//! PostgreSQL-backed [`TaskRepository`].
//!
//! The `tasks_title_key` unique constraint spans every owner, so two
//! concurrent inserts with the same title cannot both commit. The loser gets
//! [`TaskPersistenceError::DuplicateTitle`].

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{Task, TaskFields, TaskId, TaskStatus, UserId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewTaskRow, TaskRow, TaskUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

const TITLE_CONSTRAINT: &str = "tasks_title_key";
const OWNER_CONSTRAINT: &str = "tasks_user_id_fkey";

#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    TaskPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> TaskPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => TaskPersistenceError::connection(message),
        DieselFailure::Query(message) => TaskPersistenceError::query(message),
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(TITLE_CONSTRAINT) =>
        {
            TaskPersistenceError::duplicate_title()
        }
        DieselFailure::ForeignKeyViolation { constraint }
            if constraint.as_deref() == Some(OWNER_CONSTRAINT) =>
        {
            TaskPersistenceError::unknown_owner()
        }
        DieselFailure::UniqueViolation { constraint }
        | DieselFailure::ForeignKeyViolation { constraint } => {
            warn!(?constraint, %operation, "unexpected constraint violation on tasks");
            TaskPersistenceError::query("constraint violation")
        }
    }
}

fn row_to_task(row: TaskRow) -> Result<Task, TaskPersistenceError> {
    let status = row.status.parse::<TaskStatus>().map_err(|err| {
        warn!(task_id = %row.id, value = %err.value, "stored task status unrecognised");
        TaskPersistenceError::query(err.to_string())
    })?;
    Ok(Task::new(
        TaskId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        TaskFields {
            title: row.title,
            content: row.content,
            status,
            deadline: row.deadline,
        },
    ))
}

fn rows_to_tasks(rows: Vec<TaskRow>) -> Result<Vec<Task>, TaskPersistenceError> {
    rows.into_iter().map(row_to_task).collect()
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTaskRow {
            id: *task.id().as_uuid(),
            user_id: *task.owner_id().as_uuid(),
            title: task.title(),
            content: task.content(),
            status: task.status().as_str(),
            deadline: task.deadline(),
        };
        diesel::insert_into(tasks::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert task"))
    }

    async fn update(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = TaskUpdate {
            title: task.title(),
            content: task.content(),
            status: task.status().as_str(),
            deadline: task.deadline(),
            updated_at: Utc::now(),
        };
        let updated = diesel::update(tasks::table.find(task.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "update task"))?;
        if updated == 0 {
            return Err(TaskPersistenceError::missing());
        }
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(tasks::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete task"))?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TaskRow> = tasks::table
            .find(id.as_uuid())
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find task by id"))?;
        row.map(row_to_task).transpose()
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TaskRow> = tasks::table
            .filter(tasks::title.eq(title))
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find task by title"))?;
        row.map(row_to_task).transpose()
    }

    async fn list(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .select(TaskRow::as_select())
            .order_by((tasks::created_at.asc(), tasks::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list tasks"))?;
        rows_to_tasks(rows)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::user_id.eq(owner.as_uuid()))
            .select(TaskRow::as_select())
            .order_by((tasks::created_at.asc(), tasks::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list tasks by owner"))?;
        rows_to_tasks(rows)
    }
}
