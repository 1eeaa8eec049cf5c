//! Task handlers.
//!
//! ```text
//! GET    /api/v1/tasks
//! GET    /api/v1/tasks/new
//! POST   /api/v1/tasks            {"title":"Buy milk","status":"todo"}
//! GET    /api/v1/tasks/{id}
//! GET    /api/v1/tasks/{id}/edit
//! PATCH  /api/v1/tasks/{id}       {"status":"done"}
//! DELETE /api/v1/tasks/{id}       prompt; ?confirm=true deletes, ?confirm=false cancels
//! ```
//!
//! Listing and detail are public. Everything else resolves the caller from
//! the session cookie and lets the task service decide.

use actix_web::{HttpResponse, delete, get, http::header, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::notice::{TASK_CREATED, TASK_DESTROYED, TASK_UPDATED};
use crate::domain::{Error, TaskChanges, TaskDraft, TaskStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_actor;
use crate::inbound::http::schemas::{DeletePromptBody, Outcome, TaskBody, TaskFormBody};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_task_id;

const TASKS_PATH: &str = "/tasks";

#[derive(Debug, Deserialize)]
struct TaskPath {
    id: String,
}

/// Deadline as a client sends it: text, or a bare number of epoch seconds.
///
/// The value is passed through untouched; the domain decides what it means.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DeadlineInput {
    Text(String),
    Number(serde_json::Number),
}

impl From<DeadlineInput> for String {
    fn from(value: DeadlineInput) -> Self {
        match value {
            DeadlineInput::Text(text) => text,
            DeadlineInput::Number(number) => number.to_string(),
        }
    }
}

/// New task. `deadline` is RFC 3339, a date, or epoch seconds; anything
/// unreadable is stored as no deadline.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[schema(example = "Buy milk")]
    pub title: String,
    pub content: Option<String>,
    #[schema(example = "todo")]
    pub status: Option<String>,
    #[schema(value_type = Option<String>, example = "2031-05-06T07:08:09Z")]
    pub deadline: Option<DeadlineInput>,
}

impl From<CreateTaskRequest> for TaskDraft {
    fn from(request: CreateTaskRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            status: request.status,
            deadline: request.deadline.map(String::from),
        }
    }
}

/// Partial task edit. Omitted fields keep their stored value; an empty
/// `deadline` clears it.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    #[schema(value_type = Option<String>)]
    pub deadline: Option<DeadlineInput>,
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(request: UpdateTaskRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            status: request.status,
            deadline: request.deadline.map(String::from),
        }
    }
}

/// Answer to the delete prompt. Absent means "ask".
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteQuery {
    pub confirm: Option<bool>,
}

fn task_path(id: impl std::fmt::Display) -> String {
    format!("{TASKS_PATH}/{id}")
}

/// Every task, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "Tasks", body = Outcome<Vec<TaskBody>>)
    ),
    tags = ["tasks"],
    operation_id = "listTasks",
    security([])
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Outcome<Vec<TaskBody>>>> {
    let tasks = state.tasks.list_tasks().await?;
    Ok(web::Json(Outcome::data(
        tasks.iter().map(TaskBody::from).collect(),
    )))
}

/// Gate and choices for the new-task form.
#[utoipa::path(
    get,
    path = "/api/v1/tasks/new",
    responses(
        (status = 200, description = "Form values", body = Outcome<TaskFormBody>),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "newTask"
)]
#[get("/tasks/new")]
pub async fn new_task(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Outcome<TaskFormBody>>> {
    let actor = current_actor(&state, &session).await?;
    state.tasks.authorize_new_task(actor.as_ref())?;
    Ok(web::Json(Outcome::data(TaskFormBody {
        statuses: TaskStatus::ALL
            .iter()
            .map(|status| status.as_str().to_owned())
            .collect(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task was successfully created", body = Outcome<TaskBody>),
        (status = 401, description = "Login required", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<HttpResponse> {
    let actor = current_actor(&state, &session).await?;
    let draft = TaskDraft::from(payload.into_inner());
    let task = state.tasks.create_task(actor.as_ref(), draft).await?;
    let location = task_path(task.id());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.clone()))
        .json(Outcome::done(TASK_CREATED, location, TaskBody::from(&task))))
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task", body = Outcome<TaskBody>),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "showTask",
    security([])
)]
#[get("/tasks/{id}")]
pub async fn show_task(
    state: web::Data<HttpState>,
    path: web::Path<TaskPath>,
) -> ApiResult<web::Json<Outcome<TaskBody>>> {
    let id = parse_task_id(&path.id)?;
    let task = state.tasks.show_task(&id).await?;
    Ok(web::Json(Outcome::data(TaskBody::from(&task))))
}

/// Values for the edit form, owner only.
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}/edit",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task", body = Outcome<TaskBody>),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Forbidden access.", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "editTask"
)]
#[get("/tasks/{id}/edit")]
pub async fn edit_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TaskPath>,
) -> ApiResult<web::Json<Outcome<TaskBody>>> {
    let actor = current_actor(&state, &session).await?;
    let id = parse_task_id(&path.id)?;
    let task = state.tasks.edit_task(actor.as_ref(), &id).await?;
    Ok(web::Json(Outcome::data(TaskBody::from(&task))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task was successfully updated.", body = Outcome<TaskBody>),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Forbidden access.", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[patch("/tasks/{id}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TaskPath>,
    payload: web::Json<UpdateTaskRequest>,
) -> ApiResult<web::Json<Outcome<TaskBody>>> {
    let actor = current_actor(&state, &session).await?;
    let id = parse_task_id(&path.id)?;
    let changes = TaskChanges::from(payload.into_inner());
    let task = state.tasks.update_task(actor.as_ref(), &id, changes).await?;
    Ok(web::Json(Outcome::done(
        TASK_UPDATED,
        task_path(task.id()),
        TaskBody::from(&task),
    )))
}

/// Two-phase delete.
///
/// Without `confirm` the response carries the prompt and nothing changes.
/// `confirm=true` deletes; `confirm=false` cancels and leaves the task as is.
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier"), DeleteQuery),
    responses(
        (status = 200, description = "Prompt, cancellation or Task was successfully destroyed."),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Forbidden access.", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<TaskPath>,
    query: web::Query<DeleteQuery>,
) -> ApiResult<HttpResponse> {
    let actor = current_actor(&state, &session).await?;
    let id = parse_task_id(&path.id)?;
    let request = state.tasks.request_delete(actor.as_ref(), &id).await?;

    let response = match query.confirm {
        None => {
            let location = task_path(request.task_id());
            HttpResponse::Ok().json(Outcome::data(DeletePromptBody {
                task_id: request.task_id().to_string(),
                prompt: request.prompt().to_owned(),
                confirm_url: format!("/api/v1{location}?confirm=true"),
                cancel_url: format!("/api/v1{location}?confirm=false"),
            }))
        }
        Some(true) => {
            let task = state.tasks.confirm_delete(actor.as_ref(), request).await?;
            HttpResponse::Ok().json(Outcome::done(
                TASK_DESTROYED,
                TASKS_PATH,
                TaskBody::from(&task),
            ))
        }
        Some(false) => {
            let kept = state.tasks.cancel_delete(request);
            HttpResponse::Ok().json(Outcome {
                notice: None,
                redirect_to: Some(task_path(kept)),
                data: kept.to_string(),
            })
        }
    };
    Ok(response)
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
