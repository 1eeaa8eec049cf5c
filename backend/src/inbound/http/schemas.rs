//! Response bodies for the task board API.
//!
//! Domain types stay free of serde and utoipa derives; handlers convert them
//! into these DTOs. Every successful mutation is wrapped in an [`Outcome`]
//! carrying the flash notice and the page the client should go to next.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Profile, Task, User};

/// Success envelope: optional notice, optional next location and the data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Outcome<T> {
    #[schema(example = "Task was successfully created")]
    pub notice: Option<String>,
    #[schema(example = "/tasks/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub redirect_to: Option<String>,
    pub data: T,
}

impl<T> Outcome<T> {
    /// A plain read: no notice, no redirect.
    pub fn data(data: T) -> Self {
        Self {
            notice: None,
            redirect_to: None,
            data,
        }
    }

    /// A completed mutation.
    pub fn done(notice: &str, redirect_to: impl Into<String>, data: T) -> Self {
        Self {
            notice: Some(notice.to_owned()),
            redirect_to: Some(redirect_to.into()),
            data,
        }
    }
}

/// Full task view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub owner_id: String,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub content: Option<String>,
    #[schema(example = "todo")]
    pub status: String,
    pub deadline: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskBody {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            owner_id: task.owner_id().to_string(),
            title: task.title().to_owned(),
            content: task.content().map(str::to_owned),
            status: task.status().as_str().to_owned(),
            deadline: task.deadline(),
        }
    }
}

/// Task as listed on a profile page: no content or deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub status: String,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_owned(),
            status: task.status().as_str().to_owned(),
        }
    }
}

/// Public account view. Never includes the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: String,
    #[schema(example = "ada@example.org")]
    pub email: String,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    pub user: UserBody,
    pub tasks: Vec<TaskSummary>,
}

impl From<&Profile> for ProfileBody {
    fn from(profile: &Profile) -> Self {
        Self {
            user: UserBody::from(&profile.user),
            tasks: profile.tasks.iter().map(TaskSummary::from).collect(),
        }
    }
}

/// First step of a delete: the question and how to answer it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletePromptBody {
    pub task_id: String,
    #[schema(example = "Are you sure?")]
    pub prompt: String,
    pub confirm_url: String,
    pub cancel_url: String,
}

/// Blank new-task form values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskFormBody {
    pub statuses: Vec<String>,
}
