//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api/v1`, the health probes and
//! the session cookie security scheme. Swagger UI serves it in debug builds
//! and `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, TaskStatus};
use crate::inbound::http::auth::{LoginRequest, SessionBody};
use crate::inbound::http::schemas::{
    DeletePromptBody, ProfileBody, TaskBody, TaskFormBody, TaskSummary, UserBody,
};
use crate::inbound::http::tasks::{CreateTaskRequest, UpdateTaskRequest};
use crate::inbound::http::users::{SignUpRequest, UpdateProfileRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Taskboard API",
        description = "Shared task board with ownership-based access control."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::sign_up,
        crate::inbound::http::users::show_user,
        crate::inbound::http::users::edit_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::new_task,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::show_task,
        crate::inbound::http::tasks::edit_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        TaskStatus,
        LoginRequest,
        SessionBody,
        SignUpRequest,
        UpdateProfileRequest,
        CreateTaskRequest,
        UpdateTaskRequest,
        TaskBody,
        TaskSummary,
        TaskFormBody,
        UserBody,
        ProfileBody,
        DeletePromptBody,
    )),
    tags(
        (name = "session", description = "Login and logout"),
        (name = "users", description = "Sign-up and owner-only profile pages"),
        (name = "tasks", description = "Shared task list; mutations are owner-only"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
