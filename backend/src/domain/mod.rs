//! Domain primitives, rules and services.
//!
//! Purpose: hold the task board's business rules free of HTTP and storage
//! concerns. Adapters reach the domain only through the services here and
//! implement the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Task and their identifiers and drafts.
//! - `access`: ownership decisions. `validation`: field and uniqueness rules.
//! - SessionManager, TaskService, UserAccountService: the use-cases.

pub mod access;
pub mod auth;
pub mod error;
pub mod notice;
pub mod ports;
pub mod session_manager;
pub mod task;
pub mod task_service;
pub mod trace_id;
pub mod user;
pub mod user_account_service;
pub mod validation;

pub use self::auth::{LoginCredentials, SessionToken, SessionTokenError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::session_manager::SessionManager;
pub use self::task::{
    Task, TaskChanges, TaskDraft, TaskFields, TaskId, TaskStatus, TaskStatusParseError,
};
pub use self::task_service::{DeletionRequest, TaskService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PasswordHash, ProfileChanges, User, UserDraft, UserId, UserValidationError,
};
pub use self::user_account_service::{Profile, UserAccountService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use taskboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Forbidden access."))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
