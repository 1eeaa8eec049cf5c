//! Flash messages returned alongside successful outcomes.

pub const LOGIN_SUCCESSFUL: &str = "Login successful";
pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGGED_OUT: &str = "Logged out";

pub const TASK_CREATED: &str = "Task was successfully created";
pub const TASK_UPDATED: &str = "Task was successfully updated.";
pub const TASK_DESTROYED: &str = "Task was successfully destroyed.";

pub const USER_CREATED: &str = "User was successfully created.";
pub const USER_UPDATED: &str = "User was successfully updated.";

/// Confirmation prompt shown before a task is deleted.
pub const DELETE_PROMPT: &str = "Are you sure?";
