//! HTTP inbound adapter exposing the task board as a JSON API.

pub mod auth;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every API handler. Mount under `/api/v1` behind the session
/// middleware.
///
/// `/tasks/new` is registered ahead of `/tasks/{id}` so it is not read as an
/// id. Undecodable bodies and query strings answer with the usual error
/// envelope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(auth::login)
        .service(auth::logout)
        .service(users::sign_up)
        .service(users::edit_user)
        .service(users::show_user)
        .service(users::update_user)
        .service(tasks::list_tasks)
        .service(tasks::new_task)
        .service(tasks::create_task)
        .service(tasks::edit_task)
        .service(tasks::show_task)
        .service(tasks::update_task)
        .service(tasks::delete_task);
}
