//! Account handlers: sign-up and the owner-only profile pages.
//!
//! ```text
//! POST  /api/v1/users            {"email":"…","password":"…","passwordConfirmation":"…"}
//! GET   /api/v1/users/{id}
//! GET   /api/v1/users/{id}/edit
//! PATCH /api/v1/users/{id}       {"email":"…"}
//! ```

use actix_web::{HttpResponse, get, http::header, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::access::LOGIN_PATH;
use crate::domain::notice::{USER_CREATED, USER_UPDATED};
use crate::domain::{Error, ProfileChanges, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_actor;
use crate::inbound::http::schemas::{Outcome, ProfileBody, UserBody};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

#[derive(Debug, Deserialize)]
struct UserPath {
    id: String,
}

/// Sign-up form. Missing fields are treated as blank.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

impl From<SignUpRequest> for UserDraft {
    fn from(value: SignUpRequest) -> Self {
        let SignUpRequest {
            email,
            password,
            password_confirmation,
        } = value;
        Self {
            email,
            password: Some(Zeroizing::new(password)),
            password_confirmation: Some(Zeroizing::new(password_confirmation)),
        }
    }
}

/// Profile edit. Omitted fields keep their stored value; blank password
/// fields leave the password unchanged.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(value: UpdateProfileRequest) -> Self {
        Self {
            email: value.email,
            password: value.password.map(Zeroizing::new),
            password_confirmation: value.password_confirmation.map(Zeroizing::new),
        }
    }
}

fn profile_path(id: impl std::fmt::Display) -> String {
    format!("/users/{id}")
}

/// Register an account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User was successfully created.", body = Outcome<UserBody>),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["users"],
    operation_id = "signUp",
    security([])
)]
#[post("/users")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .accounts
        .sign_up(UserDraft::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, profile_path(user.id())))
        .json(Outcome::done(USER_CREATED, LOGIN_PATH, UserBody::from(&user))))
}

/// The owner's profile with the tasks they own.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Profile", body = Outcome<ProfileBody>),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Forbidden access.", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "showUser"
)]
#[get("/users/{id}")]
pub async fn show_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<Outcome<ProfileBody>>> {
    let actor = current_actor(&state, &session).await?;
    let user_id = parse_user_id(&path.id)?;
    let profile = state.accounts.profile(actor.as_ref(), &user_id).await?;
    Ok(web::Json(Outcome::data(ProfileBody::from(&profile))))
}

/// Values for the profile edit form.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/edit",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Editable profile", body = Outcome<UserBody>),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Forbidden access.", body = Error)
    ),
    tags = ["users"],
    operation_id = "editUser"
)]
#[get("/users/{id}/edit")]
pub async fn edit_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<Outcome<UserBody>>> {
    let actor = current_actor(&state, &session).await?;
    let user_id = parse_user_id(&path.id)?;
    let user = state.accounts.edit_profile(actor.as_ref(), &user_id).await?;
    Ok(web::Json(Outcome::data(UserBody::from(&user))))
}

/// Apply profile edits.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "User was successfully updated.", body = Outcome<UserBody>),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Forbidden access.", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<UserPath>,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<Outcome<UserBody>>> {
    let actor = current_actor(&state, &session).await?;
    let user_id = parse_user_id(&path.id)?;
    let user = state
        .accounts
        .update_profile(actor.as_ref(), &user_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(Outcome::done(
        USER_UPDATED,
        profile_path(user.id()),
        UserBody::from(&user),
    )))
}

#[cfg(test)]
mod tests;
