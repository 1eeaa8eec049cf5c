//! Login and logout handlers.
//!
//! ```text
//! POST   /api/v1/login  {"email":"ada@example.org","password":"secret"}
//! DELETE /api/v1/logout
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::access::TASK_LIST_PATH;
use crate::domain::notice::{LOGGED_OUT, LOGIN_SUCCESSFUL};
use crate::domain::{Error, LoginCredentials, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::Outcome;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body. Either field may be empty; that is a failed login,
/// not a malformed request.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionBody {
    pub user_id: String,
}

/// Identity of the caller, or `None` when anonymous.
pub(crate) async fn current_actor(
    state: &HttpState,
    session: &SessionContext,
) -> Result<Option<UserId>, Error> {
    let token = session.token()?;
    state.sessions.current_identity(token.as_ref()).await
}

/// Authenticate and establish a session. A session the cookie already
/// carries is revoked in favour of the new one.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = Outcome<SessionBody>,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Login failed", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::new(&email, &password);
    let previous = session.token()?;
    let (user_id, token) = state
        .sessions
        .login(&credentials, previous.as_ref())
        .await?;
    session.persist_token(&token)?;
    Ok(HttpResponse::Ok().json(Outcome::done(
        LOGIN_SUCCESSFUL,
        TASK_LIST_PATH,
        SessionBody {
            user_id: user_id.to_string(),
        },
    )))
}

/// End the current session. Succeeds with no session too.
#[utoipa::path(
    delete,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[delete("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let token = session.token()?;
    state.sessions.end_session(token.as_ref()).await?;
    session.purge();
    Ok(HttpResponse::Ok().json(Outcome::done(LOGGED_OUT, TASK_LIST_PATH, ())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestContext, login_cookie, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("ada@example.org", "wrong")]
    #[case("nobody@example.org", "secret")]
    #[case("", "")]
    #[case("ada@example.org", "")]
    #[actix_web::test]
    async fn failed_logins_look_the_same(#[case] email: &str, #[case] password: &str) {
        let ctx = TestContext::new();
        ctx.sign_up("ada@example.org", "secret").await;
        let app = actix_test::init_service(test_app(&ctx)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    email: email.to_owned(),
                    password: password.to_owned(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().all(|cookie| cookie.name() != "session"));
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "Login failed");
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn login_then_logout() {
        let ctx = TestContext::new();
        let ada = ctx.sign_up("ada@example.org", "secret").await;
        let app = actix_test::init_service(test_app(&ctx)).await;

        let (cookie, body) = login_cookie(&app, "ADA@example.org", "secret").await;
        assert_eq!(body["notice"], "Login successful");
        assert_eq!(body["redirectTo"], "/");
        assert_eq!(body["data"]["userId"], ada.to_string());

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["notice"], "Logged out");

        // The old cookie no longer names a live session.
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/tasks/new")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_without_a_session_is_fine() {
        let ctx = TestContext::new();
        let app = actix_test::init_service(test_app(&ctx)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/logout")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
