//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::{App, test as actix_test, web};
use argon2::Params;
use serde_json::Value;

use crate::domain::{UserDraft, UserId};
use crate::inbound::http::configure_routes;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemorySessionStore, InMemoryTaskRepository, InMemoryUserRepository};
use crate::outbound::security::Argon2PasswordHasher;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory services with a deliberately cheap password hasher.
pub struct TestContext {
    pub state: HttpState,
}

impl TestContext {
    pub fn new() -> Self {
        let hasher = Argon2PasswordHasher::with_params(
            Params::new(8, 1, 1, None).expect("cheap argon2 params"),
        );
        let state = HttpState::try_from_ports(HttpStatePorts {
            users: Arc::new(InMemoryUserRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            hasher: Arc::new(hasher),
        })
        .expect("http state");
        Self { state }
    }

    /// Register an account directly through the service.
    pub async fn sign_up(&self, email: &str, password: &str) -> UserId {
        *self
            .state
            .accounts
            .sign_up(UserDraft::sign_up(email, password, password))
            .await
            .expect("sign up")
            .id()
    }
}

/// Full API under `/api/v1` with a test session middleware.
pub fn test_app(
    ctx: &TestContext,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(ctx.state.clone()))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(configure_routes))
}

/// Log in and return the session cookie with the response body.
pub async fn login_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> (Cookie<'static>, Value) {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    let body: Value = actix_test::read_body_json(res).await;
    (cookie, body)
}
