//! Shared harness for the HTTP integration tests.
//!
//! Mounts the full API the way the server does (trace middleware, cookie
//! sessions, `/api/v1` scope) over in-memory adapters and a cheap Argon2
//! configuration.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test as actix_test, web};
use argon2::Params;
use serde_json::{Value, json};

use taskboard::Trace;
use taskboard::domain::TRACE_ID_HEADER;
use taskboard::inbound::http::configure_routes;
use taskboard::inbound::http::state::{HttpState, HttpStatePorts};
use taskboard::outbound::memory::{
    InMemorySessionStore, InMemoryTaskRepository, InMemoryUserRepository,
};
use taskboard::outbound::security::Argon2PasswordHasher;

pub fn http_state() -> HttpState {
    let params = Params::new(8, 1, 1, None).expect("cheap argon2 params");
    HttpState::try_from_ports(HttpStatePorts {
        users: Arc::new(InMemoryUserRepository::new()),
        tasks: Arc::new(InMemoryTaskRepository::new()),
        sessions: Arc::new(InMemorySessionStore::new()),
        hasher: Arc::new(Argon2PasswordHasher::with_params(params)),
    })
    .expect("http state")
}

pub fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .configure(configure_routes),
        )
}

/// Response status, headers of interest and the decoded JSON body.
pub struct Reply {
    pub status: u16,
    pub location: Option<String>,
    pub trace_id: Option<String>,
    pub cookie: Option<Cookie<'static>>,
    pub body: Value,
}

impl Reply {
    pub fn errors(&self) -> Vec<String> {
        self.body["details"]["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|error| error.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn data_id(&self) -> String {
        self.body["data"]["id"].as_str().expect("data.id").to_owned()
    }
}

pub async fn send<S>(app: &S, request: actix_test::TestRequest) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(app, request.to_request()).await;
    let header_value = |name: &str| {
        res.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    let location = header_value(header::LOCATION.as_str());
    let trace_id = header_value(TRACE_ID_HEADER);
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned);
    let status = res.status().as_u16();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Reply {
        status,
        location,
        trace_id,
        cookie,
        body,
    }
}

pub async fn sign_up<S>(app: &S, email: &str, password: &str) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::post().uri("/api/v1/users").set_json(json!({
            "email": email,
            "password": password,
            "passwordConfirmation": password,
        })),
    )
    .await
}

pub async fn log_in<S>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(reply.status, 200, "login failed: {}", reply.body);
    reply.cookie.expect("session cookie")
}

/// Sign up and log in, returning the session cookie.
pub async fn member<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = sign_up(app, email, "secret").await;
    assert_eq!(reply.status, 201, "sign-up failed: {}", reply.body);
    log_in(app, email, "secret").await
}

pub async fn create_task<S>(app: &S, cookie: &Cookie<'static>, payload: Value) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/tasks")
            .cookie(cookie.clone())
            .set_json(payload),
    )
    .await
}
