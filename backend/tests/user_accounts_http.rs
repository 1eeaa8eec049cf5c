//! Sign-up, login and owner-only profile pages over HTTP.

mod support;

use actix_web::test::{TestRequest, init_service};
use rstest::rstest;
use serde_json::json;

use support::{app, create_task, http_state, log_in, member, send, sign_up};

#[actix_web::test]
async fn sign_up_points_to_login_without_a_session() {
    let app = init_service(app(http_state())).await;

    let reply = sign_up(&app, "Ada@Example.org", "secret").await;
    assert_eq!(reply.status, 201);
    assert_eq!(reply.body["notice"], "User was successfully created.");
    assert_eq!(reply.body["redirectTo"], "/login");
    assert_eq!(reply.body["data"]["email"], "ada@example.org");
    assert!(reply.cookie.is_none());

    let id = reply.data_id();
    let anonymous = send(&app, TestRequest::get().uri(&format!("/api/v1/users/{id}"))).await;
    assert_eq!(anonymous.status, 401);
    assert_eq!(anonymous.location.as_deref(), Some("/login"));
}

#[rstest]
#[case::blank_email(
    json!({"email": "", "password": "secret", "passwordConfirmation": "secret"}),
    vec!["Email can't be blank"],
)]
#[case::short_password(
    json!({"email": "ada@example.org", "password": "ab", "passwordConfirmation": "ab"}),
    vec!["Password is too short (minimum is 3 characters)"],
)]
#[case::mismatch(
    json!({"email": "ada@example.org", "password": "secret", "passwordConfirmation": "secreT"}),
    vec!["Password confirmation doesn't match Password"],
)]
#[actix_web::test]
async fn sign_up_reports_field_errors(
    #[case] payload: serde_json::Value,
    #[case] expected: Vec<&str>,
) {
    let app = init_service(app(http_state())).await;
    let reply = send(&app, TestRequest::post().uri("/api/v1/users").set_json(payload)).await;
    assert_eq!(reply.status, 422);
    assert_eq!(reply.errors(), expected);
}

#[actix_web::test]
async fn duplicate_email_is_taken() {
    let app = init_service(app(http_state())).await;
    assert_eq!(sign_up(&app, "ada@example.org", "secret").await.status, 201);

    let again = sign_up(&app, "ada@example.org", "other").await;
    assert_eq!(again.status, 422);
    assert_eq!(again.body["message"], "1 error prohibited this user from being saved:");
    assert_eq!(again.errors(), vec!["Email has already been taken"]);
}

#[rstest]
#[case::wrong_password("ada@example.org", "wrong")]
#[case::unknown_email("nobody@example.org", "secret")]
#[actix_web::test]
async fn failed_logins_look_alike(#[case] email: &str, #[case] password: &str) {
    let app = init_service(app(http_state())).await;
    sign_up(&app, "ada@example.org", "secret").await;

    let reply = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(reply.status, 401);
    assert_eq!(reply.body["message"], "Login failed");
}

#[actix_web::test]
async fn profile_is_owner_only_and_lists_own_tasks() {
    let app = init_service(app(http_state())).await;
    let ada = member(&app, "ada@example.org").await;
    let bob = member(&app, "bob@example.org").await;
    create_task(&app, &ada, json!({"title": "Ada's", "status": "todo"})).await;
    create_task(&app, &bob, json!({"title": "Bob's", "status": "done"})).await;

    let login = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": "ada@example.org", "password": "secret"})),
    )
    .await;
    let ada_id = login.body["data"]["userId"]
        .as_str()
        .expect("user id")
        .to_owned();
    let uri = format!("/api/v1/users/{ada_id}");

    let own = send(&app, TestRequest::get().uri(&uri).cookie(ada)).await;
    assert_eq!(own.status, 200);
    let titles: Vec<_> = own.body["data"]["tasks"]
        .as_array()
        .expect("tasks")
        .iter()
        .filter_map(|task| task["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Ada's"]);

    let foreign = send(&app, TestRequest::get().uri(&uri).cookie(bob)).await;
    assert_eq!(foreign.status, 403);
    assert_eq!(foreign.body["message"], "Forbidden access.");
    assert_eq!(foreign.location.as_deref(), Some("/"));
}

#[actix_web::test]
async fn changed_password_takes_effect() {
    let app = init_service(app(http_state())).await;
    let ada = member(&app, "ada@example.org").await;
    let login = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": "ada@example.org", "password": "secret"})),
    )
    .await;
    let ada_id = login.body["data"]["userId"]
        .as_str()
        .expect("user id")
        .to_owned();

    let updated = send(
        &app,
        TestRequest::patch()
            .uri(&format!("/api/v1/users/{ada_id}"))
            .cookie(ada)
            .set_json(json!({"password": "changed", "passwordConfirmation": "changed"})),
    )
    .await;
    assert_eq!(updated.status, 200);
    assert_eq!(updated.body["notice"], "User was successfully updated.");
    assert_eq!(updated.body["redirectTo"], format!("/users/{ada_id}"));

    log_in(&app, "ada@example.org", "changed").await;
    let stale = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": "ada@example.org", "password": "secret"})),
    )
    .await;
    assert_eq!(stale.status, 401);
}
