//! Tests for the account handlers.

use super::*;
use crate::inbound::http::test_utils::{TestContext, login_cookie, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

#[actix_web::test]
async fn sign_up_redirects_to_login() {
    let ctx = TestContext::new();
    let app = actix_test::init_service(test_app(&ctx)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "email": "Ada@Example.org",
                "password": "secret",
                "passwordConfirmation": "secret",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["notice"], "User was successfully created.");
    assert_eq!(body["redirectTo"], "/login");
    assert_eq!(body["data"]["email"], "ada@example.org");
    assert!(body["data"].get("passwordHash").is_none());
}

#[rstest]
#[case(
    json!({"email": "", "password": "", "passwordConfirmation": ""}),
    "3 errors prohibited this user from being saved:",
    vec!["Email can't be blank", "Password can't be blank", "Password confirmation can't be blank"]
)]
#[case(
    json!({"email": "bob@example.org", "password": "ab", "passwordConfirmation": "ab"}),
    "1 error prohibited this user from being saved:",
    vec!["Password is too short (minimum is 3 characters)"]
)]
#[case(
    json!({"email": "bob@example.org", "password": "secret", "passwordConfirmation": "other"}),
    "1 error prohibited this user from being saved:",
    vec!["Password confirmation doesn't match Password"]
)]
#[actix_web::test]
async fn sign_up_reports_every_problem(
    #[case] payload: Value,
    #[case] summary: &str,
    #[case] errors: Vec<&str>,
) {
    let ctx = TestContext::new();
    let app = actix_test::init_service(test_app(&ctx)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], summary);
    assert_eq!(body["details"]["errors"], json!(errors));
}

#[actix_web::test]
async fn profile_is_owner_only() {
    let ctx = TestContext::new();
    let ada = ctx.sign_up("ada@example.org", "secret").await;
    ctx.sign_up("bob@example.org", "secret").await;
    let app = actix_test::init_service(test_app(&ctx)).await;
    let uri = format!("/api/v1/users/{ada}");

    let anonymous =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request())
            .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        anonymous
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/login")
    );
    let body: Value = actix_test::read_body_json(anonymous).await;
    assert_eq!(body["message"], "Login required");

    let (bob_cookie, _) = login_cookie(&app, "bob@example.org", "secret").await;
    let stranger = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("{uri}/edit"))
            .cookie(bob_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(stranger.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(stranger).await;
    assert_eq!(body["message"], "Forbidden access.");
    assert_eq!(body["details"]["redirectTo"], "/");

    let (ada_cookie, _) = login_cookie(&app, "ada@example.org", "secret").await;
    let owner = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&uri)
            .cookie(ada_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(owner.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(owner).await;
    assert_eq!(body["data"]["user"]["email"], "ada@example.org");
    assert_eq!(body["data"]["tasks"], json!([]));
}

#[actix_web::test]
async fn update_keeps_password_when_blank() {
    let ctx = TestContext::new();
    let ada = ctx.sign_up("ada@example.org", "secret").await;
    let app = actix_test::init_service(test_app(&ctx)).await;
    let (cookie, _) = login_cookie(&app, "ada@example.org", "secret").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{ada}"))
            .cookie(cookie)
            .set_json(json!({
                "email": "ada@lovelace.org",
                "password": "",
                "passwordConfirmation": "",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["notice"], "User was successfully updated.");
    assert_eq!(body["redirectTo"], format!("/users/{ada}"));
    assert_eq!(body["data"]["email"], "ada@lovelace.org");

    login_cookie(&app, "ada@lovelace.org", "secret").await;
}

#[actix_web::test]
async fn malformed_user_id_is_not_found() {
    let ctx = TestContext::new();
    let app = actix_test::init_service(test_app(&ctx)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/42")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
