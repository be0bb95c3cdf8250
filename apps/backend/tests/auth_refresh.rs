mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::{assert_envelope, assert_error_envelope};
use serde_json::json;
use starter_backend::TokenClaims;
use support::{create_test_app, login_demo, send, test_tokens};

async fn refresh_with<S>(app: &S, payload: serde_json::Value) -> (StatusCode, serde_json::Value)
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(payload)
        .to_request();
    let (status, _, body) = send(app, req).await;
    (status, body)
}

#[actix_web::test]
async fn valid_refresh_token_yields_new_pair() {
    let app = create_test_app().await;
    let pair = login_demo(&app).await;

    let (status, body) = refresh_with(&app, json!({ "refreshToken": pair.refresh_token })).await;

    let envelope = assert_envelope(status, &body);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.message, "Token refreshed successfully");

    let access = body["data"]["tokens"]["accessToken"].as_str().unwrap();
    let refresh = body["data"]["tokens"]["refreshToken"].as_str().unwrap();
    let tokens = test_tokens();
    assert_eq!(tokens.verify_access(access).unwrap().user_id, "12345");
    assert_eq!(tokens.verify_refresh(refresh).unwrap().user_id, "12345");
}

#[actix_web::test]
async fn refresh_keeps_identity_and_drops_extensions() {
    let app = create_test_app().await;
    let claims = TokenClaims::new("77")
        .with_email("ext@example.com")
        .with_role("admin")
        .with_extra("tenant", "acme");
    let pair = test_tokens().issue(&claims).unwrap();

    let (status, body) = refresh_with(&app, json!({ "refreshToken": pair.refresh_token })).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let access = body["data"]["tokens"]["accessToken"].as_str().unwrap();
    let refreshed = test_tokens().verify_access(access).unwrap();
    assert_eq!(refreshed, claims.identity());
    assert!(refreshed.extra.is_empty());
}

#[actix_web::test]
async fn access_token_is_not_a_refresh_token() {
    let app = create_test_app().await;
    let pair = login_demo(&app).await;

    let (status, body) = refresh_with(&app, json!({ "refreshToken": pair.access_token })).await;

    assert_error_envelope(
        status,
        &body,
        StatusCode::UNAUTHORIZED,
        "Invalid or expired refresh token",
    );
}

#[actix_web::test]
async fn missing_or_empty_token_is_bad_request() {
    let app = create_test_app().await;

    for payload in [json!({}), json!({ "refreshToken": "" }), json!({ "refreshToken": null })] {
        let (status, body) = refresh_with(&app, payload).await;
        assert_error_envelope(
            status,
            &body,
            StatusCode::BAD_REQUEST,
            "Refresh token is required",
        );
    }
}

#[actix_web::test]
async fn garbage_token_is_unauthorized() {
    let app = create_test_app().await;

    let (status, body) = refresh_with(&app, json!({ "refreshToken": "not-a-token" })).await;

    assert_error_envelope(
        status,
        &body,
        StatusCode::UNAUTHORIZED,
        "Invalid or expired refresh token",
    );
}

#[actix_web::test]
async fn form_encoded_refresh_token_is_accepted() {
    let app = create_test_app().await;
    let pair = login_demo(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload(format!("refreshToken={}", pair.refresh_token))
        .to_request();
    let (status, _, body) = send(&app, req).await;

    let envelope = assert_envelope(status, &body);
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(envelope.message, "Token refreshed successfully");
}
