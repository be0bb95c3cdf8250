mod support;

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend_test_support::{assert_envelope, assert_error_envelope};
use starter_backend::build_app_with;
use starter_backend::config::Environment;
use starter_backend::AppError;
use support::test_state;

async fn fault() -> Result<HttpResponse, AppError> {
    Err(AppError::internal("connection pool exhausted"))
}

async fn conflict() -> Result<HttpResponse, AppError> {
    Err(AppError::operational(StatusCode::CONFLICT, "Already exists"))
}

async fn teapot() -> Result<HttpResponse, actix_web::Error> {
    Err(actix_web::error::ErrorImATeapot("short and stout"))
}

async fn upstream() -> Result<HttpResponse, actix_web::Error> {
    Err(actix_web::error::ErrorBadGateway("upstream timed out"))
}

async fn plain() -> HttpResponse {
    HttpResponse::Ok().body("raw body")
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/fault", web::get().to(fault))
        .route("/conflict", web::get().to(conflict))
        .route("/teapot", web::get().to(teapot))
        .route("/upstream", web::get().to(upstream))
        .route("/plain", web::get().to(plain));
}

async fn call(environment: Environment, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = test::init_service(build_app_with(
        web::Data::new(test_state(environment)),
        &[],
        routes,
    ))
    .await;
    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

#[actix_web::test]
async fn fault_detail_is_exposed_in_development() {
    let (status, body) = call(Environment::Development, "/fault").await;

    let envelope = assert_error_envelope(
        status,
        &body,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    );
    assert_eq!(
        envelope.error.as_deref(),
        Some("Internal error: connection pool exhausted")
    );
}

#[actix_web::test]
async fn fault_detail_is_hidden_in_production() {
    let (status, body) = call(Environment::Production, "/fault").await;

    let envelope = assert_error_envelope(
        status,
        &body,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    );
    assert!(envelope.error.is_none());
    assert!(!body.to_string().contains("pool"));
}

#[actix_web::test]
async fn operational_error_keeps_status_and_message() {
    for environment in [Environment::Development, Environment::Production] {
        let (status, body) = call(environment, "/conflict").await;
        assert_error_envelope(status, &body, StatusCode::CONFLICT, "Already exists");
    }
}

#[actix_web::test]
async fn foreign_client_error_is_treated_as_operational() {
    let (status, body) = call(Environment::Production, "/teapot").await;

    assert_error_envelope(status, &body, StatusCode::IM_A_TEAPOT, "short and stout");
}

#[actix_web::test]
async fn foreign_server_error_becomes_generic_500() {
    let (status, body) = call(Environment::Production, "/upstream").await;
    let envelope = assert_error_envelope(
        status,
        &body,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    );
    assert!(envelope.error.is_none());

    let (status, body) = call(Environment::Development, "/upstream").await;
    let envelope = assert_envelope(status, &body);
    assert_eq!(envelope.error.as_deref(), Some("upstream timed out"));
}

#[actix_web::test]
async fn successful_responses_pass_through() {
    let app = test::init_service(build_app_with(
        web::Data::new(test_state(Environment::Production)),
        &[],
        routes,
    ))
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/plain").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "raw body");
}
