#![allow(dead_code)]

//! Shared integration-test helpers: state, app and request plumbing.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{self, HeaderMap};
use actix_web::http::StatusCode;
use actix_web::{test, web, Error};
use serde_json::{json, Value};
use starter_backend::config::Environment;
use starter_backend::state::build_state;
use starter_backend::{build_app, AppState, SecurityConfig, TokenPair, TokenService};

/// Cheap bcrypt work factor so tests don't spend seconds hashing.
pub const TEST_BCRYPT_COST: u32 = 4;

pub const DEMO_USERNAME: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(
        "integration-access-secret".as_bytes(),
        "integration-refresh-secret".as_bytes(),
    )
}

/// Token service sharing the test app's secrets.
pub fn test_tokens() -> TokenService {
    TokenService::new(&test_security())
}

pub fn test_state(environment: Environment) -> AppState {
    build_state()
        .with_environment(environment)
        .with_security(test_security())
        .with_bcrypt_cost(TEST_BCRYPT_COST)
        .build()
        .expect("test state should build")
}

/// The production app (all middleware, all routes) in development mode.
pub async fn create_test_app(
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(build_app(
        web::Data::new(test_state(Environment::Development)),
        &[],
    ))
    .await
}

/// Call the app and decode the JSON body.
pub async fn send<S>(app: &S, req: Request) -> (StatusCode, HeaderMap, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body: Value = test::read_body_json(resp).await;
    (status, headers, body)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Log in as the demo user and return the issued pair.
pub async fn login_demo<S>(app: &S) -> TokenPair
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": DEMO_USERNAME, "password": DEMO_PASSWORD }))
        .to_request();
    let (status, _, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK, "demo login failed: {body}");

    serde_json::from_value(body["data"]["tokens"].clone()).expect("token pair in login response")
}
