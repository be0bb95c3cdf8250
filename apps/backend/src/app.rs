//! Application assembly shared by `main` and the integration tests.

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};

use crate::middleware::{
    cors_middleware, ErrorEnvelope, ErrorPolicy, RequestTrace, SecurityHeaders, StructuredLogger,
};
use crate::routes;
use crate::state::app_state::AppState;

/// The production app: full middleware stack plus every API route.
pub fn build_app(
    state: web::Data<AppState>,
    cors_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    build_app_with(state, cors_origins, routes::configure)
}

/// The production middleware stack around caller-supplied routes.
///
/// Layers run outermost first: RequestTrace, StructuredLogger,
/// SecurityHeaders, ErrorEnvelope, CORS. Anything unmatched is answered by
/// the catch-all 404.
pub fn build_app_with<F>(
    state: web::Data<AppState>,
    cors_origins: &[String],
    configure: F,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    let policy = ErrorPolicy::for_environment(state.environment);

    App::new()
        .app_data(state)
        .configure(configure)
        .default_service(web::to(routes::not_found))
        .wrap(cors_middleware(cors_origins))
        .wrap(ErrorEnvelope::new(policy))
        .wrap(SecurityHeaders)
        .wrap(StructuredLogger)
        .wrap(RequestTrace)
}
