use actix_web::{guard, web, HttpRequest, HttpResponse, Route};

use crate::error::AppError;

pub mod auth;
pub mod root;
pub mod users;

/// Register every route of the API.
///
/// Unmatched paths fall through to the app's default service; public
/// resources also answer unmatched methods with the same 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(root::configure_routes)
        .service(web::scope("/api/auth").configure(auth::configure_routes))
        .service(web::scope("/api/users").configure(users::configure_routes));
}

/// Catch-all 404 responder: "Cannot METHOD path".
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::route_not_found(req.method().as_str(), req.path()))
}

/// A resource whose unmatched methods get the catch-all 404.
pub(crate) fn public_resource(path: &str) -> actix_web::Resource {
    web::resource(path).default_service(web::to(not_found))
}

/// A read route: GET, plus HEAD with the same headers.
pub(crate) fn get_or_head() -> Route {
    web::route().guard(guard::Any(guard::Get()).or(guard::Head()))
}
