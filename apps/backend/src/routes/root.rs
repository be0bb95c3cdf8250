use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::response::send_success;
use crate::routes::{get_or_head, public_resource};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub version: &'static str,
    pub environment: String,
}

async fn index(app_state: web::Data<AppState>) -> HttpResponse {
    send_success(
        "Welcome to the starter backend API",
        ServiceInfo {
            version: env!("CARGO_PKG_VERSION"),
            environment: app_state.environment.to_string(),
        },
    )
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(public_resource("/").route(get_or_head().to(index)));
}
