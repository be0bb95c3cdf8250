use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::auth::TokenClaims;
use crate::error::AppError;
use crate::extractors::CurrentClaims;
use crate::middleware::{Authenticate, Authorize};
use crate::response::send_success;
use crate::routes::{get_or_head, public_resource};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: TokenClaims,
}

async fn profile(claims: CurrentClaims) -> Result<HttpResponse, AppError> {
    Ok(send_success(
        "Profile retrieved successfully",
        ProfileResponse { user: claims.0 },
    ))
}

async fn admin() -> Result<HttpResponse, AppError> {
    Ok(send_success(
        "Admin access granted",
        json!({ "message": "This is a protected admin route" }),
    ))
}

/// The gates sit on the GET route itself, so other methods on these paths
/// get the plain 404 without being asked for a token.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        public_resource("/profile").route(get_or_head().to(profile).wrap(Authenticate)),
    )
    .service(
        public_resource("/admin").route(
            get_or_head()
                .to(admin)
                .wrap(Authorize::roles(["admin"]))
                .wrap(Authenticate),
        ),
    );
}
