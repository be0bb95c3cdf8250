use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{verify_credentials, TokenKind, TokenPair};
use crate::error::AppError;
use crate::extractors::ValidatedBody;
use crate::logging::security;
use crate::response::send_success;
use crate::routes::public_resource;
use crate::state::app_state::AppState;

/// Missing fields deserialize as empty strings and simply fail the
/// credential check.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserSummary,
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub tokens: TokenPair,
}

/// Exchange the configured username/password for a token pair.
async fn login(
    req: ValidatedBody<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = req.into_inner();

    let store = app_state.credentials.clone();
    let checked_username = username.clone();
    let claims =
        web::block(move || verify_credentials(store.as_ref(), &checked_username, &password))
            .await??;

    let Some(claims) = claims else {
        security::login_failed(&username);
        return Err(AppError::invalid_credentials());
    };

    let tokens = app_state.tokens.issue(&claims)?;

    Ok(send_success(
        "Login successful",
        LoginResponse {
            user: UserSummary {
                id: claims.user_id,
                email: claims.email,
                role: claims.role,
            },
            tokens,
        },
    ))
}

/// Mint a fresh pair from a valid refresh token. Only the identity fields
/// carry over; extension claims are dropped.
async fn refresh(
    req: ValidatedBody<RefreshRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = req
        .into_inner()
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::refresh_token_required)?;

    let claims = app_state.tokens.verify_refresh(&token).map_err(|reason| {
        security::token_rejected(TokenKind::Refresh, reason);
        AppError::invalid_refresh_token()
    })?;

    let tokens = app_state.tokens.issue(&claims.identity())?;

    Ok(send_success(
        "Token refreshed successfully",
        RefreshResponse { tokens },
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(public_resource("/login").route(web::post().to(login)))
        .service(public_resource("/refresh").route(web::post().to(refresh)));
}
