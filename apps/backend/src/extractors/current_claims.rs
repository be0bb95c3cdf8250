use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::TokenClaims;
use crate::error::AppError;

/// Claims attached by [`crate::middleware::Authenticate`].
#[derive(Debug, Clone)]
pub struct CurrentClaims(pub TokenClaims);

impl Deref for CurrentClaims {
    type Target = TokenClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<TokenClaims>()
                .cloned()
                .map(CurrentClaims)
                .ok_or_else(AppError::authentication_required),
        )
    }
}
