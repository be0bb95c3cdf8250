use actix_web::error::{BlockingError, ResponseError};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::response::send_error_with_status;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Application error carrying its HTTP status.
///
/// Operational variants are expected, user-facing failures whose message is
/// safe to show. `Internal` and `Config` are faults: clients only ever see a
/// generic message, and the detail is logged by the error envelope.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{detail}")]
    BadRequest { detail: String },
    #[error("{detail}")]
    Unauthorized { detail: String },
    #[error("{detail}")]
    Forbidden { detail: String },
    #[error("{detail}")]
    NotFound { detail: String },
    #[error("Cannot {method} {path}")]
    RouteNotFound { method: String, path: String },
    #[error("{detail}")]
    Operational { status: StatusCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Operational { status, .. } => *status,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_operational(&self) -> bool {
        !matches!(self, AppError::Internal { .. } | AppError::Config { .. })
    }

    /// Message placed in the envelope's `message` field.
    pub fn public_message(&self) -> String {
        if self.is_operational() {
            self.to_string()
        } else {
            INTERNAL_MESSAGE.to_string()
        }
    }

    /// Render the envelope for this error.
    ///
    /// `expose_details` controls whether a fault's detail is placed in the
    /// `error` field; operational errors never carry one except the fixed
    /// route-not-found label.
    pub fn render(&self, expose_details: bool) -> HttpResponse {
        let error = match self {
            AppError::RouteNotFound { .. } => Some("Route not found".to_string()),
            _ if !self.is_operational() && expose_details => Some(self.to_string()),
            _ => None,
        };

        send_error_with_status(self.status(), self.public_message(), error)
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            detail: detail.into(),
        }
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden {
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn route_not_found(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::RouteNotFound {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Operational error with an arbitrary status.
    pub fn operational(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::Operational {
            status,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::unauthorized("Access denied. No token provided")
    }

    pub fn unauthorized_invalid_jwt() -> Self {
        Self::unauthorized("Invalid or expired token")
    }

    pub fn authentication_required() -> Self {
        Self::unauthorized("Authentication required")
    }

    pub fn forbidden_insufficient_role() -> Self {
        Self::forbidden("Access denied. Insufficient permissions")
    }

    pub fn invalid_credentials() -> Self {
        Self::unauthorized("Invalid credentials")
    }

    pub fn refresh_token_required() -> Self {
        Self::bad_request("Refresh token is required")
    }

    pub fn invalid_refresh_token() -> Self {
        Self::unauthorized("Invalid or expired refresh token")
    }
}

impl From<BlockingError> for AppError {
    fn from(e: BlockingError) -> Self {
        AppError::internal(format!("blocking task failed: {e}"))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::internal(format!("password hashing failed: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        // Production-safe default; ErrorEnvelope re-renders with the
        // configured detail policy.
        self.render(false)
    }
}
