#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use app::{build_app, build_app_with};
pub use auth::{InvalidToken, TokenClaims, TokenKind, TokenPair, TokenService};
pub use config::AppConfig;
pub use error::AppError;
pub use extractors::{CurrentClaims, ValidatedBody, ValidatedJson};
pub use middleware::{Authenticate, Authorize, ErrorEnvelope, ErrorPolicy, RequestTrace};
pub use response::ApiResponse;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
