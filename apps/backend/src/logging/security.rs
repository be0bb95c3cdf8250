use tracing::warn;

use crate::auth::{InvalidToken, TokenKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Failed username/password login.
pub fn login_failed(username: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        username = %Redacted(username),
        "Authentication failure"
    );
}

/// A presented token did not verify.
pub fn token_rejected(kind: TokenKind, reason: InvalidToken) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        %kind,
        %reason,
        "Token rejected"
    );
}

/// An authenticated caller lacked a required role.
pub fn access_denied(user_id: &str, role: Option<&str>, required: &[String]) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_DENIED",
        %trace_id,
        user_id,
        role = role.unwrap_or("<none>"),
        required = %required.join(","),
        "Insufficient role"
    );
}
