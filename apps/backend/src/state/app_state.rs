use std::fmt;
use std::sync::Arc;

use crate::auth::{CredentialStore, TokenService};
use crate::config::Environment;

/// Shared, immutable application state
#[derive(Clone)]
pub struct AppState {
    pub environment: Environment,
    /// Token issue/verify for both token types
    pub tokens: TokenService,
    /// Login lookup
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(
        environment: Environment,
        tokens: TokenService,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            environment,
            tokens,
            credentials,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.environment)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
