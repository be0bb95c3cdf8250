use std::sync::Arc;

use crate::auth::{CredentialStore, StaticCredentials, TokenService};
use crate::config::{AppConfig, DemoCredentials, Environment};
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    environment: Environment,
    security_config: SecurityConfig,
    demo: DemoCredentials,
    credentials: Option<Arc<dyn CredentialStore>>,
    bcrypt_cost: u32,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            environment: Environment::Development,
            security_config: SecurityConfig::default(),
            demo: DemoCredentials::default(),
            credentials: None,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Take environment, token settings and demo credentials from `config`.
    pub fn with_config(self, config: &AppConfig) -> Self {
        Self {
            environment: config.environment,
            security_config: SecurityConfig::from_settings(&config.jwt),
            demo: config.demo.clone(),
            ..self
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Replace the static demo store.
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// bcrypt work factor for the demo password hash; tests lower it.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let credentials = match self.credentials {
            Some(store) => store,
            None => Arc::new(StaticCredentials::demo(&self.demo, self.bcrypt_cost)?),
        };

        Ok(AppState::new(
            self.environment,
            TokenService::new(&self.security_config),
            credentials,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use crate::auth::{verify_credentials, TokenClaims};

    use super::*;

    #[test]
    fn default_build_has_demo_user() {
        let state = build_state().with_bcrypt_cost(4).build().unwrap();

        assert_eq!(state.environment, Environment::Development);
        let claims = verify_credentials(state.credentials.as_ref(), "demo@example.com", "demo123")
            .unwrap()
            .unwrap();
        assert_eq!(claims.user_id, "12345");
    }

    #[test]
    fn custom_store_replaces_demo_user() {
        let store = StaticCredentials::new("root", "toor", TokenClaims::new("0"), 4).unwrap();
        let state = build_state()
            .with_environment(Environment::Production)
            .with_credentials(Arc::new(store))
            .build()
            .unwrap();

        assert!(state.environment.is_production());
        assert!(
            verify_credentials(state.credentials.as_ref(), "demo@example.com", "demo123")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert!(build_state().with_bcrypt_cost(99).build().is_err());
    }
}
