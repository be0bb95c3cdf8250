use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::config::JwtSettings;

/// Signing material and lifetimes for access and refresh tokens.
#[derive(Clone)]
pub struct SecurityConfig {
    pub access_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_secret: Vec<u8>,
    pub refresh_ttl: Duration,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    /// Create a config with the given secrets and the default
    /// 15 minute / 7 day lifetimes.
    pub fn new(access_secret: impl Into<Vec<u8>>, refresh_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            access_secret: access_secret.into(),
            access_ttl: Duration::from_secs(15 * 60),
            refresh_secret: refresh_secret.into(),
            refresh_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            algorithm: Algorithm::HS256,
        }
    }

    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self::new(
            settings.access.secret.as_bytes(),
            settings.refresh.secret.as_bytes(),
        )
        .with_access_ttl(settings.access.ttl)
        .with_refresh_ttl(settings.refresh.ttl)
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(
            b"default_access_secret_for_tests_only".to_vec(),
            b"default_refresh_secret_for_tests_only".to_vec(),
        )
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
