//! Identity claims carried inside access and refresh tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names that extension fields may not use: the named identity
/// fields plus the registered token claims the token service manages.
pub const RESERVED_CLAIMS: &[&str] = &[
    "userId", "email", "role", "iat", "exp", "nbf", "iss", "sub", "aud", "jti", "typ",
];

/// Claims embedded in a token and attached to authenticated requests.
///
/// `user_id` is required; `email` and `role` are optional; anything else
/// lives in the explicit `extra` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            role: None,
            extra: Map::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The identity subset (`userId`, `email`, `role`) without extension fields.
    pub fn identity(&self) -> Self {
        Self {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            extra: Map::new(),
        }
    }

    /// True when the role is present and one of `allowed`.
    pub fn has_role_in(&self, allowed: &[String]) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| allowed.iter().any(|a| a == role))
    }

    /// First extension key that collides with a reserved claim name.
    pub fn reserved_extra_key(&self) -> Option<&str> {
        self.extra
            .keys()
            .map(String::as_str)
            .find(|key| RESERVED_CLAIMS.contains(key))
    }
}
