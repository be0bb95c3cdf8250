//! Access/refresh token issuance and verification.
//!
//! Tokens are HS256 JWTs. Each token type has its own secret and lifetime,
//! and carries a `typ` claim so an access token never verifies as a refresh
//! token (or the reverse), even under identical secrets.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::auth::claims::TokenClaims;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Access and refresh token minted from the same claims at the same instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Why a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidToken {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token has the wrong type")]
    WrongType,
    #[error("token carries no user id")]
    MissingUserId,
}

/// Wire form of the claims: identity fields, extensions, and the
/// registered claims managed here.
#[derive(Debug, Serialize, Deserialize)]
struct SignedClaims {
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
    iat: u64,
    exp: u64,
    typ: TokenKind,
}

impl SignedClaims {
    fn into_claims(self) -> TokenClaims {
        TokenClaims {
            user_id: self.user_id,
            email: self.email,
            role: self.role,
            extra: self.extra,
        }
    }
}

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl SigningKeys {
    fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }
}

/// Stateless token service; cheap to clone into application state.
#[derive(Clone)]
pub struct TokenService {
    access: SigningKeys,
    refresh: SigningKeys,
    algorithm: Algorithm,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("access_ttl_secs", &self.access.ttl_secs)
            .field("refresh_ttl_secs", &self.refresh.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            access: SigningKeys::new(&security.access_secret, security.access_ttl.as_secs()),
            refresh: SigningKeys::new(&security.refresh_secret, security.refresh_ttl.as_secs()),
            algorithm: security.algorithm,
        }
    }

    /// Mint a token pair valid from now.
    pub fn issue(&self, claims: &TokenClaims) -> Result<TokenPair, AppError> {
        self.issue_at(claims, SystemTime::now())
    }

    /// Mint a token pair whose `iat` is `now`.
    ///
    /// Errors:
    /// - empty `user_id`, or an extension field named like a reserved claim
    ///   → `AppError::Internal` (caller bug, not client input)
    pub fn issue_at(&self, claims: &TokenClaims, now: SystemTime) -> Result<TokenPair, AppError> {
        if claims.user_id.trim().is_empty() {
            return Err(AppError::internal("cannot issue tokens without a user id"));
        }
        if let Some(key) = claims.reserved_extra_key() {
            return Err(AppError::internal(format!(
                "extension claim '{key}' collides with a reserved claim"
            )));
        }

        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AppError::internal("Failed to get current time"))?
            .as_secs();

        Ok(TokenPair {
            access_token: self.sign(claims, TokenKind::Access, iat)?,
            refresh_token: self.sign(claims, TokenKind::Refresh, iat)?,
        })
    }

    pub fn verify_access(&self, token: &str) -> Result<TokenClaims, InvalidToken> {
        self.verify(token, TokenKind::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<TokenClaims, InvalidToken> {
        self.verify(token, TokenKind::Refresh)
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn sign(&self, claims: &TokenClaims, kind: TokenKind, iat: u64) -> Result<String, AppError> {
        let keys = self.keys(kind);
        let signed = SignedClaims {
            user_id: claims.user_id.clone(),
            email: claims.email.clone(),
            role: claims.role.clone(),
            extra: claims.extra.clone(),
            iat,
            exp: iat.saturating_add(keys.ttl_secs),
            typ: kind,
        };

        encode(&Header::new(self.algorithm), &signed, &keys.encoding)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))
    }

    fn verify(&self, token: &str, kind: TokenKind) -> Result<TokenClaims, InvalidToken> {
        // Pin the algorithm; expiry is checked with no leeway.
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let signed = decode::<SignedClaims>(token, &self.keys(kind).decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => InvalidToken::Expired,
                ErrorKind::InvalidSignature => InvalidToken::BadSignature,
                _ => InvalidToken::Malformed,
            })?;

        if signed.typ != kind {
            return Err(InvalidToken::WrongType);
        }
        if signed.user_id.trim().is_empty() {
            return Err(InvalidToken::MissingUserId);
        }

        Ok(signed.into_claims())
    }
}
