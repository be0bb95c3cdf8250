use std::fmt;

use uuid::Uuid;

use crate::auth::claims::TokenClaims;
use crate::config::DemoCredentials;
use crate::error::AppError;

/// A stored login: bcrypt hash plus the claims minted on success.
#[derive(Clone)]
pub struct UserRecord {
    pub password_hash: String,
    pub claims: TokenClaims,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}

/// Source of login records.
pub trait CredentialStore: Send + Sync {
    fn lookup_user(&self, username: &str) -> Option<UserRecord>;

    /// A hash, at the store's work factor, that no password matches. Checked
    /// on unknown usernames so a miss costs as much as a wrong password.
    fn decoy_hash(&self) -> Option<&str> {
        None
    }
}

/// A store holding exactly one configured user.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    record: UserRecord,
    decoy_hash: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl StaticCredentials {
    /// Hash `password` once at construction; it is never kept in clear.
    pub fn new(
        username: impl Into<String>,
        password: &str,
        claims: TokenClaims,
        cost: u32,
    ) -> Result<Self, AppError> {
        let password_hash = bcrypt::hash(password, cost)?;
        let decoy_hash = bcrypt::hash(Uuid::new_v4().to_string(), cost)?;
        Ok(Self {
            username: username.into(),
            record: UserRecord {
                password_hash,
                claims,
            },
            decoy_hash,
        })
    }

    /// The demo user: id `12345`, role `user`, email equal to the username.
    pub fn demo(demo: &DemoCredentials, cost: u32) -> Result<Self, AppError> {
        let claims = TokenClaims::new("12345")
            .with_email(demo.username.clone())
            .with_role("user");
        Self::new(demo.username.clone(), &demo.password, claims, cost)
    }
}

impl CredentialStore for StaticCredentials {
    fn lookup_user(&self, username: &str) -> Option<UserRecord> {
        (self.username == username).then(|| self.record.clone())
    }

    fn decoy_hash(&self) -> Option<&str> {
        Some(&self.decoy_hash)
    }
}

/// Check a username/password pair against `store`.
///
/// Returns `Ok(None)` for an unknown user or a wrong password. Both paths
/// run one bcrypt verification when the store supplies a decoy hash. bcrypt
/// is CPU-bound; call this from a blocking context.
pub fn verify_credentials(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
) -> Result<Option<TokenClaims>, AppError> {
    let Some(record) = store.lookup_user(username) else {
        if let Some(decoy) = store.decoy_hash() {
            bcrypt::verify(password, decoy)?;
        }
        return Ok(None);
    };

    if bcrypt::verify(password, &record.password_hash)? {
        Ok(Some(record.claims))
    } else {
        Ok(None)
    }
}
