pub mod claims;
pub mod credentials;
pub mod tokens;

pub use claims::{TokenClaims, RESERVED_CLAIMS};
pub use credentials::{verify_credentials, CredentialStore, StaticCredentials, UserRecord};
pub use tokens::{InvalidToken, TokenKind, TokenPair, TokenService};
