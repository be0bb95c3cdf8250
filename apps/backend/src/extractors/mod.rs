pub mod current_claims;
pub mod validated_body;
pub mod validated_json;

pub use current_claims::CurrentClaims;
pub use validated_body::ValidatedBody;
pub use validated_json::ValidatedJson;
