pub mod authenticate;
pub mod authorize;
pub mod cors;
pub mod error_envelope;
pub mod request_trace;
pub mod security_headers;
pub mod structured_logger;

pub use authenticate::Authenticate;
pub use authorize::Authorize;
pub use cors::cors_middleware;
pub use error_envelope::{ErrorEnvelope, ErrorPolicy};
pub use request_trace::{RequestTrace, TraceId};
pub use security_headers::SecurityHeaders;
pub use structured_logger::StructuredLogger;
