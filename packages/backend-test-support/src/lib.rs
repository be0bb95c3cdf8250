//! Backend test support utilities
//!
//! Shared by unit and integration tests: unified logging initialization and
//! assertions for the JSON response envelope.

pub mod envelope;
pub mod logging;

pub use envelope::{assert_envelope, assert_error_envelope, EnvelopeLike};
