//! Response envelope assertions, independent of backend types.

use actix_web::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Mirror of the backend envelope. Unknown fields are rejected so a stray
/// `null` or extra key fails the shape check.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct EnvelopeLike {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Assert `body` is an envelope agreeing with the HTTP `status`, and return it.
///
/// Checks: required fields present, `statusCode` equals the HTTP status,
/// `success` matches the status class, `data`/`error` are never `null`.
pub fn assert_envelope(status: StatusCode, body: &Value) -> EnvelopeLike {
    let object = body
        .as_object()
        .unwrap_or_else(|| panic!("envelope must be a JSON object, got {body}"));

    for key in ["data", "error"] {
        assert!(
            object.get(key).map_or(true, |v| !v.is_null()),
            "`{key}` must be omitted rather than null: {body}"
        );
    }

    let envelope: EnvelopeLike = serde_json::from_value(body.clone())
        .unwrap_or_else(|e| panic!("body is not an envelope ({e}): {body}"));

    assert_eq!(envelope.status_code, status.as_u16(), "statusCode mismatch: {body}");
    assert_eq!(
        envelope.success,
        status.is_success(),
        "success flag disagrees with status {status}: {body}"
    );

    envelope
}

/// Assert a failure envelope with the given status and message.
pub fn assert_error_envelope(
    status: StatusCode,
    body: &Value,
    expected_status: StatusCode,
    expected_message: &str,
) -> EnvelopeLike {
    assert_eq!(status, expected_status, "unexpected status: {body}");
    let envelope = assert_envelope(status, body);
    assert!(!envelope.success);
    assert_eq!(envelope.message, expected_message);
    assert!(envelope.data.is_none(), "errors carry no data: {body}");
    envelope
}
