//! Uniform JSON envelope for every HTTP reply.
//!
//! Every body the service writes, success or failure, has the shape
//! `{ success, message, statusCode, data?, error? }`. Absent `data` and
//! `error` are omitted from the JSON rather than rendered as `null`.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(
        status: StatusCode,
        success: bool,
        message: impl Into<String>,
        data: Option<T>,
        error: Option<String>,
    ) -> Self {
        Self {
            success,
            message: message.into(),
            status_code: status.as_u16(),
            data,
            error,
        }
    }

    /// Serialize into a response carrying the envelope's status code.
    pub fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

/// Write a single envelope with an explicit status.
pub fn send_result<T: Serialize>(
    status: StatusCode,
    success: bool,
    message: impl Into<String>,
    data: Option<T>,
    error: Option<String>,
) -> HttpResponse {
    ApiResponse::new(status, success, message, data, error).into_response()
}

/// 200 OK with a payload.
pub fn send_success<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    send_result(StatusCode::OK, true, message, Some(data), None)
}

pub fn send_success_with_status<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    send_result(status, true, message, data, None)
}

/// 400 Bad Request with an optional error detail.
pub fn send_error(message: impl Into<String>, error: Option<String>) -> HttpResponse {
    send_error_with_status(StatusCode::BAD_REQUEST, message, error)
}

pub fn send_error_with_status(
    status: StatusCode,
    message: impl Into<String>,
    error: Option<String>,
) -> HttpResponse {
    send_result::<()>(status, false, message, None, error)
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use serde_json::{json, Value};

    use super::*;

    async fn body_json(resp: HttpResponse) -> Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn success_defaults_to_200_and_omits_error() {
        let resp = send_success("Fetched", json!({ "id": 7 }));
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Fetched",
                "statusCode": 200,
                "data": { "id": 7 }
            })
        );
    }

    #[actix_web::test]
    async fn error_defaults_to_400_and_omits_data() {
        let resp = send_error("Bad input", None);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(
            body,
            json!({ "success": false, "message": "Bad input", "statusCode": 400 })
        );
        assert!(body.get("data").is_none());
        assert!(body.get("error").is_none());
    }

    #[actix_web::test]
    async fn explicit_status_is_mirrored_in_body() {
        let resp = send_error_with_status(
            StatusCode::NOT_FOUND,
            "Cannot GET /nope",
            Some("Route not found".to_string()),
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = body_json(resp).await;
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["error"], "Route not found");
    }

    #[actix_web::test]
    async fn success_with_status_allows_empty_payload() {
        let resp = send_success_with_status::<()>(StatusCode::CREATED, "Created", None);
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_json(resp).await;
        assert_eq!(
            body,
            json!({ "success": true, "message": "Created", "statusCode": 201 })
        );
    }
}
