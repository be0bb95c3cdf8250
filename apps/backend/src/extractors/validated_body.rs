use std::ops::Deref;

use actix_web::dev::{Payload, UrlEncoded};
use actix_web::error::UrlencodedError;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::validated_json::{ValidatedJson, MAX_JSON_BODY};
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request body that is either a URL-encoded form or JSON, picked by
/// `Content-Type`. Anything that is not a form goes through [`ValidatedJson`].
#[derive(Debug)]
pub struct ValidatedBody<T>(pub T);

impl<T> ValidatedBody<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedBody<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if !req.content_type().eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
            let json = ValidatedJson::<T>::from_request(req, payload);
            return Box::pin(async move { json.await.map(|body| ValidatedBody(body.0)) });
        }

        let form = UrlEncoded::<T>::new(req, payload).limit(MAX_JSON_BODY);
        Box::pin(async move {
            form.await
                .map(ValidatedBody)
                .map_err(|e| form_error(&e))
        })
    }
}

fn form_error(error: &UrlencodedError) -> AppError {
    match error {
        UrlencodedError::Overflow { .. } => {
            AppError::operational(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
        }
        other => {
            debug!(
                trace_id = %trace_ctx::trace_id(),
                error = %Redacted(&other.to_string()),
                "Form parsing failed"
            );
            AppError::bad_request("Invalid form body")
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Credentials {
        #[serde(default)]
        username: String,
        #[serde(default)]
        refresh_token: Option<String>,
    }

    async fn extract(content_type: &str, body: &'static str) -> Result<Credentials, AppError> {
        let (req, mut payload) = TestRequest::post()
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_http_parts();
        ValidatedBody::<Credentials>::from_request(&req, &mut payload)
            .await
            .map(ValidatedBody::into_inner)
    }

    #[actix_web::test]
    async fn form_body_is_decoded() {
        let creds = extract(FORM_CONTENT_TYPE, "username=demo%40example.com&refreshToken=abc")
            .await
            .unwrap();

        assert_eq!(creds.username, "demo@example.com");
        assert_eq!(creds.refresh_token.as_deref(), Some("abc"));
    }

    #[actix_web::test]
    async fn form_content_type_with_charset_is_still_a_form() {
        let creds = extract(
            "application/x-www-form-urlencoded; charset=utf-8",
            "username=ops",
        )
        .await
        .unwrap();

        assert_eq!(creds.username, "ops");
    }

    #[actix_web::test]
    async fn empty_form_has_no_fields() {
        let creds = extract(FORM_CONTENT_TYPE, "").await.unwrap();

        assert_eq!(creds.username, "");
        assert_eq!(creds.refresh_token, None);
    }

    #[actix_web::test]
    async fn other_content_types_parse_as_json() {
        let creds = extract("application/json", r#"{"username":"demo"}"#)
            .await
            .unwrap();
        assert_eq!(creds.username, "demo");

        let err = extract("text/plain", "username=demo").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn oversized_form_is_payload_too_large() {
        let err = form_error(&UrlencodedError::Overflow {
            size: MAX_JSON_BODY + 1,
            limit: MAX_JSON_BODY,
        });
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let err = form_error(&UrlencodedError::ContentType);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid form body");
    }
}
