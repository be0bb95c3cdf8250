//! Centralized error handler.
//!
//! Handlers, extractors and the auth gates all answer failures with an
//! error-carrying response; this layer logs each one once and swaps in the
//! JSON envelope. Successful responses pass through untouched.
//!
//! The layer never holds its own handle on the request while the inner
//! service runs: routing needs the request to be uniquely owned.

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::error::InternalError;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{error, warn};

use crate::config::Environment;
use crate::error::AppError;
use crate::response::send_error_with_status;
use crate::trace_ctx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPolicy {
    /// Put fault details in the envelope's `error` field.
    pub expose_details: bool,
}

impl ErrorPolicy {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            expose_details: !environment.is_production(),
        }
    }
}

pub struct ErrorEnvelope {
    policy: ErrorPolicy,
}

impl ErrorEnvelope {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorEnvelope
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorEnvelopeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorEnvelopeMiddleware {
            service,
            policy: self.policy,
        }))
    }
}

pub struct ErrorEnvelopeMiddleware<S> {
    service: S,
    policy: ErrorPolicy,
}

impl<S, B> Service<ServiceRequest> for ErrorEnvelopeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let policy = self.policy;
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => {
                    let rendered = res.response().error().map(|err| render_failure(err, policy));
                    match rendered {
                        Some(body) => {
                            let (http_req, _) = res.into_parts();
                            Ok(ServiceResponse::new(http_req, body))
                        }
                        None => Ok(res.map_into_boxed_body()),
                    }
                }
                // A bare `Err` has no request left to answer with; hand the
                // rendered envelope to the server as the error's response.
                Err(err) => {
                    let rendered = render_failure(&err, policy);
                    Err(InternalError::from_response(err, rendered).into())
                }
            }
        })
    }
}

/// Log `err` and build its envelope.
pub fn render_failure(err: &Error, policy: ErrorPolicy) -> HttpResponse {
    let trace_id = trace_ctx::trace_id();

    if let Some(app_err) = err.as_error::<AppError>() {
        let status = app_err.status().as_u16();
        if app_err.is_operational() {
            warn!(%trace_id, status, "[{status}] {app_err}");
        } else {
            error!(%trace_id, status, error = %app_err, "[{status}] {app_err}");
        }
        return app_err.render(policy.expose_details);
    }

    let status = err.as_response_error().status_code();
    if status.is_client_error() {
        let message = err.to_string();
        warn!(%trace_id, status = status.as_u16(), "[{}] {message}", status.as_u16());
        return send_error_with_status(status, message, None);
    }

    error!(%trace_id, status = status.as_u16(), error = %err, "Unhandled error");
    let detail = policy.expose_details.then(|| err.to_string());
    send_error_with_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        detail,
    )
}
