use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::USER_AGENT;
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn, Level};

use crate::middleware::request_trace::TraceId;

/// Access log: one `request_completed` record per request, leveled by status class.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let record = AccessRecord::begin(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            record.finish(status);

            result
        })
    }
}

/// What the access log needs from the request, captured before it is
/// handed to the inner service.
struct AccessRecord {
    started: Instant,
    method: String,
    path: String,
    user_agent: String,
    trace_id: String,
}

impl AccessRecord {
    fn begin(req: &ServiceRequest) -> Self {
        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            started: Instant::now(),
            method: req.method().to_string(),
            path: req.path().to_string(),
            user_agent,
            trace_id,
        }
    }

    fn finish(self, status: StatusCode) {
        let Self {
            started,
            method,
            path,
            user_agent,
            trace_id,
        } = self;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        let status_code = status.as_u16();

        macro_rules! completed {
            ($event:ident) => {
                $event!(
                    http.method = %method,
                    url.path = %path,
                    http.status_code = status_code,
                    duration_ms,
                    user_agent = %user_agent,
                    trace_id = %trace_id,
                    message = "request_completed"
                )
            };
        }

        let level = level_for(status);
        if level == Level::ERROR {
            completed!(error);
        } else if level == Level::WARN {
            completed!(warn);
        } else {
            completed!(info);
        }
    }
}

/// 5xx is an error, 4xx a warning, anything else routine.
fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}
