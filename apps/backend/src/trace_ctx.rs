//! Task-local request id, readable anywhere inside a request's future.
//!
//! [`crate::middleware::RequestTrace`] scopes each request with its id so
//! log helpers outside the span (security events, error rendering) can tag
//! their records without threading the id through every call.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// The current request id, or `None` outside a request scope.
pub fn current() -> Option<String> {
    TRACE_ID.try_with(Clone::clone).ok()
}

/// The current request id, or `"unknown"`.
pub fn trace_id() -> String {
    current().unwrap_or_else(|| "unknown".to_string())
}

/// Run `future` with `trace_id` as the task-local request id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
