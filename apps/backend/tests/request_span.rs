//! Handler logs inherit the request id through the `request` span.
//!
//! Installs its own global subscriber, so it lives in a binary without the
//! shared test support (which initializes logging on load).

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use actix_web::{test, web, App, HttpResponse};
use serde_json::Value;
use starter_backend::middleware::{RequestTrace, StructuredLogger};
use starter_backend::AppError;
use tracing::info;
use tracing::subscriber::set_global_default;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;

/// Appends JSON lines to a shared buffer.
#[derive(Clone)]
struct BufWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[actix_web::test]
async fn handler_logs_carry_request_span_trace_id() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufWriter(buf.clone())
    };

    let subscriber = Registry::default().with(
        fmt::Layer::default()
            .json()
            .with_span_list(true)
            .with_current_span(true)
            .with_ansi(false)
            .with_writer(make_writer),
    );
    set_global_default(subscriber).expect("set global subscriber");

    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .route(
                "/ping",
                web::get().to(|| async {
                    info!("inside handler");
                    Ok::<HttpResponse, AppError>(HttpResponse::Ok().finish())
                }),
            ),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
    assert!(resp.status().is_success());

    let trace_id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id header present")
        .to_str()
        .unwrap()
        .to_string();

    let data = String::from_utf8(buf.lock().unwrap().clone()).expect("utf8");

    let mut saw_handler_line = false;
    let mut saw_trace_match = false;
    let mut saw_access_log = false;

    for line in data.lines().filter(|l| !l.trim().is_empty()) {
        let Ok(v) = serde_json::from_str::<Value>(line) else {
            continue;
        };

        let msg = v
            .get("fields")
            .and_then(|f| f.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("");

        if msg == "request_completed" {
            saw_access_log = v["fields"]["trace_id"].as_str() == Some(trace_id.as_str());
        }

        if msg.contains("inside handler") {
            saw_handler_line = true;
            saw_trace_match = v
                .get("spans")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .any(|s| {
                    s.get("name").and_then(Value::as_str) == Some("request")
                        && s.get("trace_id").and_then(Value::as_str) == Some(trace_id.as_str())
                });
        }
    }

    assert!(saw_handler_line, "did not capture handler log line");
    assert!(saw_trace_match, "handler log did not inherit trace_id from the request span");
    assert!(saw_access_log, "access log did not carry the request id");
}
