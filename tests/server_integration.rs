//! HTTP surface integration tests.
//!
//! Drives the router end-to-end with stubbed providers:
//! - health reporting for reachable and unreachable backends
//! - structured command relay on `/interpret`
//! - the error contract (`detail` bodies) for exhaustion and fatal failures

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use intentd::config::RetryConfig;
use intentd::llm::{ChatMessage, ChatProvider};
use intentd::server::router;
use intentd::services::InterpretService;
use intentd::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// How a stub provider behaves on every call.
#[derive(Clone, Copy)]
enum StubBehavior {
    /// Chat replies with the add_ip fixture, probe succeeds.
    Reply,
    /// Chat replies with prose that never parses, probe succeeds.
    Garbage,
    /// Chat fails fatally, probe succeeds.
    Fatal,
    /// Chat succeeds, probe simulates a refused connection.
    Unreachable,
}

struct StubProvider {
    behavior: StubBehavior,
}

impl ChatProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn chat(&self, _messages: &[ChatMessage]) -> Result<String> {
        match self.behavior {
            StubBehavior::Reply | StubBehavior::Unreachable => {
                Ok(r#"{"action":"add_ip","response":"203.0.113.42"}"#.to_string())
            },
            StubBehavior::Garbage => Ok("no JSON today".to_string()),
            StubBehavior::Fatal => Err(Error::OperationFailed {
                operation: "chat".to_string(),
                cause: "provider wedged".to_string(),
            }),
        }
    }

    fn probe(&self) -> Result<()> {
        match self.behavior {
            StubBehavior::Unreachable => Err(Error::BackendUnreachable {
                cause: "connection refused".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

fn app(behavior: StubBehavior) -> axum::Router {
    let provider = Arc::new(StubProvider { behavior });
    let service = Arc::new(InterpretService::new(provider, RetryConfig::default()));
    router(service)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// /health
// ============================================================================

#[tokio::test]
async fn test_health_reports_ok_when_backend_reachable() {
    let (status, body) = get(app(StubBehavior::Reply), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["dependencies"]["ollama"], "reachable");
}

#[tokio::test]
async fn test_health_reports_failure_when_backend_refuses() {
    let (status, body) = get(app(StubBehavior::Unreachable), "/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Ollama API is not reachable");
}

// ============================================================================
// /interpret
// ============================================================================

#[tokio::test]
async fn test_interpret_relays_the_structured_command() {
    let (status, body) = post_json(
        app(StubBehavior::Reply),
        "/interpret",
        r#"{"message":"Agrega mi IP 203.0.113.42"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"action": "add_ip", "response": "203.0.113.42"})
    );
}

#[tokio::test]
async fn test_interpret_reports_exhaustion_detail() {
    let (status, body) = post_json(
        app(StubBehavior::Garbage),
        "/interpret",
        r#"{"message":"Hola"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "Unable to interpret the request after multiple attempts."
    );
}

#[tokio::test]
async fn test_interpret_surfaces_fatal_detail() {
    let (status, body) = post_json(
        app(StubBehavior::Fatal),
        "/interpret",
        r#"{"message":"Hola"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "operation 'chat' failed: provider wedged");
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let response = app(StubBehavior::Reply)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
}
