//! HTTP surface.
//!
//! Exposes the interpretation pipeline over two endpoints: `GET /health`
//! and `POST /interpret`. The core stays synchronous; handlers host it on
//! the blocking pool so unrelated requests are never starved.

use crate::models::InterpretationRequest;
use crate::services::InterpretService;
use crate::{Error, Result};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1MB) to prevent `DoS` via large payloads.
const MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024;

/// Shared state for the HTTP surface.
///
/// One interpretation service shared read-only across requests; no other
/// state crosses request boundaries.
#[derive(Clone)]
pub struct AppState {
    /// Interpretation service.
    pub service: Arc<InterpretService>,
}

/// Builds the service router.
#[must_use]
pub fn router(service: Arc<InterpretService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/interpret", post(interpret))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
        // Security headers (OWASP recommendations)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

/// Binds the listener and serves until the process exits.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the listener cannot be bound or
/// the server stops unexpectedly.
pub async fn serve(service: Arc<InterpretService>, bind: &str) -> Result<()> {
    let app = router(service);

    let listener =
        tokio::net::TcpListener::bind(bind)
            .await
            .map_err(|e| Error::OperationFailed {
                operation: "bind".to_string(),
                cause: e.to_string(),
            })?;

    tracing::info!(addr = bind, "Starting intentd HTTP server");
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "serve".to_string(),
            cause: e.to_string(),
        })
}

/// `GET /health` handler.
///
/// Probes the model backend base endpoint and reports liveness plus the
/// dependency status. No retries.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("Health check endpoint called");

    let service = Arc::clone(&state.service);
    let result = tokio::task::spawn_blocking(move || service.check_backend()).await;

    match result {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "message": "API is running smoothly",
                "dependencies": {
                    "ollama": "reachable"
                }
            })),
        ),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Ollama API is not reachable" })),
            )
        },
        Err(err) => join_failure(&err),
    }
}

/// `POST /interpret` handler.
///
/// Runs the bounded interpretation loop and relays the structured command
/// on success.
async fn interpret(
    State(state): State<AppState>,
    Json(request): Json<InterpretationRequest>,
) -> impl IntoResponse {
    let service = Arc::clone(&state.service);
    let result = tokio::task::spawn_blocking(move || service.interpret(&request)).await;

    match result {
        Ok(Ok(command)) => (
            StatusCode::OK,
            Json(serde_json::to_value(&command).unwrap_or(Value::Null)),
        ),
        Ok(Err(err)) => error_response(&err),
        Err(err) => join_failure(&err),
    }
}

/// Maps pipeline errors onto the HTTP error contract.
fn error_response(err: &Error) -> (StatusCode, Json<Value>) {
    let detail = match err {
        Error::InterpretationExhausted { .. } => {
            "Unable to interpret the request after multiple attempts.".to_string()
        },
        Error::BackendUnreachable { .. } => "Ollama API is not reachable".to_string(),
        other => other.to_string(),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": detail })),
    )
}

/// Maps a blocking-task join failure onto the HTTP error contract.
fn join_failure(err: &tokio::task::JoinError) -> (StatusCode, Json<Value>) {
    tracing::error!(error = %err, "Blocking task failed");
    error_response(&Error::OperationFailed {
        operation: "blocking_task".to_string(),
        cause: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_details() {
        let (status, Json(body)) = error_response(&Error::InterpretationExhausted { attempts: 3 });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "Unable to interpret the request after multiple attempts."
        );

        let (_, Json(body)) = error_response(&Error::BackendUnreachable {
            cause: "connection refused".to_string(),
        });
        assert_eq!(body["detail"], "Ollama API is not reachable");

        let (_, Json(body)) = error_response(&Error::OperationFailed {
            operation: "bind".to_string(),
            cause: "address in use".to_string(),
        });
        assert_eq!(body["detail"], "operation 'bind' failed: address in use");
    }
}
